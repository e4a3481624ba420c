//! Consistency checks between the sidebar and the content directory.
//!
//! The site generator rejects a sidebar that references missing documents,
//! but only once a full build runs. These checks report the same problems
//! from the configuration and a [`ContentIndex`] alone.

use std::collections::HashSet;
use std::fmt;

use acw_config::{SidebarEntry, SidebarItem, SidebarKind, is_external_link};

use crate::ContentIndex;

/// How serious a [`Diagnostic`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Reported, but only fails `acw check --strict`.
    Warning,
    /// Fails `acw check`.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A problem found by a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Whether the problem fails the check.
    pub severity: Severity,
    /// Where the problem is, e.g. `docs.sidebar[0].items[2]` or a file path.
    pub location: String,
    /// What is wrong, e.g. `no document for "faq"`.
    pub message: String,
}

impl Diagnostic {
    fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            location: location.into(),
            message: message.into(),
        }
    }

    fn warning(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            location: location.into(),
            message: message.into(),
        }
    }

    /// Whether this diagnostic has [`Severity::Error`].
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}

/// Check every sidebar reference against the content index.
///
/// Reports, in sidebar order:
/// - an error for each slug in `items` with no document
/// - an error for each `autogenerate` directory with no documents
/// - an error for each internal `link` with no document
/// - a warning for labels repeated among siblings
///
/// Entries that fail [`SidebarEntry::kind`] are skipped; configuration
/// validation reports them.
pub fn check_sidebar(sidebar: &[SidebarEntry], index: &ContentIndex) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let entries = sidebar
        .iter()
        .enumerate()
        .map(|(i, entry)| (format!("docs.sidebar[{i}]"), entry));
    check_siblings(entries, index, &mut diagnostics);
    diagnostics
}

fn check_siblings<'a>(
    entries: impl Iterator<Item = (String, &'a SidebarEntry)>,
    index: &ContentIndex,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let mut labels = HashSet::new();
    for (path, entry) in entries {
        if !labels.insert(entry.label.as_str()) {
            diagnostics.push(Diagnostic::warning(
                path.as_str(),
                format!("label {:?} is used more than once", entry.label),
            ));
        }
        check_entry(&path, entry, index, diagnostics);
    }
}

fn check_entry(
    path: &str,
    entry: &SidebarEntry,
    index: &ContentIndex,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match entry.kind() {
        Some(SidebarKind::Items(items)) => {
            for (i, item) in items.iter().enumerate() {
                if let SidebarItem::Slug(slug) = item
                    && !index.contains(slug)
                {
                    diagnostics.push(Diagnostic::error(
                        format!("{path}.items[{i}]"),
                        format!("no document for {slug:?}"),
                    ));
                }
            }
            let nested = items.iter().enumerate().filter_map(|(i, item)| match item {
                SidebarItem::Entry(nested) => Some((format!("{path}.items[{i}]"), nested)),
                SidebarItem::Slug(_) => None,
            });
            check_siblings(nested, index, diagnostics);
        }
        Some(SidebarKind::Autogenerate(auto)) => {
            if index.documents_in(&auto.directory).next().is_none() {
                diagnostics.push(Diagnostic::error(
                    format!("{path}.autogenerate"),
                    format!("directory {:?} has no documents", auto.directory),
                ));
            }
        }
        Some(SidebarKind::Link(link)) => {
            let target = link.split('#').next().unwrap_or(link);
            if !is_external_link(link) && !index.contains(target) {
                diagnostics.push(Diagnostic::error(
                    format!("{path}.link"),
                    format!("no document for {link:?}"),
                ));
            }
        }
        None => {}
    }
}

/// Warn about documents without a frontmatter `title`, which the
/// documentation theme requires. Malformed frontmatter gets its own message.
pub fn check_frontmatter(index: &ContentIndex) -> Vec<Diagnostic> {
    index
        .documents()
        .filter_map(|doc| {
            let location = doc.path.display().to_string();
            match (&doc.frontmatter_error, &doc.title) {
                (Some(err), _) => Some(Diagnostic::warning(
                    location,
                    format!("malformed frontmatter: {err}"),
                )),
                (None, None) => Some(Diagnostic::warning(location, "missing frontmatter title")),
                (None, Some(_)) => None,
            }
        })
        .collect()
}

/// Warn about document files the scan left out of the index.
pub fn check_skipped(index: &ContentIndex) -> Vec<Diagnostic> {
    index
        .skipped()
        .iter()
        .map(|skipped| {
            Diagnostic::warning(
                skipped.path.display().to_string(),
                format!("skipped: {}", skipped.reason),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Content tree of the Arcade Coder wiki.
    fn wiki_content() -> (tempfile::TempDir, ContentIndex) {
        let dir = tempfile::tempdir().unwrap();
        for (rel, title) in [
            ("index.mdx", "Arcade Coder Wiki"),
            ("hardware/overview.md", "Overview"),
            ("hardware/display.md", "Display"),
            ("hardware/buttons.md", "Buttons"),
            ("software/flashing.md", "Flashing"),
            ("links.md", "Links"),
        ] {
            write(dir.path(), rel, &format!("---\ntitle: {title}\n---\n"));
        }
        let index = ContentIndex::scan(dir.path()).unwrap();
        (dir, index)
    }

    fn wiki_sidebar() -> Vec<SidebarEntry> {
        vec![
            SidebarEntry::with_items(
                "Hardware",
                ["hardware/overview", "hardware/display", "hardware/buttons"],
            ),
            SidebarEntry::autogenerated("Software & Programming", "software"),
            SidebarEntry::link("Links", "links"),
        ]
    }

    fn locations(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.location.as_str()).collect()
    }

    #[test]
    fn test_wiki_sidebar_is_clean() {
        let (_dir, index) = wiki_content();
        let sidebar = check_sidebar(&wiki_sidebar(), &index);
        assert!(sidebar.is_empty(), "{sidebar:?}");
        let frontmatter = check_frontmatter(&index);
        assert!(frontmatter.is_empty(), "{frontmatter:?}");
    }

    #[test]
    fn test_missing_item() {
        let (_dir, index) = wiki_content();
        let sidebar = vec![SidebarEntry::with_items(
            "Hardware",
            ["hardware/overview", "hardware/speaker"],
        )];

        let diagnostics = check_sidebar(&sidebar, &index);

        assert_eq!(locations(&diagnostics), vec!["docs.sidebar[0].items[1]"]);
        assert!(diagnostics[0].is_error());
        assert!(diagnostics[0].message.contains("hardware/speaker"));
    }

    #[test]
    fn test_empty_autogenerate_directory() {
        let (_dir, index) = wiki_content();
        let sidebar = vec![SidebarEntry::autogenerated("Guides", "guides")];

        let diagnostics = check_sidebar(&sidebar, &index);

        assert_eq!(locations(&diagnostics), vec!["docs.sidebar[0].autogenerate"]);
        assert!(diagnostics[0].is_error());
    }

    #[test]
    fn test_internal_link_checked_external_skipped() {
        let (_dir, index) = wiki_content();
        let sidebar = vec![
            SidebarEntry::link("Source", "https://github.com/jake-walker/arcade-coder-wiki"),
            SidebarEntry::link("Links", "links#firmware"),
            SidebarEntry::link("Missing", "faq"),
        ];

        let diagnostics = check_sidebar(&sidebar, &index);

        assert_eq!(locations(&diagnostics), vec!["docs.sidebar[2].link"]);
    }

    #[test]
    fn test_nested_entries_checked() {
        let (_dir, index) = wiki_content();
        let mut hardware = SidebarEntry::with_items("Hardware", ["hardware/overview"]);
        if let Some(items) = hardware.items.as_mut() {
            items.push(SidebarItem::Entry(SidebarEntry::with_items(
                "Peripherals",
                ["hardware/buttons", "hardware/sound"],
            )));
        }

        let diagnostics = check_sidebar(&[hardware], &index);

        assert_eq!(
            locations(&diagnostics),
            vec!["docs.sidebar[0].items[1].items[1]"]
        );
    }

    #[test]
    fn test_duplicate_labels_warn() {
        let (_dir, index) = wiki_content();
        let sidebar = vec![
            SidebarEntry::link("Links", "links"),
            SidebarEntry::link("Links", "hardware/overview"),
        ];

        let diagnostics = check_sidebar(&sidebar, &index);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!(diagnostics[0].location, "docs.sidebar[1]");
    }

    #[test]
    fn test_malformed_entry_skipped() {
        let (_dir, index) = wiki_content();
        let entry = SidebarEntry {
            link: Some("missing".to_owned()),
            ..SidebarEntry::autogenerated("Mixed", "nowhere")
        };
        assert!(check_sidebar(&[entry], &index).is_empty());
    }

    #[test]
    fn test_frontmatter_without_title_warns() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "hardware/overview.md", "# Overview\n");
        write(dir.path(), "links.md", "---\ntitle: Links\n---\n");
        let index = ContentIndex::scan(dir.path()).unwrap();

        let diagnostics = check_frontmatter(&index);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].location.ends_with("overview.md"));
    }

    #[test]
    fn test_malformed_frontmatter_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "hardware/display.md", "---\ntitle: [unclosed\n---\n");
        let index = ContentIndex::scan(dir.path()).unwrap();

        let diagnostics = check_frontmatter(&index);

        assert_eq!(diagnostics.len(), 1);
        assert!(
            diagnostics[0].message.starts_with("malformed frontmatter"),
            "{diagnostics:?}"
        );
    }

    #[test]
    fn test_skipped_documents_warn() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "links.md", "---\ntitle: Links\n---\n");
        write(dir.path(), "Links.mdx", "---\ntitle: Links\n---\n");
        let index = ContentIndex::scan(dir.path()).unwrap();

        let diagnostics = check_skipped(&index);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert!(diagnostics[0].location.ends_with("links.md"));
        assert!(diagnostics[0].message.contains("Links.mdx"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::error("docs.sidebar[2].link", "no document for \"faq\"");
        assert_eq!(
            diagnostic.to_string(),
            "error: docs.sidebar[2].link: no document for \"faq\""
        );
    }
}
