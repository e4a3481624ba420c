//! Navigation sidebar declarations.
//!
//! A sidebar is an ordered list of [`SidebarEntry`] values. Each entry has a
//! label and exactly one source of content:
//!
//! - `items`: an explicit ordered list of document slugs or nested entries
//! - `autogenerate`: every document below a content directory, listed by the
//!   site generator at build time
//! - `link`: a single page slug or external URL
//!
//! The three sources are separate optional fields rather than an enum so that
//! a malformed entry (none or several set) still parses and can be reported
//! with its position by [`SidebarEntry::validate`].

use serde::{Deserialize, Serialize};

use crate::{ConfigError, require_non_empty};

/// One labeled entry in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarEntry {
    /// Text shown in the navigation.
    pub label: String,
    /// Direct link to a single page (slug or external URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Whether the group starts collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Explicit ordered list of group contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SidebarItem>>,
    /// Populate the group from a content directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autogenerate: Option<Autogenerate>,
}

/// An element of an explicit `items` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Document slug, e.g. `hardware/overview`.
    Slug(String),
    /// Nested group or labeled link.
    Entry(SidebarEntry),
}

/// Directory listing directive for a sidebar group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Autogenerate {
    /// Content directory to list, relative to the content root.
    pub directory: String,
    /// Whether generated subgroups start collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

/// The content source of a well-formed [`SidebarEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarKind<'a> {
    Items(&'a [SidebarItem]),
    Autogenerate(&'a Autogenerate),
    Link(&'a str),
}

impl SidebarEntry {
    /// Group with an explicit list of document slugs.
    pub fn with_items<I, S>(label: impl Into<String>, slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: Some(
                slugs
                    .into_iter()
                    .map(|slug| SidebarItem::Slug(slug.into()))
                    .collect(),
            ),
            ..Self::bare(label)
        }
    }

    /// Group listing a content directory.
    pub fn autogenerated(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            autogenerate: Some(Autogenerate {
                directory: directory.into(),
                collapsed: None,
            }),
            ..Self::bare(label)
        }
    }

    /// Single link entry.
    pub fn link(label: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            ..Self::bare(label)
        }
    }

    fn bare(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: None,
            collapsed: None,
            items: None,
            autogenerate: None,
        }
    }

    /// Content source of this entry.
    ///
    /// Returns `None` unless exactly one of `items`, `autogenerate` and `link`
    /// is set.
    pub fn kind(&self) -> Option<SidebarKind<'_>> {
        match (&self.items, &self.autogenerate, &self.link) {
            (Some(items), None, None) => Some(SidebarKind::Items(items)),
            (None, Some(auto), None) => Some(SidebarKind::Autogenerate(auto)),
            (None, None, Some(link)) => Some(SidebarKind::Link(link)),
            _ => None,
        }
    }

    /// Names of the content fields that are set.
    fn sources(&self) -> Vec<&'static str> {
        [
            ("items", self.items.is_some()),
            ("autogenerate", self.autogenerate.is_some()),
            ("link", self.link.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    /// Validate this entry and any nested entries.
    ///
    /// `path` is the dotted location used in error messages, e.g.
    /// `docs.sidebar[2]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        require_non_empty(&self.label, &format!("{path}.label"))?;

        let Some(kind) = self.kind() else {
            let sources = self.sources();
            let found = if sources.is_empty() {
                "none".to_owned()
            } else {
                sources.join(", ")
            };
            return Err(ConfigError::Validation(format!(
                "{path} ({}) must set exactly one of items, autogenerate, link (found {found})",
                self.label
            )));
        };

        match kind {
            SidebarKind::Items(items) => {
                if items.is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "{path}.items cannot be empty"
                    )));
                }
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{path}.items[{i}]");
                    match item {
                        SidebarItem::Slug(slug) => require_non_empty(slug, &item_path)?,
                        SidebarItem::Entry(entry) => entry.validate(&item_path)?,
                    }
                }
            }
            SidebarKind::Autogenerate(auto) => {
                require_non_empty(&auto.directory, &format!("{path}.autogenerate.directory"))?;
            }
            SidebarKind::Link(link) => require_non_empty(link, &format!("{path}.link"))?,
        }

        Ok(())
    }
}

/// Whether a sidebar link points outside the content collection.
///
/// Absolute site paths (`/api/`) count as external: they are not document
/// slugs.
pub fn is_external_link(link: &str) -> bool {
    link.starts_with("http://")
        || link.starts_with("https://")
        || link.starts_with("mailto:")
        || link.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn assert_invalid(entry: &SidebarEntry, expected: &[&str]) {
        let err = entry.validate("docs.sidebar[0]").unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected {
            assert!(msg.contains(s), "Expected error to contain '{s}', got: {msg}");
        }
    }

    #[test]
    fn test_kind_items() {
        let entry = SidebarEntry::with_items("Hardware", ["hardware/overview"]);
        assert!(matches!(entry.kind(), Some(SidebarKind::Items(items)) if items.len() == 1));
    }

    #[test]
    fn test_kind_autogenerate() {
        let entry = SidebarEntry::autogenerated("Software & Programming", "software");
        assert!(matches!(
            entry.kind(),
            Some(SidebarKind::Autogenerate(auto)) if auto.directory == "software"
        ));
    }

    #[test]
    fn test_kind_link() {
        let entry = SidebarEntry::link("Links", "links");
        assert_eq!(entry.kind(), Some(SidebarKind::Link("links")));
    }

    #[test]
    fn test_kind_none_when_nothing_set() {
        assert_eq!(SidebarEntry::bare("Empty").kind(), None);
    }

    #[test]
    fn test_kind_none_when_several_set() {
        let entry = SidebarEntry {
            link: Some("links".to_owned()),
            ..SidebarEntry::autogenerated("Mixed", "software")
        };
        assert_eq!(entry.kind(), None);
    }

    #[test]
    fn test_validate_well_formed_entries() {
        SidebarEntry::with_items("Hardware", ["hardware/overview", "hardware/display"])
            .validate("docs.sidebar[0]")
            .unwrap();
        SidebarEntry::autogenerated("Software", "software")
            .validate("docs.sidebar[1]")
            .unwrap();
        SidebarEntry::link("Links", "links")
            .validate("docs.sidebar[2]")
            .unwrap();
    }

    #[test]
    fn test_validate_no_source() {
        assert_invalid(
            &SidebarEntry::bare("Hardware"),
            &["docs.sidebar[0]", "Hardware", "found none"],
        );
    }

    #[test]
    fn test_validate_two_sources() {
        let entry = SidebarEntry {
            link: Some("links".to_owned()),
            ..SidebarEntry::with_items("Hardware", ["hardware/overview"])
        };
        assert_invalid(&entry, &["exactly one", "items, link"]);
    }

    #[test]
    fn test_validate_empty_items() {
        let entry = SidebarEntry::with_items("Hardware", Vec::<String>::new());
        assert_invalid(&entry, &["docs.sidebar[0].items", "empty"]);
    }

    #[test]
    fn test_validate_empty_label() {
        assert_invalid(&SidebarEntry::link("", "links"), &["label", "empty"]);
    }

    #[test]
    fn test_validate_empty_autogenerate_directory() {
        assert_invalid(
            &SidebarEntry::autogenerated("Software", ""),
            &["autogenerate.directory", "empty"],
        );
    }

    #[test]
    fn test_validate_empty_slug() {
        let entry = SidebarEntry::with_items("Hardware", ["hardware/overview", ""]);
        assert_invalid(&entry, &["docs.sidebar[0].items[1]", "empty"]);
    }

    #[test]
    fn test_validate_nested_entry_reports_nested_path() {
        let mut entry = SidebarEntry::with_items("Hardware", ["hardware/overview"]);
        if let Some(items) = entry.items.as_mut() {
            items.push(SidebarItem::Entry(SidebarEntry::bare("Pins")));
        }
        assert_invalid(&entry, &["docs.sidebar[0].items[1]", "Pins"]);
    }

    #[test]
    fn test_parse_mixed_items() {
        let toml = r#"
label = "Hardware"
items = ["hardware/overview", { label = "Display", link = "hardware/display" }]
"#;
        let entry: SidebarEntry = toml::from_str(toml).unwrap();
        assert_eq!(
            entry.items,
            Some(vec![
                SidebarItem::Slug("hardware/overview".to_owned()),
                SidebarItem::Entry(SidebarEntry::link("Display", "hardware/display")),
            ])
        );
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let toml = r#"
label = "Hardware"
link = "hardware"
badge = "new"
"#;
        assert!(toml::from_str::<SidebarEntry>(toml).is_err());
    }

    #[test]
    fn test_external_links() {
        assert!(is_external_link("https://github.com/jake-walker/arcade-coder-wiki"));
        assert!(is_external_link("/rs-arcade-coder/"));
        assert!(!is_external_link("links"));
        assert!(!is_external_link("hardware/overview"));
    }
}
