//! Content discovery by filesystem walking.
//!
//! Builds a [`ContentIndex`] of every markdown document under the content
//! directory, keyed by the slug the site generator derives from its path.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ContentError;
use crate::frontmatter::parse_frontmatter;

/// File extensions the site generator treats as documents.
const DOCUMENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// A document found in the content directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Slug, e.g. `hardware/overview`. The root index has the empty slug.
    pub slug: String,
    /// Path to the source file.
    pub path: PathBuf,
    /// `title` from the frontmatter, if present.
    pub title: Option<String>,
    /// YAML error when the frontmatter block could not be parsed.
    pub frontmatter_error: Option<String>,
}

/// A document file left out of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    /// Path to the source file.
    pub path: PathBuf,
    /// Why the file was left out.
    pub reason: String,
}

/// Index of the documents under a content directory.
#[derive(Debug, Default)]
pub struct ContentIndex {
    root: PathBuf,
    documents: BTreeMap<String, Document>,
    skipped: Vec<SkippedDocument>,
}

impl ContentIndex {
    /// Scan `root` recursively.
    ///
    /// Hidden files and directories are skipped. A missing `root` yields an
    /// empty index. Entries are walked in file-name order, so when two files
    /// map to the same slug the same one is kept on every run. Documents that
    /// cannot be read as UTF-8 text, and slug duplicates, are recorded in
    /// [`ContentIndex::skipped`].
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Read` if a directory cannot be read.
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self, ContentError> {
        let mut index = Self {
            root: root.into(),
            ..Self::default()
        };

        if index.root.is_dir() {
            let root = index.root.clone();
            index.scan_directory(&root, "")?;
        } else {
            tracing::debug!(root = %index.root.display(), "Content directory does not exist");
        }

        tracing::debug!(
            root = %index.root.display(),
            documents = index.documents.len(),
            "Scanned content"
        );
        Ok(index)
    }

    fn scan_directory(&mut self, dir: &Path, url_prefix: &str) -> Result<(), ContentError> {
        let entries = fs::read_dir(dir).map_err(|source| ContentError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut entries = entries
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| ContentError::Read {
                path: dir.to_path_buf(),
                source,
            })?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                let child_prefix = join_slug(url_prefix, &slugify(&name));
                self.scan_directory(&path, &child_prefix)?;
            } else if let Some(stem) = document_stem(&path) {
                self.add_document(path, url_prefix, &stem);
            }
        }

        Ok(())
    }

    fn add_document(&mut self, path: PathBuf, url_prefix: &str, stem: &str) {
        let slug = if stem.eq_ignore_ascii_case("index") {
            url_prefix.to_owned()
        } else {
            join_slug(url_prefix, &slugify(stem))
        };

        if let Some(existing) = self.documents.get(&slug) {
            tracing::warn!(
                slug = %slug,
                kept = %existing.path.display(),
                ignored = %path.display(),
                "Two documents share a slug"
            );
            let reason = format!("slug {slug:?} already used by {}", existing.path.display());
            self.skipped.push(SkippedDocument { path, reason });
            return;
        }

        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "Skipping unreadable document"
                );
                let reason = format!("cannot be read: {err}");
                self.skipped.push(SkippedDocument { path, reason });
                return;
            }
        };

        let (title, frontmatter_error) = match parse_frontmatter(&source) {
            Ok(frontmatter) => (frontmatter.and_then(|fm| fm.title), None),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Malformed frontmatter");
                (None, Some(err.to_string()))
            }
        };

        self.documents.insert(
            slug.clone(),
            Document {
                slug,
                path,
                title,
                frontmatter_error,
            },
        );
    }

    /// Content directory this index was built from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the index has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by slug. Surrounding slashes are ignored.
    pub fn get(&self, slug: &str) -> Option<&Document> {
        self.documents.get(slug.trim_matches('/'))
    }

    /// Whether a document with this slug exists.
    pub fn contains(&self, slug: &str) -> bool {
        self.get(slug).is_some()
    }

    /// Documents at or below `directory`, in slug order.
    pub fn documents_in<'a>(
        &'a self,
        directory: &str,
    ) -> impl Iterator<Item = &'a Document> + use<'a> {
        let directory = directory.trim_matches('/').to_owned();
        self.documents.values().filter(move |doc| {
            directory.is_empty()
                || doc.slug == directory
                || doc
                    .slug
                    .strip_prefix(&directory)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// All documents, in slug order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    /// Document files left out of the index, in walk order.
    pub fn skipped(&self) -> &[SkippedDocument] {
        &self.skipped
    }
}

/// File stem for a document file, `None` for any other file.
fn document_stem(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    if !DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    Some(path.file_stem()?.to_string_lossy().into_owned())
}

/// Slug form of a single path segment: lower case, spaces as dashes.
fn slugify(segment: &str) -> String {
    segment.trim().to_lowercase().replace(' ', "-")
}

fn join_slug(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}/{segment}")
    }
}
