//! Content index and sidebar checks for the Arcade Coder wiki.
//!
//! [`ContentIndex::scan`] walks the content directory and records every
//! markdown document by slug. [`check_sidebar`] and [`check_frontmatter`]
//! compare a loaded configuration against that index and return
//! [`Diagnostic`]s; they never fail.
//!
//! # Example
//!
//! ```no_run
//! use acw_config::Config;
//! use acw_content::{ContentIndex, check_sidebar};
//!
//! let config = Config::load(None, None)?;
//! let index = ContentIndex::scan(&config.docs_resolved.content_dir)?;
//! for diagnostic in check_sidebar(&config.site.docs.sidebar, &index) {
//!     eprintln!("{diagnostic}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod check;
mod frontmatter;
mod scanner;

use std::path::PathBuf;

pub use check::{Diagnostic, Severity, check_frontmatter, check_sidebar, check_skipped};
pub use scanner::{ContentIndex, Document, SkippedDocument};

/// Error reading the content directory.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// A directory under the content root could not be listed.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
