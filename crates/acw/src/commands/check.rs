//! `acw check` command implementation.

use std::path::PathBuf;

use acw_config::{CliSettings, Config};
use acw_content::{ContentIndex, Diagnostic, check_frontmatter, check_sidebar, check_skipped};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover acw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Canonical site URL (overrides config).
    #[arg(long, env = "ACW_SITE")]
    site: Option<String>,

    /// Base path (overrides config and explicit transform bases).
    #[arg(long, env = "ACW_BASE")]
    base: Option<String>,

    /// Fail on warnings as well as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the content directory
    /// cannot be read, or any check fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            site: self.site,
            base: self.base,
            content_dir: self.content_dir,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.heading(&config.site.docs.title);
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        output.info(&format!("Site: {}", config.site.canonical_url()));
        output.info(&format!(
            "Content directory: {}",
            config.docs_resolved.content_dir.display()
        ));

        let (documents, diagnostics) = run_checks(&config)?;
        output.info(&format!("Documents: {documents}"));

        for diagnostic in &diagnostics {
            output.diagnostic(diagnostic);
        }

        let failures = count_failures(&diagnostics, self.strict);
        if failures > 0 {
            return Err(CliError::CheckFailed(failures));
        }

        output.success("Configuration OK");
        Ok(())
    }
}

/// Scan the content directory and run every check.
///
/// Returns the number of documents found and the diagnostics: sidebar first,
/// then skipped files, then frontmatter.
pub(crate) fn run_checks(config: &Config) -> Result<(usize, Vec<Diagnostic>), CliError> {
    let index = ContentIndex::scan(&config.docs_resolved.content_dir)?;
    if index.is_empty() {
        tracing::warn!(
            content_dir = %index.root().display(),
            "No documents found"
        );
    }

    let mut diagnostics = check_sidebar(&config.site.docs.sidebar, &index);
    diagnostics.extend(check_skipped(&index));
    diagnostics.extend(check_frontmatter(&index));
    Ok((index.len(), diagnostics))
}

/// Number of diagnostics that fail the check.
fn count_failures(diagnostics: &[Diagnostic], strict: bool) -> usize {
    diagnostics
        .iter()
        .filter(|d| strict || d.is_error())
        .count()
}
