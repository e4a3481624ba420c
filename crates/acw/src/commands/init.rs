//! `acw init` command implementation.

use std::fs;
use std::path::{Path, PathBuf};

use acw_config::{CONFIG_FILENAME, STARTER_CONFIG};
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Pages referenced by the starter sidebar, relative to the project directory.
const STARTER_PAGES: [(&str, &str); 3] = [
    (
        "src/content/docs/index.md",
        "---\ntitle: My Wiki\n---\n\nWelcome to the wiki.\n",
    ),
    (
        "src/content/docs/guides/getting-started.md",
        "---\ntitle: Getting Started\n---\n\nSee the [reference](../reference/configuration.md).\n",
    ),
    (
        "src/content/docs/reference/configuration.md",
        "---\ntitle: Configuration\n---\n\nSite options live in `acw.toml`.\n",
    ),
];

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Project directory.
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Overwrite an existing acw.toml.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let created = init_project(&self.dir, self.force)?;
        for path in &created {
            output.info(&format!("Created {}", path.display()));
        }
        output.success("Run 'acw check' to validate the configuration.");
        Ok(())
    }
}

/// Write the starter config and any missing starter pages into `dir`.
///
/// Existing pages are never overwritten; an existing config only with `force`.
/// Returns the files written.
fn init_project(dir: &Path, force: bool) -> Result<Vec<PathBuf>, CliError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if config_path.exists() && !force {
        return Err(CliError::Validation(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    fs::create_dir_all(dir)?;
    fs::write(&config_path, STARTER_CONFIG)?;
    tracing::info!(path = %config_path.display(), "Wrote starter configuration");
    let mut created = vec![config_path];

    for (rel, content) in STARTER_PAGES {
        let path = dir.join(rel);
        if path.exists() {
            tracing::debug!(path = %path.display(), "Keeping existing page");
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        created.push(path);
    }

    Ok(created)
}
