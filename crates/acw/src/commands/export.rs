//! `acw export` command implementation.

use std::path::PathBuf;

use acw_config::{CliSettings, Config, SiteConfig};
use clap::{Args, ValueEnum};

use crate::error::CliError;
use crate::output::Output;

/// Output format for `acw export`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Options object for the site generator (camelCase JSON).
    #[default]
    Json,
    /// Normalized `acw.toml`.
    Toml,
}

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to configuration file (default: auto-discover acw.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Canonical site URL (overrides config).
    #[arg(long, env = "ACW_SITE")]
    site: Option<String>,

    /// Base path (overrides config and explicit transform bases).
    #[arg(long, env = "ACW_BASE")]
    base: Option<String>,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails to load or validate, or
    /// the output cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            site: self.site,
            base: self.base,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let rendered = render(&config.site, self.format)?;

        match self.output {
            Some(path) => {
                std::fs::write(&path, &rendered)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.data(&rendered)?,
        }
        Ok(())
    }
}

/// Serialize the configuration in the requested format.
pub(crate) fn render(site: &SiteConfig, format: Format) -> Result<String, CliError> {
    let rendered = match format {
        Format::Json => site.to_generator_json()?,
        Format::Toml => site.to_toml_string()?,
    };
    Ok(rendered)
}
