//! Site configuration for the Arcade Coder wiki.
//!
//! Parses `acw.toml` with serde into a [`SiteConfig`]: the options object the
//! static-site generator and its documentation theme consume at build time.
//! Config files are auto-discovered in parent directories, and CLI settings can
//! be applied during load via [`CliSettings`].
//!
//! ```toml
//! site = "https://jake-walker.github.io"
//! base = "rs-arcade-coder"
//!
//! [docs]
//! title = "Arcade Coder Wiki"
//!
//! [docs.social]
//! github = "https://github.com/jake-walker/arcade-coder-wiki"
//!
//! [[docs.sidebar]]
//! label = "Links"
//! link = "links"
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site`
//! - `base`
//! - `docs.title`
//! - `docs.social.*`
//! - `markdown.rehype_plugins[*].base`

mod expand;
mod export;
mod markdown;
mod sidebar;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use export::{GeneratorConfig, GeneratorMarkdown, Integration, RehypeOptions, ThemeOptions};
pub use markdown::{MarkdownConfig, RehypePlugin, normalize_base, same_base};
pub use sidebar::{Autogenerate, SidebarEntry, SidebarItem, SidebarKind, is_external_link};

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "acw.toml";

/// Content directory used when `docs.content_dir` is not set.
const DEFAULT_CONTENT_DIR: &str = "src/content/docs";

/// Commented starter configuration written by `acw init`.
pub const STARTER_CONFIG: &str = include_str!("starter.toml");

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the canonical site URL.
    pub site: Option<String>,
    /// Override the base path. Explicit transform bases follow it.
    pub base: Option<String>,
    /// Override the site title.
    pub title: Option<String>,
    /// Override the content directory.
    pub content_dir: Option<PathBuf>,
}

/// Declarative site configuration, as written in `acw.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Canonical public URL of the deployed site.
    pub site: String,
    /// URL path prefix under which all pages are served.
    pub base: String,
    /// Documentation theme options.
    pub docs: DocsSection,
    /// Markdown post-processing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<MarkdownConfig>,
}

/// `[docs]` section: documentation theme options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsSection {
    /// Title shown in the site header.
    pub title: String,
    /// Markdown source directory, relative to the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_dir: Option<String>,
    /// Platform name to profile URL, e.g. `github`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub social: BTreeMap<String, String>,
    /// Navigation sidebar, in display order.
    #[serde(default)]
    pub sidebar: Vec<SidebarEntry>,
}

/// Loaded configuration: the declarative record plus resolved paths.
#[derive(Debug)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Resolved docs configuration.
    pub docs_resolved: DocsConfig,
    /// Path to the config file.
    pub config_path: Option<PathBuf>,
}

/// Resolved documentation paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Directory holding the markdown documents.
    pub content_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML serialization error.
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// JSON serialization error.
    #[error("JSON serialize error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.title`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl SiteConfig {
    /// Parse a configuration from TOML text without expanding or validating it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize back to `acw.toml` form.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize in the site generator's option schema.
    pub fn to_generator_json(&self) -> Result<String, ConfigError> {
        GeneratorConfig::new(self).to_json()
    }

    /// Public URL of the site root, e.g.
    /// `https://jake-walker.github.io/rs-arcade-coder/`.
    pub fn canonical_url(&self) -> String {
        let site = self.site.trim_end_matches('/');
        match normalize_base(&self.base) {
            "" => format!("{site}/"),
            base => format!("{site}/{base}/"),
        }
    }

    /// Rehype transforms, empty when no `[markdown]` section is present.
    pub fn rehype_plugins(&self) -> &[RehypePlugin] {
        self.markdown
            .as_ref()
            .map(|markdown| markdown.rehype_plugins.as_slice())
            .unwrap_or_default()
    }

    /// Validate configuration values.
    ///
    /// Called automatically by [`Config::load`] after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` describing the first failing field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_identity()?;
        self.validate_docs()?;
        self.validate_markdown()?;
        Ok(())
    }

    fn validate_identity(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site, "site")?;
        require_http_url(&self.site, "site")?;
        require_non_empty(&self.base, "base")?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.docs.title, "docs.title")?;

        for (platform, url) in &self.docs.social {
            require_non_empty(platform, "docs.social key")?;
            let field = format!("docs.social.{platform}");
            require_non_empty(url, &field)?;
            require_http_url(url, &field)?;
        }

        for (i, entry) in self.docs.sidebar.iter().enumerate() {
            entry.validate(&format!("docs.sidebar[{i}]"))?;
        }

        Ok(())
    }

    /// Site and transform base paths must agree or every rewritten link breaks.
    fn validate_markdown(&self) -> Result<(), ConfigError> {
        for (i, plugin) in self.rehype_plugins().iter().enumerate() {
            plugin.validate(&self.base, &format!("markdown.rehype_plugins[{i}]"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_in_place(&mut self.site, "site")?;
        expand::expand_in_place(&mut self.base, "base")?;
        expand::expand_in_place(&mut self.docs.title, "docs.title")?;

        for (platform, url) in &mut self.docs.social {
            expand::expand_in_place(url, &format!("docs.social.{platform}"))?;
        }

        if let Some(markdown) = self.markdown.as_mut() {
            for (i, plugin) in markdown.rehype_plugins.iter_mut().enumerate() {
                if let Some(base) = plugin.base_mut() {
                    expand::expand_in_place(base, &format!("markdown.rehype_plugins[{i}].base"))?;
                }
            }
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `acw.toml` in current directory and parents.
    ///
    /// Environment variables are expanded first, then paths are resolved
    /// against the config file's directory, then CLI settings are applied, and
    /// finally the result is validated.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no config file exists, or the first
    /// parse, expansion or validation error.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => {
                let cwd = std::env::current_dir()?;
                Self::discover_from(&cwd)
                    .ok_or_else(|| ConfigError::NotFound(cwd.join(CONFIG_FILENAME)))?
            }
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let mut config = Self::load_from_file(&path)?;

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.site.validate()?;
        Ok(config)
    }

    /// Wrap an in-memory site configuration, resolving paths against `config_dir`.
    pub fn from_site(site: SiteConfig, config_dir: &Path) -> Self {
        let docs_resolved = DocsConfig {
            content_dir: config_dir.join(
                site.docs
                    .content_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_CONTENT_DIR),
            ),
        };
        Self {
            site,
            docs_resolved,
            config_path: None,
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(site) = &settings.site {
            self.site.site.clone_from(site);
        }
        if let Some(base) = &settings.base {
            self.site.base.clone_from(base);
            if let Some(markdown) = self.site.markdown.as_mut() {
                for plugin in &mut markdown.rehype_plugins {
                    plugin.rebase(base);
                }
            }
        }
        if let Some(title) = &settings.title {
            self.site.docs.title.clone_from(title);
        }
        if let Some(content_dir) = &settings.content_dir {
            self.docs_resolved.content_dir.clone_from(content_dir);
        }
    }

    /// Search for the config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading configuration");

        let content = std::fs::read_to_string(path)?;
        let mut site = SiteConfig::from_toml_str(&content)?;

        // Expand environment variables before path resolution
        site.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_site(site, config_dir);
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }
}
