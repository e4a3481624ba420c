//! Markdown post-processing transforms handed to the site generator.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// `[markdown]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Transforms applied to rendered markdown, in order.
    #[serde(default)]
    pub rehype_plugins: Vec<RehypePlugin>,
}

/// A rehype transform and its options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case", deny_unknown_fields)]
pub enum RehypePlugin {
    /// Rewrites relative `.md` links so they resolve under the site base path.
    RelativeMarkdownLinks {
        /// Base path the rewritten links are prefixed with. Inherits the site
        /// `base` when unset.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        base: Option<String>,
        /// Also resolve links relative to the content collection root.
        #[serde(default)]
        collection_base: bool,
    },
}

impl RehypePlugin {
    /// npm package the generator loads for this transform.
    pub fn package(&self) -> &'static str {
        match self {
            Self::RelativeMarkdownLinks { .. } => "astro-rehype-relative-markdown-links",
        }
    }

    /// Base path this transform uses, falling back to `site_base`.
    pub fn effective_base<'a>(&'a self, site_base: &'a str) -> &'a str {
        match self {
            Self::RelativeMarkdownLinks { base, .. } => base.as_deref().unwrap_or(site_base),
        }
    }

    /// Check that an explicit base agrees with the site base.
    pub(crate) fn validate(&self, site_base: &str, path: &str) -> Result<(), ConfigError> {
        match self {
            Self::RelativeMarkdownLinks {
                base: Some(base), ..
            } if !same_base(base, site_base) => Err(ConfigError::Validation(format!(
                "{path}.base ({base:?}) must match base ({site_base:?})"
            ))),
            Self::RelativeMarkdownLinks { .. } => Ok(()),
        }
    }

    /// Replace an explicit base, leaving inherited bases alone.
    pub(crate) fn rebase(&mut self, new_base: &str) {
        match self {
            Self::RelativeMarkdownLinks { base, .. } => {
                if let Some(base) = base.as_mut() {
                    new_base.clone_into(base);
                }
            }
        }
    }

    pub(crate) fn base_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::RelativeMarkdownLinks { base, .. } => base.as_mut(),
        }
    }
}

/// Base path without surrounding slashes. `"/"` and `""` both normalize to `""`.
pub fn normalize_base(base: &str) -> &str {
    base.trim_matches('/')
}

/// Whether two base paths produce the same URLs.
pub fn same_base(a: &str, b: &str) -> bool {
    normalize_base(a) == normalize_base(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn links(base: Option<&str>) -> RehypePlugin {
        RehypePlugin::RelativeMarkdownLinks {
            base: base.map(str::to_owned),
            collection_base: false,
        }
    }

    #[test]
    fn test_parse_relative_links_plugin() {
        let toml = r#"
[[rehype_plugins]]
plugin = "relative-markdown-links"
base = "rs-arcade-coder"
collection_base = true
"#;
        let config: MarkdownConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.rehype_plugins,
            vec![RehypePlugin::RelativeMarkdownLinks {
                base: Some("rs-arcade-coder".to_owned()),
                collection_base: true,
            }]
        );
    }

    #[test]
    fn test_parse_defaults() {
        let toml = r#"
[[rehype_plugins]]
plugin = "relative-markdown-links"
"#;
        let config: MarkdownConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.rehype_plugins, vec![links(None)]);
    }

    #[test]
    fn test_parse_unknown_plugin_fails() {
        let toml = r#"
[[rehype_plugins]]
plugin = "rehype-katex"
"#;
        assert!(toml::from_str::<MarkdownConfig>(toml).is_err());
    }

    #[test]
    fn test_parse_unknown_option_fails() {
        let toml = r#"
[[rehype_plugins]]
plugin = "relative-markdown-links"
collectionBase = true
"#;
        let err = toml::from_str::<MarkdownConfig>(toml).unwrap_err();
        assert!(err.to_string().contains("collectionBase"), "{err}");
    }

    #[test]
    fn test_package_name() {
        assert_eq!(links(None).package(), "astro-rehype-relative-markdown-links");
    }

    #[test]
    fn test_effective_base() {
        assert_eq!(links(None).effective_base("rs-arcade-coder"), "rs-arcade-coder");
        assert_eq!(links(Some("other")).effective_base("rs-arcade-coder"), "other");
    }

    #[test]
    fn test_same_base_ignores_slashes() {
        assert!(same_base("rs-arcade-coder", "/rs-arcade-coder/"));
        assert!(same_base("/", ""));
        assert!(!same_base("rs-arcade-coder", "arcade-coder"));
    }

    #[test]
    fn test_validate_matching_base() {
        links(Some("/rs-arcade-coder"))
            .validate("rs-arcade-coder", "markdown.rehype_plugins[0]")
            .unwrap();
        links(None).validate("rs-arcade-coder", "markdown.rehype_plugins[0]").unwrap();
    }

    #[test]
    fn test_validate_mismatched_base() {
        let err = links(Some("docs"))
            .validate("rs-arcade-coder", "markdown.rehype_plugins[0]")
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("markdown.rehype_plugins[0].base"));
        assert!(msg.contains("rs-arcade-coder"));
    }

    #[test]
    fn test_rebase_only_touches_explicit_base() {
        let mut explicit = links(Some("rs-arcade-coder"));
        explicit.rebase("preview");
        assert_eq!(explicit, links(Some("preview")));

        let mut inherited = links(None);
        inherited.rebase("preview");
        assert_eq!(inherited, links(None));
    }
}
