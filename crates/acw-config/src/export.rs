//! Export to the site generator's option schema.
//!
//! The generator reads a JSON object shaped like its own `defineConfig`
//! argument: camelCase keys, the documentation theme registered under
//! `integrations`, and rehype transforms as `[package, options]` pairs.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::markdown::RehypePlugin;
use crate::sidebar::SidebarEntry;
use crate::{ConfigError, SiteConfig};

/// Name under which the documentation theme is registered.
const THEME_INTEGRATION: &str = "starlight";

/// Borrowed view of a [`SiteConfig`] in the generator's schema.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig<'a> {
    pub site: &'a str,
    pub base: &'a str,
    pub integrations: Vec<Integration<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<GeneratorMarkdown<'a>>,
}

/// A registered generator integration.
#[derive(Debug, Serialize)]
pub struct Integration<'a> {
    pub name: &'static str,
    pub options: ThemeOptions<'a>,
}

/// Options of the documentation theme integration.
#[derive(Debug, Serialize)]
pub struct ThemeOptions<'a> {
    pub title: &'a str,
    #[serde(skip_serializing_if = "no_social")]
    pub social: &'a BTreeMap<String, String>,
    pub sidebar: &'a [SidebarEntry],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorMarkdown<'a> {
    pub rehype_plugins: Vec<(&'static str, RehypeOptions<'a>)>,
}

/// Options object of a rehype transform.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RehypeOptions<'a> {
    pub base: &'a str,
    pub collection_base: bool,
}

impl<'a> GeneratorConfig<'a> {
    /// Build the generator view. Transforms without an explicit base are
    /// given the site base.
    pub fn new(config: &'a SiteConfig) -> Self {
        let markdown = config
            .markdown
            .as_ref()
            .filter(|markdown| !markdown.rehype_plugins.is_empty())
            .map(|markdown| GeneratorMarkdown {
                rehype_plugins: markdown
                    .rehype_plugins
                    .iter()
                    .map(|plugin| rehype_pair(plugin, &config.base))
                    .collect(),
            });

        Self {
            site: &config.site,
            base: &config.base,
            integrations: vec![Integration {
                name: THEME_INTEGRATION,
                options: ThemeOptions {
                    title: &config.docs.title,
                    social: &config.docs.social,
                    sidebar: &config.docs.sidebar,
                },
            }],
            markdown,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn no_social(social: &&BTreeMap<String, String>) -> bool {
    social.is_empty()
}

fn rehype_pair<'a>(
    plugin: &'a RehypePlugin,
    site_base: &'a str,
) -> (&'static str, RehypeOptions<'a>) {
    let options = match plugin {
        RehypePlugin::RelativeMarkdownLinks {
            collection_base, ..
        } => RehypeOptions {
            base: plugin.effective_base(site_base),
            collection_base: *collection_base,
        },
    };
    (plugin.package(), options)
}
