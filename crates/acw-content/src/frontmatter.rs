//! YAML frontmatter parsing for content documents.

use serde::Deserialize;

/// Frontmatter fields the documentation theme reads.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Frontmatter {
    pub title: Option<String>,
}

/// Parse the frontmatter block at the start of a document.
///
/// The block must open on the first line with `---` and close with a line
/// holding only `---`. Returns `Ok(None)` when there is no block; an empty
/// block yields the default (untitled) frontmatter.
///
/// # Errors
///
/// Returns the YAML error when the block is not a valid mapping.
pub(crate) fn parse_frontmatter(source: &str) -> Result<Option<Frontmatter>, serde_yaml::Error> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return Ok(None);
    };

    let mut yaml_len = None;
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            yaml_len = Some(offset);
            break;
        }
        offset += line.len();
    }

    let Some(yaml_len) = yaml_len else {
        return Ok(None);
    };
    let yaml = rest[..yaml_len].trim();
    if yaml.is_empty() {
        return Ok(Some(Frontmatter::default()));
    }
    serde_yaml::from_str(yaml).map(Some)
}
