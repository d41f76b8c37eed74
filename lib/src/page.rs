//! Content documents for the site generator: a TOML front matter block
//! fenced by `+++` lines, followed by the page body.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use toml::value::Datetime;

use crate::error::Result;
use crate::format::{Format, Toml};
use crate::theme::Theme;

const FENCE: &str = "+++\n";

/// Front matter of a theme's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePage {
    pub title: String,
    pub description: String,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Datetime>,
    pub extra: ThemeExtra,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeExtra {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Datetime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Datetime>,
    pub repository: String,
    pub homepage: String,
    pub minimum_version: String,
    pub license: String,
    pub demo: String,
    pub author: PageAuthor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageAuthor {
    pub name: String,
    pub homepage: String,
}

/// Front matter of the section page listing every theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionPage {
    pub template: String,
    pub sort_by: String,
}

fn datetime(date: Option<DateTime<FixedOffset>>) -> Option<Datetime> {
    date?.to_rfc3339().parse().ok()
}

impl ThemePage {
    pub fn new(theme: &Theme, template: &str) -> Self {
        let metadata = &theme.metadata;
        let updated = datetime(theme.history.updated);

        ThemePage {
            title: metadata.name.clone(),
            description: metadata.description.clone(),
            template: template.into(),
            date: updated.clone(),
            extra: ThemeExtra {
                created: datetime(theme.history.created),
                updated,
                repository: theme.repository.clone().unwrap_or_default(),
                homepage: metadata.homepage.clone(),
                minimum_version: metadata.minimum_version.clone(),
                license: metadata.license.clone(),
                demo: metadata.demo.clone().unwrap_or_default(),
                author: PageAuthor {
                    name: metadata.author.name.clone(),
                    homepage: metadata.author.homepage.clone(),
                },
            },
        }
    }
}

/// Renders `front_matter` as a fenced TOML block, then a blank line, then
/// `body`.
///
/// Multi-line string values are emitted verbatim, so a value with a line that
/// is exactly `+++` would end the block early. Such values are rejected.
pub fn render<T: Serialize>(front_matter: &T, body: &str) -> Result<String> {
    let toml = Toml::to_string(front_matter)?;
    if let Some(line) = toml.lines().position(|line| line == FENCE.trim_end()) {
        return err! {
            "front matter value contains a `+++` fence line",
            "front matter line" => line + 1,
        };
    }

    let mut output = String::with_capacity(toml.len() + body.len() + 2 * FENCE.len() + 1);
    output.push_str(FENCE);
    output.push_str(&toml);
    output.push_str(FENCE);
    output.push('\n');
    output.push_str(body);
    Ok(output)
}

/// Splits a rendered document into its front matter and body. Returns
/// `None` if `input` doesn't start with a front matter block.
pub fn split_front_matter(input: &str) -> Option<(&str, &str)> {
    const SUFFIX: &str = "\n+++\n";

    let rest = input.strip_prefix(FENCE)?;
    let (front_matter, body) = match rest.strip_prefix(FENCE) {
        Some(body) => ("", body),
        None => rest.split_once(SUFFIX)?,
    };

    Some((front_matter, body.strip_prefix('\n').unwrap_or(body)))
}

/// Parses the front matter of a rendered document.
pub fn parse<'a, T: serde::de::DeserializeOwned>(input: &'a str) -> Result<(T, &'a str)> {
    let (front_matter, body) = match split_front_matter(input) {
        Some(parts) => parts,
        None => return err!("document has no front matter"),
    };

    Ok((Toml::from_str(front_matter)?, body))
}

impl Theme {
    /// The complete content document for this theme's page.
    pub fn to_content(&self, template: &str) -> Result<String> {
        render(&ThemePage::new(self, template), &self.readme)
    }
}
