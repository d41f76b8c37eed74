use serde::Deserialize;

/// The contents of a theme's `theme.toml`. Keys not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeMetadata {
    /// The theme's display name, used as the page title.
    pub name: String,
    pub description: String,
    pub homepage: String,
    /// Oldest site generator version the theme supports.
    #[serde(alias = "min_version")]
    pub minimum_version: String,
    pub license: String,
    /// A live demo of the theme, if one exists.
    #[serde(default)]
    pub demo: Option<String>,
    pub author: Author,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Author {
    pub name: String,
    pub homepage: String,
}
