use std::path::Path;

use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::error::Result;
use crate::format::{Format, Toml};
use crate::CONFIG_FILE;

/// Directory names never treated as themes: a local virtualenv and the
/// conventional output directory.
pub const RESERVED_NAMES: &[&str] = &["env", "themes"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory names to skip in addition to [`RESERVED_NAMES`].
    pub exclude: FxHashSet<String>,
    /// Template of the section page listing all themes.
    pub section_template: String,
    /// Template of each theme's page.
    pub page_template: String,
    pub sort_by: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            exclude: RESERVED_NAMES.iter().map(|s| s.to_string()).collect(),
            section_template: "themes.html".into(),
            page_template: "theme.html".into(),
            sort_by: "date".into(),
        }
    }
}

impl Settings {
    /// Reads [`CONFIG_FILE`] from `root` if it exists, falling back to the
    /// defaults. Reserved names are always excluded.
    pub fn discover<P: AsRef<Path>>(root: P) -> Result<Self> {
        let path = root.as_ref().join(CONFIG_FILE);
        let mut settings = if path.is_file() {
            Toml::read(&path)?
        } else {
            Settings::default()
        };

        settings.exclude.extend(RESERVED_NAMES.iter().map(|s| s.to_string()));
        Ok(settings)
    }

    /// Whether a directory entry named `name` can't be a theme.
    pub fn is_excluded(&self, name: &str) -> bool {
        name.starts_with('.') || self.exclude.contains(name)
    }
}
