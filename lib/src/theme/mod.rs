mod metadata;

pub use metadata::*;

use std::path::{Path, PathBuf};

use crate::error::{Chainable, Result};
use crate::format::{Format, Toml};
use crate::util::escape_template;
use crate::vcs::{History, Vcs};
use crate::{METADATA_FILE, README_FILE, SCREENSHOT_FILE};

/// Everything known about one theme directory.
#[derive(Debug, Clone)]
pub struct Theme {
    /// The theme directory's file name.
    pub name: String,
    pub path: PathBuf,
    pub metadata: ThemeMetadata,
    /// `README.md` with template delimiters escaped.
    pub readme: String,
    pub repository: Option<String>,
    pub history: History,
}

impl Theme {
    /// Loads the theme in `path`, reading its metadata and README and
    /// querying `vcs` for its origin and history.
    pub fn load<N, P, V>(name: N, path: P, vcs: &V) -> Result<Self>
        where N: Into<String>, P: Into<PathBuf>, V: Vcs + ?Sized
    {
        let (name, path) = (name.into(), path.into());
        tracing::info!(theme = %name, "loading theme");

        let metadata: ThemeMetadata = Toml::read(path.join(METADATA_FILE))
            .chain_with(|| error! {
                "invalid theme metadata",
                "theme" => &name,
            })?;

        let readme_path = path.join(README_FILE);
        let readme = std::fs::read_to_string(&readme_path).chain_with(|| error! {
            "failed to read theme README",
            "theme" => &name,
            "path" => readme_path.display(),
        })?;

        let readme = escape_template(&readme).into_owned();
        let repository = vcs.repository_url(&path);
        let history = vcs.history(&path);
        if history.updated.is_none() {
            tracing::warn!(theme = %name, "no commit history; dates will be omitted");
        }

        Ok(Theme { name, path, metadata, readme, repository, history })
    }

    pub fn screenshot(&self) -> PathBuf {
        self.path.join(SCREENSHOT_FILE)
    }

    /// Whether `dir` has the screenshot every theme must ship with.
    pub fn has_screenshot(dir: &Path) -> bool {
        dir.join(SCREENSHOT_FILE).exists()
    }
}
