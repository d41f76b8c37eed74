//! Builds static-site content pages for a gallery of themes.
//!
//! # Overview
//!
//! A _source root_ holds one directory per theme. Each theme directory
//! contains:
//!
//!   * `theme.toml`: the theme's name, description, homepage, license,
//!     minimum supported version, author, and an optional demo URL.
//!   * `README.md`: rendered as the body of the theme's page.
//!   * `screenshot.png`: copied next to the page. Directories without one are
//!     skipped.
//!
//! The theme's repository URL and its creation and last-update dates are read
//! from version control (see [`vcs`]).
//!
//! [`Gallery::run()`] turns the source root into an output tree consumable by
//! a static site generator:
//!
//! ```text
//! <output>/
//! ├── _index.md            section page: template + sort order
//! ├── <theme>/
//! │   ├── index.md         TOML front matter + escaped README
//! │   └── screenshot.png
//! └── ...
//! ```
//!
//! The output directory is deleted and regenerated on every run.

#[macro_use]
pub mod error;
pub mod util;
pub mod format;
pub mod vcs;
pub mod theme;
pub mod page;
pub mod config;
pub mod gallery;

pub use gallery::{Discovery, Gallery};
pub use theme::Theme;

pub const METADATA_FILE: &str = "theme.toml";
pub const README_FILE: &str = "README.md";
pub const SCREENSHOT_FILE: &str = "screenshot.png";
pub const CONFIG_FILE: &str = "gallery.toml";

pub const SECTION_FILE: &str = "_index.md";
pub const PAGE_FILE: &str = "index.md";
