use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{Chainable, Result};
use crate::page::{self, SectionPage};
use crate::theme::Theme;
use crate::util::{slugify, Sink};
use crate::vcs::{Git, Vcs};
use crate::{PAGE_FILE, SCREENSHOT_FILE, SECTION_FILE};

/// Generates gallery content for every theme directory under `root`.
#[derive(Debug)]
pub struct Gallery<V: Vcs = Git> {
    pub root: PathBuf,
    pub settings: Settings,
    pub vcs: V,
}

/// The outcome of scanning the source root.
#[derive(Debug, Default)]
pub struct Discovery {
    pub themes: Vec<Theme>,
    /// Candidate directories without a screenshot.
    pub skipped: Vec<String>,
}

impl Gallery<Git> {
    /// A gallery over `root`, configured by its optional `gallery.toml`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        let settings = Settings::discover(&root)?;
        Ok(Gallery::with_vcs(root, settings, Git::default()))
    }
}

impl<V: Vcs> Gallery<V> {
    pub fn with_vcs<P: Into<PathBuf>>(root: P, settings: Settings, vcs: V) -> Self {
        Gallery { root: root.into(), settings, vcs }
    }

    /// Directories under the root that may hold a theme, sorted by name.
    pub fn candidates(&self) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(&self.root).chain_with(|| error! {
            "failed to read theme directory",
            "path" => self.root.display(),
        })?;

        let mut candidates = vec![];
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %path.display(), "skipping non UTF-8 directory name");
                continue;
            };

            if self.settings.is_excluded(&name) || !path.is_dir() {
                continue;
            }

            candidates.push((name, path));
        }

        candidates.sort();
        Ok(candidates)
    }

    /// Loads every candidate theme. Candidates without a screenshot are
    /// skipped; any other failure aborts discovery.
    pub fn discover(&self) -> Result<Discovery> {
        let mut discovery = Discovery::default();
        for (name, path) in self.candidates()? {
            if !Theme::has_screenshot(&path) {
                tracing::warn!(theme = %name, "missing {SCREENSHOT_FILE}, skipping");
                discovery.skipped.push(name);
                continue;
            }

            let slug = slugify(&name);
            if slug != name {
                tracing::info!(theme = %name, %slug, "directory name is not a slug; page path keeps it verbatim");
            }

            let theme = Theme::load(name, path, &self.vcs)?;
            discovery.themes.push(theme);
        }

        Ok(discovery)
    }

    /// Replaces `output` with the section page and one page directory per
    /// theme.
    pub fn render(&self, themes: &[Theme], output: &Path) -> Result<()> {
        if output.exists() {
            fs::remove_dir_all(output).chain_with(|| error! {
                "failed to clear output directory",
                "path" => output.display(),
            })?;
        }

        fs::create_dir_all(output).chain_with(|| error! {
            "failed to create output directory",
            "path" => output.display(),
        })?;

        let section = SectionPage {
            template: self.settings.section_template.clone(),
            sort_by: self.settings.sort_by.clone(),
        };

        output.join(SECTION_FILE).write(page::render(&section, "")?)?;
        for theme in themes {
            let dir = output.join(&theme.name);
            fs::create_dir(&dir).chain_with(|| error! {
                "failed to create theme page directory",
                "path" => dir.display(),
            })?;

            dir.join(PAGE_FILE).write(theme.to_content(&self.settings.page_template)?)?;
            dir.join(SCREENSHOT_FILE).copy_from(theme.screenshot())?;
        }

        Ok(())
    }

    /// Discovers every theme, then regenerates `output`. Nothing is written
    /// if discovery fails.
    pub fn run<P: AsRef<Path>>(&self, output: P) -> Result<Discovery> {
        let discovery = self.discover()?;
        self.render(&discovery.themes, output.as_ref())?;
        Ok(discovery)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::page::ThemePage;
    use crate::theme::tests::{write_theme, FixedVcs};
    use crate::{METADATA_FILE, SCREENSHOT_FILE};

    fn gallery(root: &Path) -> Gallery<FixedVcs> {
        Gallery::with_vcs(root, Settings::default(), FixedVcs::dated())
    }

    fn listing(dir: &Path) -> BTreeSet<String> {
        fs::read_dir(dir).unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    /// Collects formatted log output for inspection.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn capture<T>(&self, f: impl FnOnce() -> T) -> T {
            let buffer = self.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(move || buffer.clone())
                .with_ansi(false)
                .finish();

            tracing::subscriber::with_default(subscriber, f)
        }

        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn candidates_skip_hidden_reserved_and_files() {
        let root = tempfile::tempdir().unwrap();
        for dir in ["zenburn", "abridge", ".git", "env", "themes"] {
            fs::create_dir(root.path().join(dir)).unwrap();
        }

        fs::write(root.path().join("README.md"), "# Themes").unwrap();
        let names: Vec<_> = gallery(root.path()).candidates().unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(names, ["abridge", "zenburn"]);
    }

    #[test]
    fn generates_gallery() {
        let root = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let output = output.path().join("content/themes");

        write_theme(root.path(), "hyde");
        write_theme(root.path(), "after-dark");
        let broken = write_theme(root.path(), "broken");
        fs::remove_file(broken.join(SCREENSHOT_FILE)).unwrap();

        let logs = LogBuffer::default();
        let discovery = logs.capture(|| gallery(root.path()).run(&output)).unwrap();
        assert_eq!(discovery.skipped, ["broken"]);

        let warning = logs.contents().lines()
            .find(|line| line.contains("missing screenshot.png, skipping"))
            .map(str::to_string);

        let warning = warning.expect("no warning logged for the skipped theme");
        assert!(warning.contains("WARN"), "{warning}");
        assert!(warning.contains("theme=broken"), "{warning}");
        assert_eq!(discovery.themes.len(), 2);

        assert_eq!(listing(&output), set(&["_index.md", "after-dark", "hyde"]));
        assert_eq!(listing(&output.join("hyde")), set(&["index.md", "screenshot.png"]));

        let section = fs::read_to_string(output.join("_index.md")).unwrap();
        assert_eq!(section, "+++\ntemplate = \"themes.html\"\nsort_by = \"date\"\n+++\n\n");

        let content = fs::read_to_string(output.join("hyde/index.md")).unwrap();
        let (page, body): (ThemePage, _) = page::parse(&content).unwrap();
        assert_eq!(page.title, "hyde");
        assert_eq!(page.template, "theme.html");
        assert_eq!(page.extra.repository, "https://github.com/org/theme");
        assert!(body.contains("{{/* config.title */}}"));

        let screenshot = fs::read(output.join("after-dark/screenshot.png")).unwrap();
        assert_eq!(screenshot, fs::read(root.path().join("after-dark/screenshot.png")).unwrap());
    }

    #[test]
    fn reruns_replace_previous_output() {
        let root = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let output = output.path().join("themes");

        write_theme(root.path(), "hyde");
        let removed = write_theme(root.path(), "removed");
        gallery(root.path()).run(&output).unwrap();
        fs::write(output.join("hyde/stale.txt"), "stale").unwrap();
        assert_eq!(listing(&output), set(&["_index.md", "hyde", "removed"]));

        fs::remove_dir_all(removed).unwrap();
        gallery(root.path()).run(&output).unwrap();
        assert_eq!(listing(&output), set(&["_index.md", "hyde"]));
        assert_eq!(listing(&output.join("hyde")), set(&["index.md", "screenshot.png"]));
    }

    #[test]
    fn metadata_failure_aborts_without_touching_output() {
        let root = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let output = output.path().join("themes");

        write_theme(root.path(), "hyde");
        gallery(root.path()).run(&output).unwrap();

        let bad = write_theme(root.path(), "bad");
        fs::write(bad.join(METADATA_FILE), "name = \"bad\"").unwrap();
        let error = gallery(root.path()).run(&output).unwrap_err();
        assert_eq!(error.message(), "invalid theme metadata");
        assert_eq!(listing(&output), set(&["_index.md", "hyde"]));
    }

    #[test]
    fn custom_settings() {
        let root = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        write_theme(root.path(), "hyde");
        write_theme(root.path(), "drafts");
        let mut settings = Settings::default();
        settings.exclude.insert("drafts".into());
        settings.page_template = "gallery/theme.html".into();

        let gallery = Gallery::with_vcs(root.path(), settings, FixedVcs::default());
        let discovery = gallery.run(output.path()).unwrap();
        assert_eq!(discovery.themes.len(), 1);

        let content = fs::read_to_string(output.path().join("hyde/index.md")).unwrap();
        assert!(content.contains("template = \"gallery/theme.html\"\n"));
    }
}
