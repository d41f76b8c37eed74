//! Version-control queries for theme directories.
//!
//! Queries never fail: a client that can't be spawned, exits unsuccessfully,
//! or prints nothing useful yields "no data" and a warning.

use std::borrow::Cow;
use std::ffi::OsStr;
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, FixedOffset};

/// Commit timestamps for a directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct History {
    /// The most recent commit.
    pub updated: Option<DateTime<FixedOffset>>,
    /// The oldest commit.
    pub created: Option<DateTime<FixedOffset>>,
}

pub trait Vcs: Debug {
    /// The browsable URL of the first remote configured for `dir`.
    fn repository_url(&self, dir: &Path) -> Option<String>;

    /// The commit history of `dir`.
    fn history(&self, dir: &Path) -> History;
}

/// Queries history through the `git` command-line client.
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
}

impl Default for Git {
    fn default() -> Self {
        Git::with_program("git")
    }
}

impl Git {
    pub fn with_program<P: Into<PathBuf>>(program: P) -> Self {
        Git { program: program.into() }
    }

    fn query<I, S>(&self, dir: &Path, args: I) -> Option<String>
        where I: IntoIterator<Item = S>, S: AsRef<OsStr>
    {
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(dir)
            .args(args)
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Some(String::from_utf8_lossy(&output.stdout).into_owned())
            }
            Ok(output) => {
                tracing::warn!(
                    dir = %dir.display(),
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "version control query failed"
                );

                None
            }
            Err(e) => {
                tracing::warn!(
                    dir = %dir.display(),
                    program = %self.program.display(),
                    error = %e,
                    "failed to run version control client"
                );

                None
            }
        }
    }
}

impl Vcs for Git {
    fn repository_url(&self, dir: &Path) -> Option<String> {
        let remotes = self.query(dir, ["remote", "-v"])?;
        let url = first_remote(&remotes).map(|url| web_url(url).into_owned());
        if url.is_none() {
            tracing::warn!(dir = %dir.display(), "no version control remote configured");
        }

        url
    }

    fn history(&self, dir: &Path) -> History {
        self.query(dir, ["log", "--pretty=format:%aI", "--", "."])
            .map(|log| parse_history(&log))
            .unwrap_or_default()
    }
}

/// Extracts the URL of the first remote from `git remote -v` output, whose
/// lines look like `origin\tgit@github.com:org/repo.git (fetch)`.
pub fn first_remote(output: &str) -> Option<&str> {
    let line = output.lines().next()?;
    let (_, url) = line.split_once('\t')?;
    let url = url.strip_suffix(" (fetch)")
        .or_else(|| url.strip_suffix(" (push)"))
        .unwrap_or(url)
        .trim();

    (!url.is_empty()).then_some(url)
}

/// Rewrites an SSH-style origin (`git@host:path.git`) to its web form
/// (`https://host/path`). Any other URL is returned unchanged.
pub fn web_url(origin: &str) -> Cow<'_, str> {
    let ssh = origin.strip_prefix("git@").and_then(|rest| rest.split_once(':'));
    match ssh {
        Some((host, path)) => {
            let path = path.strip_suffix(".git").unwrap_or(path);
            Cow::Owned(format!("https://{host}/{path}"))
        }
        None => Cow::Borrowed(origin),
    }
}

/// Parses newest-first ISO-8601 log dates. Unparseable lines yield `None`.
pub fn parse_history(log: &str) -> History {
    let mut dates = log.lines().map(str::trim).filter(|l| !l.is_empty());
    let parse = |line: &str| match DateTime::parse_from_rfc3339(line) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!(line, error = %e, "invalid commit date");
            None
        }
    };

    let Some(newest) = dates.next() else {
        return History::default();
    };

    let oldest = dates.last().unwrap_or(newest);
    History { updated: parse(newest), created: parse(oldest) }
}
