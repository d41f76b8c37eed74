use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, Chainable};

/// A file system destination for generated output.
pub trait Sink {
    fn write<C: AsRef<[u8]>>(&self, contents: C) -> Result<()>;

    fn copy_from<P: AsRef<Path>>(&self, source: P) -> Result<()>;
}

impl Sink for Path {
    fn write<C: AsRef<[u8]>>(&self, contents: C) -> Result<()> {
        fs::write(self, contents).chain_with(|| error! {
            "failed to open/create file for writing",
            "file path" => self.display()
        })
    }

    fn copy_from<P: AsRef<Path>>(&self, source: P) -> Result<()> {
        let source = source.as_ref();
        fs::copy(source, self).map(|_| ()).chain_with(|| error! {
            "failed to copy file",
            "from" => source.display(),
            "to" => self.display(),
        })
    }
}

impl Sink for PathBuf {
    fn write<C: AsRef<[u8]>>(&self, contents: C) -> Result<()> {
        self.as_path().write(contents)
    }

    fn copy_from<P: AsRef<Path>>(&self, source: P) -> Result<()> {
        self.as_path().copy_from(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_and_copy() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("a.txt");
        let copy = dir.path().join("b.txt");

        original.write("hello").unwrap();
        copy.copy_from(&original).unwrap();
        assert_eq!(fs::read_to_string(&copy).unwrap(), "hello");

        let error = dir.path().join("missing/c.txt").write("x").unwrap_err();
        assert_eq!(error.message(), "failed to open/create file for writing");
    }
}
