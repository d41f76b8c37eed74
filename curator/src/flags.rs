use std::path::PathBuf;

xflags::xflags! {
    /// Regenerates gallery content for every theme directory in the current
    /// working directory.
    cmd curator {
        /// Output directory. Deleted and recreated on every run.
        required destination: PathBuf
    }
}
