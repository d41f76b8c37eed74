use std::process::ExitCode;
use std::time::Instant;

use tracing_subscriber::EnvFilter;

use vitrine::Gallery;
use vitrine::error::Result;

mod flags;

fn run(flags: flags::Curator) -> Result<()> {
    let start = Instant::now();
    let gallery = Gallery::new(std::env::current_dir()?)?;
    let discovery = gallery.run(&flags.destination)?;

    tracing::info!(
        themes = discovery.themes.len(),
        skipped = discovery.skipped.len(),
        output = %flags.destination.display(),
        "generated gallery in {}ms", start.elapsed().as_millis()
    );

    Ok(())
}

pub fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let flags = flags::Curator::from_env_or_exit();
    match run(flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
