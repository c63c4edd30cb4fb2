use std::{fs::File, io, path::Path, sync::Mutex};
use tracing_subscriber::EnvFilter;

/// Where log lines go.
#[derive(Debug)]
pub enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
    Disabled,
}

/// The filter used when `RUST_LOG` is unset: `warn`, raised by each `-v`.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init(verbosity: u8, target: LogTarget<'_>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    // a subscriber may already be installed (e.g. by an embedding app); keep it
    let result = match target {
        LogTarget::Disabled => return Ok(()),
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = File::create(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
    };
    if let Err(e) = result {
        eprintln!("[textscramble] note: logging not initialized: {e}");
    }
    Ok(())
}
