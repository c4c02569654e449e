//! Logging setup.
//!
//! The explorer owns the terminal, so log lines go to a file. `RUST_LOG` is respected;
//! the default level is `info`.

use env_logger::{Env, Target};
use std::fs;
use std::io;
use std::path::Path;

/// Initialise the global logger, writing to `log_file`.
///
/// If the file cannot be opened, interactive sessions run without logging (stderr would
/// scribble over the screen) and scripted runs log to stderr.
pub fn init_with(log_file: &Path, interactive: bool) {
    let target = (|| -> io::Result<Target> {
        if let Some(parent) = log_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;
        Ok(Target::Pipe(Box::new(file)))
    })();

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    match target {
        Ok(target) => {
            builder.target(target);
        }
        Err(_) if interactive => {
            builder.filter_level(log::LevelFilter::Off);
        }
        Err(_) => {
            builder.target(Target::Stderr);
        }
    }
    // A second init (tests, embedding) keeps the first logger.
    let _ = builder.try_init();
}
