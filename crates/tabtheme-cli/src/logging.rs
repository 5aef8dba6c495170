//! Diagnostic logging to stderr.
//!
//! The level comes from, in order: `-v` flags, the config `log_level`,
//! `RUST_LOG`, and finally `warn`.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Maps a `-v` count to a level. Zero means "not given".
pub fn verbosity_level(count: u8) -> Option<LevelFilter> {
    match count {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Builds the logger without installing it.
pub fn builder(verbose: u8, configured: Option<LevelFilter>) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder
        .target(Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false);

    if let Some(level) = verbosity_level(verbose).or(configured) {
        builder.filter_level(level);
    }
    builder
}

/// Installs the logger. A second call is a no-op.
pub fn setup_logger(verbose: u8, configured: Option<LevelFilter>) {
    if builder(verbose, configured).try_init().is_err() {
        log::debug!("logger already initialized");
    }
}
