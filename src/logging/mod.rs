//! Diagnostic logging to stderr.
//!
//! Chat output goes to stdout; everything `tracing` emits goes to stderr so
//! the two never interleave on a redirected stdout.

use tracing::Level;

/// Level used for a given verbosity flag.
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level_for(verbose))
        .with_target(false)
        .try_init();
}
