use std::io;

use tracing::Level;

/// Initialize the tracing subscriber writing to stderr. The binary calls
/// this before entering the alternate screen; redirect stderr to a file to
/// watch logs while the desktop is running. Safe to call multiple times;
/// subsequent calls are no-ops for the global subscriber.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
