use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Installs a Ctrl-C handler that raises the run-wide cancellation flag.
///
/// The flag is one-way: once raised it stays raised for the rest of the run.
/// The tree scanner raises the same flag on a fatal traversal error.
#[must_use]
pub fn setup_shutdown_signal() -> Arc<AtomicBool> {
    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let signal_clone = Arc::clone(&shutdown_signal);

    ctrlc::set_handler(move || {
        signal_clone.store(true, Ordering::SeqCst);
        eprintln!("\nInterrupt received, finishing in-flight work...");
    })
    .expect("failed to install Ctrl-C handler");

    shutdown_signal
}
