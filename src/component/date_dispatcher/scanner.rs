use crossbeam_channel::Sender;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

/// Single-producer stage feeding the bounded path queue.
pub struct TreeScanner {
    cancel: Arc<AtomicBool>,
}

impl TreeScanner {
    #[must_use]
    pub const fn new(cancel: Arc<AtomicBool>) -> Self {
        Self { cancel }
    }

    /// Walks `root` and pushes every regular-file path into `paths`, blocking
    /// when the queue is full.
    ///
    /// Once the cancellation flag is raised the walk keeps going but no
    /// further path is enqueued. A traversal error raises the flag and ends
    /// the walk; it is unrecoverable for this run. The queue closes when the
    /// sender is consumed on return. Returns the number of files queued.
    pub fn run(&self, root: &Path, paths: Sender<PathBuf>) -> usize {
        let mut file_count = 0usize;
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    // the error names the failing entry, which is usually a
                    // descendant of the walk root
                    let failed = e.path().unwrap_or(root);
                    error!("error while browsing {}: {e}", failed.display());
                    self.cancel.store(true, Ordering::SeqCst);
                    break;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            if self.cancel.load(Ordering::SeqCst) {
                continue;
            }
            debug!("new file to extract: {}", entry.path().display());
            // a send error means every classifier worker is gone already
            if paths.send(entry.into_path()).is_err() {
                break;
            }
            file_count += 1;
        }
        info!("{file_count} file(s) found");
        file_count
    }
}
