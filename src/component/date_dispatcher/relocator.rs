use super::classifier::RelocationIntent;
use crate::tools::move_file;
use crossbeam_channel::Receiver;
use log::{debug, error, info};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Single-consumer stage executing relocation intents under the output root.
pub struct FileRelocator {
    cancel: Arc<AtomicBool>,
}

impl FileRelocator {
    #[must_use]
    pub const fn new(cancel: Arc<AtomicBool>) -> Self {
        Self { cancel }
    }

    /// Drains the intent queue until it closes and returns the number of
    /// files moved.
    ///
    /// Once cancellation is observed the remaining intents are still drained
    /// but no longer acted on, so the pipeline terminates cleanly. Directory
    /// creation is memoized per bucket; a creation or copy failure skips the
    /// item and leaves the source file in place.
    pub fn run(&self, output_root: &Path, intents: Receiver<RelocationIntent>) -> usize {
        let mut moved_count = 0usize;
        let mut created_buckets: HashSet<String> = HashSet::new();

        for intent in intents {
            if self.cancel.load(Ordering::SeqCst) {
                info!("{}: move skipped after cancellation", intent.source.display());
                continue;
            }

            let bucket_dir = output_root.join(&intent.bucket);
            if !created_buckets.contains(&intent.bucket) {
                if let Err(e) = fs::create_dir_all(&bucket_dir) {
                    error!("error while creating output folder {}: {e}", bucket_dir.display());
                    continue;
                }
                created_buckets.insert(intent.bucket.clone());
            }

            let Some(file_name) = intent.source.file_name() else {
                error!("{}: no file name, skipping", intent.source.display());
                continue;
            };
            let destination = bucket_dir.join(file_name);
            debug!("moving {} to {}", intent.source.display(), destination.display());
            match move_file(&intent.source, &destination) {
                Ok(()) => moved_count += 1,
                Err(e) => error!("error while moving to {}: {e:#}", destination.display()),
            }
        }

        info!("{moved_count} moved file(s)");
        moved_count
    }
}
