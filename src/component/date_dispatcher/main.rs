use super::classifier::{DateClassifier, RelocationIntent};
use super::relocator::FileRelocator;
use super::scanner::TreeScanner;
use crate::config::DispatchConfig;
use crate::tools::{Exiftool, MetadataSource, MetadataSourceFactory, validate_directory_exists};
use anyhow::Result;
use crossbeam_channel::bounded;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

/// Aggregate counters of one pipeline run. Per-file failures show up here and
/// in the logs, never in the completion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub files_found: usize,
    pub files_moved: usize,
}

/// Orchestrates the scan, classify and relocate stages over two bounded
/// queues sized to the configured thread count, under one shared
/// cancellation flag.
pub struct DateDispatcher {
    config: DispatchConfig,
    source_factory: Box<dyn MetadataSourceFactory>,
    cancel: Arc<AtomicBool>,
}

impl DateDispatcher {
    /// Dispatcher backed by one exiftool child per classifier worker.
    #[must_use]
    pub fn new(config: DispatchConfig, cancel: Arc<AtomicBool>) -> Self {
        let exiftool_path = config.exiftool_path.clone();
        let factory = move || -> Result<Box<dyn MetadataSource + Send>> {
            Ok(Box::new(Exiftool::new(exiftool_path.as_deref())?))
        };
        Self::with_source_factory(config, cancel, Box::new(factory))
    }

    /// Dispatcher with an injected metadata backend, used by tests to run
    /// without exiftool.
    #[must_use]
    pub fn with_source_factory(
        config: DispatchConfig,
        cancel: Arc<AtomicBool>,
        source_factory: Box<dyn MetadataSourceFactory>,
    ) -> Self {
        Self {
            config,
            source_factory,
            cancel,
        }
    }

    /// Runs all three stages concurrently and blocks until each has
    /// terminated.
    ///
    /// Per-file failures never fail the run. A traversal error raises the
    /// cancellation flag and stops further enumeration, but already-queued
    /// work still drains and the call returns normally; callers inspect the
    /// logs and the summary counters for partial failure.
    pub fn dispatch(&self, input: &Path, output: &Path) -> Result<DispatchSummary> {
        validate_directory_exists(input)?;
        validate_directory_exists(output)?;

        let (path_tx, path_rx) = bounded::<PathBuf>(self.config.thread_count);
        let (intent_tx, intent_rx) = bounded::<RelocationIntent>(self.config.thread_count);

        let scanner = TreeScanner::new(Arc::clone(&self.cancel));
        let classifier = DateClassifier::new(
            &self.config,
            self.source_factory.as_ref(),
            Arc::clone(&self.cancel),
        );
        let relocator = FileRelocator::new(Arc::clone(&self.cancel));

        let files_found = AtomicUsize::new(0);
        let files_moved = AtomicUsize::new(0);

        thread::scope(|s| {
            s.spawn(|| files_found.store(scanner.run(input, path_tx), Ordering::SeqCst));
            s.spawn(|| classifier.run(path_rx, intent_tx));
            s.spawn(|| files_moved.store(relocator.run(output, intent_rx), Ordering::SeqCst));
        });

        Ok(DispatchSummary {
            files_found: files_found.load(Ordering::SeqCst),
            files_moved: files_moved.load(Ordering::SeqCst),
        })
    }
}
