use crate::tools::validate_directory_exists;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Extension of the motion clip an iPhone stores next to a live photo.
/// Literal case: the sibling lookup is exact on case-sensitive filesystems.
const LIVE_VIDEO_EXTENSION: &str = "MOV";

static JPEG_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^jpe?g$").expect("static pattern"));

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| JPEG_EXTENSION.is_match(ext))
}

/// One-shot pass deleting `.MOV` companions of still-present JPEG images.
///
/// Runs to completion before the relocation pipeline starts and mutates the
/// input tree in place. A failed deletion is logged and skipped; a traversal
/// error aborts the whole pass and must stop the program.
pub struct LivePhotoRemover;

impl LivePhotoRemover {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Walks `root` and deletes every companion video whose paired image is
    /// present. Returns the number of deleted companions.
    pub fn run(&self, root: &Path) -> Result<usize> {
        validate_directory_exists(root)?;

        let mut removed_count = 0usize;
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.with_context(|| format!("error while browsing {}", root.display()))?;
            if !entry.file_type().is_file() || !is_jpeg(entry.path()) {
                continue;
            }

            let companion = entry.path().with_extension(LIVE_VIDEO_EXTENSION);
            if !companion.exists() {
                continue;
            }
            match fs::remove_file(&companion) {
                Ok(()) => {
                    debug!("removed live video {}", companion.display());
                    removed_count += 1;
                }
                Err(e) => warn!("error while removing {}: {e}", companion.display()),
            }
        }

        info!("{removed_count} live video(s) removed");
        Ok(removed_count)
    }
}

impl Default for LivePhotoRemover {
    fn default() -> Self {
        Self::new()
    }
}
