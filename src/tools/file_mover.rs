use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Moves a file by copying its bytes and deleting the source only after the
/// copy fully succeeded. Tolerates input and output roots on different
/// filesystems, where a rename would fail. A same-named file already present
/// at the destination is overwritten.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)
        .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
    fs::remove_file(from).with_context(|| format!("failed to remove {}", from.display()))?;
    Ok(())
}
