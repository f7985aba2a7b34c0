use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing::debug;

use crate::error::Result;

/// Block until this process holds the exclusive writer lock at `path`.
///
/// The lock lives as long as the returned handle; dropping it lets the next
/// writer in. The lock file itself is left on disk.
pub fn acquire_lock(path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    file.lock_exclusive()?;
    debug!(lock = %path.display(), "acquired store lock");

    Ok(file)
}
