use log::debug;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::config::BackupPolicy;
use crate::error::{NormalizeError, Result};
use crate::types::BackupOutcome;

/// Sibling path of `path` with `suffix` appended to the file name.
pub fn backup_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Copy `path` to its backup location and flush the copy to disk.
///
/// The source is only read, so a failure here leaves it untouched.
pub fn back_up(path: &Path, suffix: &str, policy: BackupPolicy) -> Result<BackupOutcome> {
    let target = backup_path(path, suffix);

    if policy == BackupPolicy::SkipIfExists && target.exists() {
        debug!("Keeping existing backup {}", target.display());
        return Ok(BackupOutcome::KeptExisting);
    }

    fs::copy(path, &target).map_err(|e| NormalizeError::io(path, e))?;
    OpenOptions::new()
        .write(true)
        .open(&target)
        .and_then(|file| file.sync_all())
        .map_err(|e| NormalizeError::io(&target, e))?;

    Ok(BackupOutcome::Written)
}
