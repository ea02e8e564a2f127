//! Report file writing.
//!
//! Outputs are fully built in memory before anything touches the disk, then
//! written to a sibling temp file and renamed over the target. A failed run
//! therefore never leaves a truncated or partial file behind; the previously
//! published one stays as it was.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Atomically replace the HTML report at `path`, creating parent directories.
pub fn write_report_atomic(path: &Path, contents: &str) -> Result<(), AppError> {
    write_file_atomic(path, contents.as_bytes(), "report")
}

/// Atomically replace `path` with `contents`. `what` names the file in errors.
pub fn write_file_atomic(path: &Path, contents: &[u8], what: &str) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::output(format!("Failed to create output directory '{}': {e}", parent.display()))
        })?;
    }

    let tmp = temp_path(path);
    let result = write_and_sync(&tmp, contents).and_then(|()| fs::rename(&tmp, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp);
        return Err(AppError::output(format!("Failed to write {what} '{}': {e}", path.display())));
    }
    Ok(())
}

fn write_and_sync(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report.html".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
