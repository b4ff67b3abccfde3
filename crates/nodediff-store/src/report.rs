//! Comparison report persistence
//!
//! Writes a [`ComparisonResult`] as pretty JSON via temp file + rename, so a
//! reader never sees a half-written report.

#![allow(clippy::result_large_err)]

use crate::errors::{serialization_error, write_error, Result};
use nodediff_core::compare::ComparisonResult;
use nodediff_core::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::path::{Path, PathBuf};

/// Temp file beside the target: `<file name>.tmp`
fn temp_path(target_path: &Path) -> PathBuf {
    let mut name = target_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    target_path.with_file_name(name)
}

/// Atomically write bytes to a file
///
/// # Errors
///
/// `Io` when any filesystem step fails.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| write_error(target_path, e))?;
        }
    }

    let temp_path = temp_path(target_path);
    fs::write(&temp_path, content).map_err(|e| write_error(target_path, e))?;

    if let Err(e) = fs::rename(&temp_path, target_path) {
        fs::remove_file(&temp_path).ok();
        return Err(write_error(target_path, e));
    }

    Ok(())
}

/// Persist a comparison result as pretty-printed JSON
///
/// # Errors
///
/// `Serialization` if the result cannot be encoded, `Io` if it cannot be
/// written.
pub fn write_report(path: &Path, result: &ComparisonResult) -> Result<()> {
    log_op_start!("write_report", path = %path.display());
    let start = std::time::Instant::now();

    let written = serde_json::to_vec_pretty(result)
        .map_err(serialization_error)
        .and_then(|mut bytes| {
            bytes.push(b'\n');
            atomic_write(path, &bytes)
        });

    match &written {
        Ok(()) => {
            log_op_end!(
                "write_report",
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
        Err(err) => {
            log_op_error!(
                "write_report",
                err.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
        }
    }
    written
}
