//! Report destinations

use chrono::{DateTime, Utc};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::error::{InventoryError, Result};

/// Where a finished report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    Stdout,
    Directory(PathBuf),
}

impl ReportTarget {
    pub fn new(stdout: bool, output_dir: &Path) -> Self {
        if stdout {
            ReportTarget::Stdout
        } else {
            ReportTarget::Directory(output_dir.to_path_buf())
        }
    }
}

/// Timestamped report file name, e.g. `accounts_2024-01-02_03-04-05.csv`
pub fn report_file_name(prefix: &str, timestamp: &DateTime<Utc>, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format(defaults::FILE_TIMESTAMP_FORMAT),
        extension
    )
}

/// Write a file atomically (tmp file + rename), creating the parent dir if needed
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            InventoryError::Io(format!(
                "Failed to create output directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let mut tmp_name = path.as_os_str().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, content).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        InventoryError::Io(format!(
            "Failed to write temp report file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        InventoryError::Io(format!(
            "Failed to rename temp report file to {}: {}",
            path.display(),
            e
        ))
    })?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Print the report or write it under the target directory
///
/// Returns the written path, or `None` when printed to stdout.
pub fn emit_report(
    target: &ReportTarget,
    prefix: &str,
    extension: &str,
    content: &str,
    generated_at: &DateTime<Utc>,
) -> Result<Option<PathBuf>> {
    match target {
        ReportTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(None)
        }
        ReportTarget::Directory(dir) => {
            let path = dir.join(report_file_name(prefix, generated_at, extension));
            write_atomic(&path, content)?;
            info!("Report written to {}", path.display());
            Ok(Some(path))
        }
    }
}
