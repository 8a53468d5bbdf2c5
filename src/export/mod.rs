//! Export of tuned specs.
//!
//! Tuned values leave the running program as a new spec file meant to be
//! checked back into source control, or as text on the clipboard.

pub mod clipboard;

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{TunableError, TunableResult};

pub use clipboard::copy_to_clipboard;

/// Writes `content` to `path` through a temp file and rename.
///
/// Parent directories are created as needed.
pub fn write_atomic(path: &Path, content: &str) -> TunableResult<()> {
    let io_error = |source| TunableError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }

    let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    fs::write(&temp_path, content).map_err(io_error)?;
    fs::rename(&temp_path, path).map_err(io_error)?;
    Ok(())
}

/// Default file name for an export: `<spec>_export_<date>.json`.
///
/// Spaces become underscores and the name is lowercased.
#[must_use]
pub fn export_file_name(spec_name: &str, date: NaiveDate) -> String {
    let stem = spec_name.trim().replace(' ', "_").to_lowercase();
    format!("{}_export_{}.json", stem, date.format("%Y-%m-%d"))
}

/// Default export path inside `dir`, dated today.
#[must_use]
pub fn default_export_path(dir: &Path, spec_name: &str) -> PathBuf {
    let today = chrono::Local::now().date_naive();
    dir.join(export_file_name(spec_name, today))
}
