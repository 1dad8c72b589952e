//! File-name and source-file helpers.

use std::fs;
use std::path::Path;

/// Check whether `file_name` ends with `extension`, ignoring ASCII case.
///
/// `extension` is expected to include the leading dot (`.java`).
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    file_name.to_lowercase().ends_with(&extension.to_lowercase())
}

/// Read a source file as raw bytes; decoding is left to the caller.
pub fn read_source_bytes(path: &Path) -> crate::Result<Vec<u8>> {
    if path.is_dir() {
        return Err(crate::UtilError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Path is a directory: {}", path.display()),
        )));
    }
    Ok(fs::read(path)?)
}
