//! JSON name list files

use crate::error::NameListError;
use std::path::Path;

/// Load a JSON array of strings
///
/// # Errors
/// - `NameListError::Io` if the file cannot be read
/// - `NameListError::Malformed` if it is not an array of strings
pub fn load_name_list(path: impl AsRef<Path>) -> Result<Vec<String>, NameListError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| NameListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let names: Vec<String> =
        serde_json::from_str(&raw).map_err(|source| NameListError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), count = names.len(), "loaded name list");
    Ok(names)
}

/// Write names as a pretty-printed JSON array
///
/// # Errors
/// Returns `NameListError::Io` if the file cannot be written
pub fn save_name_list<S: AsRef<str>>(
    path: impl AsRef<Path>,
    names: &[S],
) -> Result<(), NameListError> {
    let path = path.as_ref();
    let names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    let json = serde_json::to_string_pretty(&names).map_err(|source| {
        NameListError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    std::fs::write(path, json + "\n").map_err(|source| NameListError::Io {
        path: path.to_path_buf(),
        source,
    })
}
