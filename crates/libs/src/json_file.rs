use serde::{Serialize, de::DeserializeOwned};
use std::{fs, io, path::Path};

/// Read a JSON array document from disk.
///
/// A missing file is reported as `NotFound`, anything that does not parse as an array of
/// `T` as `InvalidData`.
pub fn read_array<T: DeserializeOwned>(path: &Path) -> io::Result<Vec<T>> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Serialize `items` as a JSON array and replace `path` with it.
///
/// The document is written to a sibling `.tmp` file first and renamed over the target, so
/// readers never observe a half-written file.
pub fn write_array_atomic<T: Serialize>(path: &Path, items: &[T]) -> io::Result<()> {
    let tmp = tmp_path(path);
    let s = serde_json::to_vec(items).map_err(io::Error::other)?;
    fs::write(&tmp, s)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}

fn tmp_path(path: &Path) -> std::path::PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
