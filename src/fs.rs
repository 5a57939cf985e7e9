use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path).context(format!("Unable to create directory {}", path.display()))
}

pub(crate) fn write_all(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, data).context(format!("Unable to write data to {}", path.display()))
}

pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).context(format!("Unable to read file {}", path.display()))
}

/// Deserialize a JSON file into type `T`.
pub(crate) fn deserialize<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = read_to_string(path)?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file at {}", path.display()))
}

/// Reads the whole file, or returns `None` if there is no file at `path`.
pub(crate) fn read_if_exists(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replaces the contents of `path` with `data` by writing a sibling temporary file and renaming
/// it over the destination. The parent directory must already exist.
pub(crate) fn write_replace(path: &Path, data: &[u8]) -> io::Result<()> {
    let temp = temp_path(path);
    let written = std::fs::File::create(&temp).and_then(|mut f| {
        f.write_all(data)?;
        f.sync_all()
    });
    if let Err(e) = written {
        let _ = std::fs::remove_file(&temp);
        return Err(e);
    }
    rename_with_fallback(&temp, path)
}

/// Rename a file, with fallback for platforms where rename fails if target exists.
///
/// If the rename ultimately fails, the temp file is cleaned up.
pub(crate) fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = std::fs::rename(temp_path, destination) {
        let _ = std::fs::remove_file(destination);
        std::fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = std::fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!("Rename failed (initial: {initial_err}, retry: {retry_err})"),
            )
        })?;
    }
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
