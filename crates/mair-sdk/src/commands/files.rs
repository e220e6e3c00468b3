//! JSON file helpers shared by the commands.

use std::io::Write as _;
use std::path::Path;

use eyre::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// Read and parse a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse as `T`.
pub(super) async fn read_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write `value` as pretty JSON.
///
/// The JSON goes to a uniquely named staging file next to `path`, which is then renamed over
/// it, so readers never observe a partially written file and concurrent writers never share
/// a staging file.
///
/// # Errors
/// Returns an error if serialization or any file operation fails.
pub(super) async fn write_json<T: Serialize>(path: &Path, value: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || replace_file(&path, json.as_bytes())).await?
}

fn replace_file(path: &Path, contents: &[u8]) -> eyre::Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut staging = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create staging file in {}", dir.display()))?;
    staging
        .write_all(contents)
        .and_then(|()| staging.as_file().sync_all())
        .with_context(|| format!("Failed to write {}", staging.path().display()))?;
    staging
        .persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}
