use log::{info, warn};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::error::Result;

/// A chart image written to the artifact directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    /// `<uuid>.<ext>`
    pub file_name: String,
    /// Location on disk.
    pub path: PathBuf,
    /// Relative URL the file is served under, e.g. `static/<uuid>.png`.
    pub url_path: String,
}

/// Write `bytes` to `path` through a temporary file in the same directory.
///
/// The temporary file is renamed into place only once fully written and is
/// removed if anything fails, so `path` is either complete or untouched.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| {
        warn!("Could not move chart into {}: {}", path.display(), e.error);
        e.error
    })?;
    Ok(())
}

/// Directory of rendered charts, each under a fresh random name.
///
/// Files go through [`write_atomic`], so a failed write never leaves a
/// partial image under an artifact name.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
    url_prefix: String,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        ArtifactStore {
            dir: dir.into(),
            url_prefix: url_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the artifact directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn store(&self, bytes: &[u8], extension: &str) -> Result<Artifact> {
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.dir.join(&file_name);

        if let Err(e) = write_atomic(&path, bytes) {
            warn!("Failed to write artifact {}: {}", path.display(), e);
            return Err(e);
        }

        info!("Wrote chart {} ({} bytes)", path.display(), bytes.len());
        let url_path = if self.url_prefix.is_empty() {
            file_name.clone()
        } else {
            format!("{}/{}", self.url_prefix, file_name)
        };
        Ok(Artifact {
            file_name,
            path,
            url_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "static/");
        let artifact = store.store(b"<svg/>", "svg").unwrap();

        assert!(artifact.file_name.ends_with(".svg"));
        assert_eq!(artifact.url_path, format!("static/{}", artifact.file_name));
        assert_eq!(fs::read(&artifact.path).unwrap(), b"<svg/>");

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "temporary file should be gone");
    }

    #[test]
    fn test_names_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path(), "static");
        let a = store.store(b"a", "svg").unwrap();
        let b = store.store(b"b", "svg").unwrap();
        assert_ne!(a.file_name, b.file_name);
    }

    #[test]
    fn test_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("missing"), "static");
        assert!(store.store(b"a", "svg").is_err());
        assert!(!dir.path().join("missing").exists());

        store.ensure_dir().unwrap();
        assert!(store.store(b"a", "svg").is_ok());
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("supply.png");
        fs::write(&path, b"old").unwrap();
        write_atomic(&path, b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomic_leaves_nothing_on_failed_rename() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory cannot be replaced by a file
        let target = dir.path().join("supply.png");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), b"x").unwrap();

        assert!(write_atomic(&target, b"chart").is_err());
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("supply.png")]);
    }
}
