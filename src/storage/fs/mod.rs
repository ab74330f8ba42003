//! Directory-backed record set storage (one file per record set).


use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use super::{RecordSetLister, RecordStore, StorageError, StorageResult};
use crate::constants::{DEFAULT_EXTENSION, TEMP_SUFFIX};

#[derive(Debug, Clone)]
/// Stores record sets as files under a root directory.
///
/// Identifiers are file names relative to the root. Writes go to a sibling
/// temporary file which is synced and then renamed over the destination.
pub struct FsRecordStore {
    root: PathBuf,
    extension: String,
}

impl FsRecordStore {
    /// Creates a store rooted at `root` that lists `.json` files.
    pub fn new(root: PathBuf) -> Self {
        Self::with_extension(root, DEFAULT_EXTENSION)
    }

    pub fn with_extension(root: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            root,
            extension: extension.into(),
        }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Resolves `id` to a path under the root, rejecting anything that escapes it.
    pub fn resolve(&self, id: &str) -> StorageResult<PathBuf> {
        sanitize_identifier(id)
            .map(|rel| self.root.join(rel))
            .ok_or_else(|| StorageError::InvalidIdentifier { id: id.to_string() })
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".");
        name.push(TEMP_SUFFIX);
        path.with_file_name(name)
    }

    fn write_replace(path: &Path, data: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = Self::temp_path(path);
        let result = (|| {
            let mut file = File::create(&temp_path)?;
            file.write_all(data)?;
            file.sync_all()?;
            fs::rename(&temp_path, path)
        })();

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

fn sanitize_identifier(id: &str) -> Option<PathBuf> {
    if id.is_empty() {
        return None;
    }

    let mut out = PathBuf::new();
    for c in Path::new(id).components() {
        match c {
            Component::Normal(seg) => out.push(seg),
            Component::CurDir => continue,
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if out.as_os_str().is_empty() {
        None
    } else {
        Some(out)
    }
}

impl RecordStore for FsRecordStore {
    fn read(&self, id: &str) -> StorageResult<Vec<u8>> {
        let path = self.resolve(id)?;
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), bytes = bytes.len(), "Read record set");
                Ok(bytes)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound { id: id.to_string() })
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    fn write(&self, id: &str, data: &[u8]) -> StorageResult<()> {
        let path = self.resolve(id)?;
        Self::write_replace(&path, data).map_err(|e| StorageError::WriteFailed {
            id: id.to_string(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), bytes = data.len(), "Wrote record set");
        Ok(())
    }
}

impl RecordSetLister for FsRecordStore {
    fn list(&self) -> StorageResult<Vec<String>> {
        if !self.root.is_dir() {
            warn!(root = %self.root.display(), "Record set directory not found");
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file()
                && let Some(ext) = path.extension()
                && ext == self.extension.as_str()
                && let Some(name) = path.file_name()
                && let Some(name_str) = name.to_str()
            {
                ids.push(name_str.to_string());
            }
        }

        ids.sort();
        Ok(ids)
    }
}
