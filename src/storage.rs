use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("resource not found: {path}")]
    NotFound { path: PathBuf },
    #[error("failed reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Raw document access for state and shortcut files.
pub trait Storage {
    fn load(&self, path: &Path) -> Result<String, StorageError>;
    fn write(&self, path: &Path, data: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl Storage for FileSystem {
    fn load(&self, path: &Path) -> Result<String, StorageError> {
        fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StorageError::NotFound {
                path: path.to_path_buf(),
            },
            _ => StorageError::Read {
                path: path.to_path_buf(),
                source,
            },
        })
    }

    fn write(&self, path: &Path, data: &str) -> Result<(), StorageError> {
        fs::write(path, data).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn valid_directory(path: &Path) -> bool {
    path.is_dir()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{valid_directory, FileSystem, Storage, StorageError};

    #[test]
    fn missing_file_maps_to_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = FileSystem
            .load(&dir.path().join("absent.json"))
            .expect_err("load should fail");
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn writes_then_reads_text() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("shortcut.json");
        FileSystem.write(&path, "{}").expect("write");
        assert_eq!(FileSystem.load(&path).expect("load"), "{}");
    }

    #[test]
    fn directory_check_rejects_files() {
        let dir = TempDir::new().expect("tempdir");
        let file = dir.path().join("state.json");
        FileSystem.write(&file, "{}").expect("write");
        assert!(valid_directory(dir.path()));
        assert!(!valid_directory(&file));
        assert!(!valid_directory(&dir.path().join("nope")));
    }
}
