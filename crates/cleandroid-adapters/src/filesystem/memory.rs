//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use cleandroid_core::{
    application::{ApplicationError, ports::Filesystem},
    error::CleandroidResult,
};

/// In-memory filesystem. Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner
            .files
            .get(path)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let Ok(inner) = self.inner.read() else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Clear all contents.
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.files.clear();
            inner.directories.clear();
        }
    }

    fn read(&self, path: &Path) -> CleandroidResult<RwLockReadGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .read()
            .map_err(|_| ApplicationError::filesystem(path, "memory filesystem lock poisoned").into())
    }

    fn write(&self, path: &Path) -> CleandroidResult<RwLockWriteGuard<'_, MemoryFilesystemInner>> {
        self.inner
            .write()
            .map_err(|_| ApplicationError::filesystem(path, "memory filesystem lock poisoned").into())
    }

    fn put(&self, path: &Path, content: Vec<u8>) -> CleandroidResult<()> {
        let mut inner = self.write(path)?;

        // Ensure parent exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !inner.directories.contains(parent)
        {
            return Err(ApplicationError::filesystem(path, "Parent directory does not exist").into());
        }
        if inner.directories.contains(path) {
            return Err(ApplicationError::filesystem(path, "Is a directory").into());
        }

        inner.files.insert(path.to_path_buf(), content);
        Ok(())
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()> {
        let mut inner = self.write(path)?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if inner.files.contains_key(&current) {
                return Err(ApplicationError::filesystem(path, "Not a directory").into());
            }
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.read(path)
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }

    fn delete(&self, path: &Path) -> CleandroidResult<()> {
        let mut inner = self.write(path)?;
        match inner.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(ApplicationError::filesystem(path, "No such file").into()),
        }
    }

    fn write_text(&self, path: &Path, content: &str) -> CleandroidResult<()> {
        self.put(path, content.as_bytes().to_vec())
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> CleandroidResult<()> {
        self.put(path, content.to_vec())
    }

    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> CleandroidResult<()> {
        if !overwrite && self.exists(to) {
            return Ok(());
        }
        let content = self
            .read(from)?
            .files
            .get(from)
            .cloned()
            .ok_or_else(|| ApplicationError::filesystem(from, "No such file"))?;
        self.put(to, content)
    }

    fn rename(&self, from: &Path, to: &Path) -> CleandroidResult<()> {
        let mut inner = self.write(to)?;
        let content = inner
            .files
            .remove(from)
            .ok_or_else(|| ApplicationError::filesystem(from, "No such file"))?;
        inner.files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CleandroidResult<String> {
        let inner = self.read(path)?;
        let bytes = inner
            .files
            .get(path)
            .ok_or_else(|| ApplicationError::filesystem(path, "No such file"))?;
        String::from_utf8(bytes.clone())
            .map_err(|e| ApplicationError::filesystem(path, e.to_string()).into())
    }
}
