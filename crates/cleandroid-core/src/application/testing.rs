//! In-crate test double for the filesystem port.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::application::{ApplicationError, ports::Filesystem};
use crate::error::CleandroidResult;

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    failing: BTreeSet<PathBuf>,
}

/// Map-backed filesystem. Paths listed with [`FakeFilesystem::fail_on`]
/// reject every write that lands on them.
#[derive(Default)]
pub struct FakeFilesystem {
    state: Mutex<State>,
}

impl FakeFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let path = PathBuf::from(path);
            for ancestor in path.ancestors().skip(1) {
                state.dirs.insert(ancestor.to_path_buf());
            }
            state.files.insert(path, content.as_bytes().to_vec());
        }
        self
    }

    pub fn fail_on(self, path: &str) -> Self {
        self.state.lock().unwrap().failing.insert(PathBuf::from(path));
        self
    }

    pub fn read(&self, path: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .files
            .get(Path::new(path))
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn file_paths(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().files.keys().cloned().collect()
    }

    fn put(&self, path: &Path, content: Vec<u8>) -> CleandroidResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.dirs.contains(path) {
            return Err(ApplicationError::filesystem(path, "is a directory").into());
        }
        state.files.insert(path.to_path_buf(), content);
        Ok(())
    }
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()> {
        let mut state = self.state.lock().unwrap();
        for ancestor in path.ancestors() {
            if state.files.contains_key(ancestor) {
                return Err(ApplicationError::filesystem(path, "not a directory").into());
            }
        }
        for ancestor in path.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn delete(&self, path: &Path) -> CleandroidResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| ApplicationError::filesystem(path, "not found").into())
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
        let bytes = {
            let state = self.state.lock().unwrap();
            state
                .files
                .get(from)
                .cloned()
                .ok_or_else(|| ApplicationError::filesystem(from, "not found"))?
        };
        self.put(to, bytes)
    }

    fn rename(&self, from: &Path, to: &Path) -> CleandroidResult<()> {
        let mut state = self.state.lock().unwrap();
        if state.failing.contains(to) {
            return Err(ApplicationError::filesystem(to, "permission denied").into());
        }
        let bytes = state
            .files
            .remove(from)
            .ok_or_else(|| ApplicationError::filesystem(from, "not found"))?;
        state.files.insert(to.to_path_buf(), bytes);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> CleandroidResult<String> {
        let state = self.state.lock().unwrap();
        let bytes = state
            .files
            .get(path)
            .ok_or_else(|| ApplicationError::filesystem(path, "not found"))?;
        String::from_utf8(bytes.clone())
            .map_err(|e| ApplicationError::filesystem(path, e.to_string()).into())
    }
}

/// Lets a test keep a handle on the fake after boxing it into a service.
impl Filesystem for Arc<FakeFilesystem> {
    fn create_dir_all(&self, path: &Path) -> CleandroidResult<()> {
        (**self).create_dir_all(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn delete(&self, path: &Path) -> CleandroidResult<()> {
        (**self).delete(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> CleandroidResult<()> {
        (**self).write_text(path, content)
    }

    fn write_bytes(&self, path: &Path, content: &[u8]) -> CleandroidResult<()> {
        (**self).write_bytes(path, content)
    }

    fn copy_file(&self, from: &Path, to: &Path, overwrite: bool) -> CleandroidResult<()> {
        (**self).copy_file(from, to, overwrite)
    }

    fn rename(&self, from: &Path, to: &Path) -> CleandroidResult<()> {
        (**self).rename(from, to)
    }

    fn read_to_string(&self, path: &Path) -> CleandroidResult<String> {
        (**self).read_to_string(path)
    }
}
