//! Idempotent file and directory materializer.
//!
//! Every operation checks before it acts, so running the same plan twice
//! leaves the tree unchanged on the second run. New files are written to a
//! uniquely named sibling and renamed into place; a crash mid-write never
//! leaves a truncated file behind under the final name.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::{
    ApplicationError,
    ports::{Filesystem, ResourceBundle, ResourceSource},
};
use crate::error::CleandroidResult;

/// What an operation did to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created,
    Updated,
    /// Already present (or identical); nothing written.
    Skipped,
}

pub struct Materializer<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> Materializer<'a> {
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Create `path` and its parents. Existing directories are untouched.
    pub fn ensure_directory(&self, path: &Path) -> CleandroidResult<Outcome> {
        let existed = self.fs.exists(path);
        // still called when present so a regular file in the way is reported
        self.fs.create_dir_all(path)?;
        Ok(if existed {
            Outcome::Skipped
        } else {
            debug!(path = %path.display(), "Created directory");
            Outcome::Created
        })
    }

    /// Write `path` only if it does not exist. `producer` runs only when a
    /// write will happen.
    pub fn create_if_absent<F>(&self, path: &Path, producer: F) -> CleandroidResult<Outcome>
    where
        F: FnOnce() -> Vec<u8>,
    {
        if self.fs.exists(path) {
            debug!(path = %path.display(), "Exists, skipping");
            return Ok(Outcome::Skipped);
        }
        self.write_atomically(path, &producer())?;
        Ok(Outcome::Created)
    }

    /// Always converge `path` to the produced content. Byte-identical
    /// content is not rewritten.
    pub fn overwrite<F>(&self, path: &Path, producer: F) -> CleandroidResult<Outcome>
    where
        F: FnOnce() -> Vec<u8>,
    {
        let content = producer();
        if !self.fs.exists(path) {
            self.write_atomically(path, &content)?;
            return Ok(Outcome::Created);
        }

        if let Ok(existing) = self.fs.read_to_string(path)
            && existing.as_bytes() == content.as_slice()
        {
            return Ok(Outcome::Skipped);
        }

        self.write_atomically(path, &content)?;
        Ok(Outcome::Updated)
    }

    /// Copy every file of `bundle` under `target_dir`, skipping files that
    /// already exist.
    pub fn copy_binary_resource_if_absent(
        &self,
        resources: &dyn ResourceBundle,
        target_dir: &Path,
        bundle: &str,
    ) -> CleandroidResult<Vec<(PathBuf, CleandroidResult<Outcome>)>> {
        let files = resources.files(bundle)?;
        let mut results = Vec::with_capacity(files.len());

        for file in files {
            let target = file.path.under(target_dir);
            let outcome = match &file.source {
                ResourceSource::Embedded(bytes) => self.create_if_absent(&target, || bytes.to_vec()),
                ResourceSource::File(source) => self.copy_if_absent(source, &target),
            };
            results.push((target, outcome));
        }

        Ok(results)
    }

    /// Append `line` to `path` unless an identical line (ignoring
    /// surrounding whitespace) is already there. Creates the file if absent.
    pub fn ensure_line(&self, path: &Path, line: &str) -> CleandroidResult<Outcome> {
        if !self.fs.exists(path) {
            self.write_atomically(path, format!("{line}\n").as_bytes())?;
            return Ok(Outcome::Created);
        }

        let mut content = self.fs.read_to_string(path)?;
        if content.lines().any(|l| l.trim() == line.trim()) {
            return Ok(Outcome::Skipped);
        }

        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(line);
        content.push('\n');

        self.write_atomically(path, content.as_bytes())?;
        debug!(path = %path.display(), line, "Appended line");
        Ok(Outcome::Updated)
    }

    /// [`ensure_line`](Self::ensure_line) for files owned by another
    /// request: a missing file stays missing.
    pub fn append_line_if_present(&self, path: &Path, line: &str) -> CleandroidResult<Outcome> {
        if !self.fs.exists(path) {
            debug!(path = %path.display(), "Not present, skipping line");
            return Ok(Outcome::Skipped);
        }
        self.ensure_line(path, line)
    }

    fn copy_if_absent(&self, source: &Path, target: &Path) -> CleandroidResult<Outcome> {
        if self.fs.exists(target) {
            return Ok(Outcome::Skipped);
        }
        self.place_atomically(target, |temp| self.fs.copy_file(source, temp, true))?;
        Ok(Outcome::Created)
    }

    fn write_atomically(&self, path: &Path, content: &[u8]) -> CleandroidResult<()> {
        self.place_atomically(path, |temp| self.fs.write_bytes(temp, content))
    }

    /// Fill a uniquely named sibling with `fill`, then rename it onto `path`.
    fn place_atomically<F>(&self, path: &Path, fill: F) -> CleandroidResult<()>
    where
        F: FnOnce(&Path) -> CleandroidResult<()>,
    {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApplicationError::filesystem(path, "path has no file name"))?;

        if !parent.as_os_str().is_empty() {
            self.fs.create_dir_all(parent)?;
        }

        let temp = parent.join(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()));

        let written = fill(&temp).and_then(|()| self.fs.rename(&temp, path));

        if let Err(e) = written {
            if self.fs.exists(&temp)
                && let Err(cleanup) = self.fs.delete(&temp)
            {
                warn!(path = %temp.display(), error = %cleanup, "Failed to remove temporary file");
            }
            return Err(match e {
                // report the real target, not the temporary
                crate::error::CleandroidError::Application(ApplicationError::Filesystem {
                    reason,
                    ..
                }) => ApplicationError::filesystem(path, reason).into(),
                other => other,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, ResourceFile};
    use crate::application::testing::FakeFilesystem;
    use crate::domain::RelativePath;
    use crate::error::CleandroidError;
    use std::cell::Cell;

    #[test]
    fn create_if_absent_never_calls_producer_for_existing_file() {
        let fs = FakeFilesystem::new().with_file("/p/a.txt", "hand edited");
        let materializer = Materializer::new(&fs);
        let called = Cell::new(false);

        let outcome = materializer
            .create_if_absent(Path::new("/p/a.txt"), || {
                called.set(true);
                b"generated".to_vec()
            })
            .unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert!(!called.get());
        assert_eq!(fs.read("/p/a.txt").as_deref(), Some("hand edited"));
    }

    #[test]
    fn create_if_absent_writes_and_leaves_no_temporaries() {
        let fs = FakeFilesystem::new();
        let materializer = Materializer::new(&fs);

        let outcome = materializer
            .create_if_absent(Path::new("/p/src/a.txt"), || b"hello".to_vec())
            .unwrap();

        assert_eq!(outcome, Outcome::Created);
        assert_eq!(fs.read("/p/src/a.txt").as_deref(), Some("hello"));
        assert_eq!(fs.file_paths(), vec![PathBuf::from("/p/src/a.txt")]);
    }

    #[test]
    fn failed_rename_removes_temporary_and_reports_target() {
        let mut mock = MockFilesystem::new();
        mock.expect_exists()
            .withf(|p: &Path| p == Path::new("/p/a.txt"))
            .return_const(false);
        mock.expect_create_dir_all().returning(|_| Ok(()));
        mock.expect_write_bytes().returning(|_, _| Ok(()));
        mock.expect_rename()
            .returning(|from, _| Err(ApplicationError::filesystem(from, "disk full").into()));
        mock.expect_exists()
            .withf(|p: &Path| p.to_string_lossy().ends_with(".tmp"))
            .return_const(true);
        mock.expect_delete()
            .withf(|p: &Path| p.to_string_lossy().ends_with(".tmp"))
            .times(1)
            .returning(|_| Ok(()));

        let err = Materializer::new(&mock)
            .create_if_absent(Path::new("/p/a.txt"), || b"x".to_vec())
            .unwrap_err();

        assert_eq!(
            err,
            CleandroidError::from(ApplicationError::filesystem("/p/a.txt", "disk full"))
        );
    }

    #[test]
    fn ensure_directory_reports_collision_with_file() {
        let fs = FakeFilesystem::new().with_file("/p/app", "not a dir");
        let err = Materializer::new(&fs)
            .ensure_directory(Path::new("/p/app"))
            .unwrap_err();
        assert!(matches!(
            err,
            CleandroidError::Application(ApplicationError::Filesystem { .. })
        ));
    }

    #[test]
    fn ensure_directory_is_idempotent() {
        let fs = FakeFilesystem::new();
        let materializer = Materializer::new(&fs);
        assert_eq!(materializer.ensure_directory(Path::new("/p/a/b")).unwrap(), Outcome::Created);
        assert_eq!(materializer.ensure_directory(Path::new("/p/a/b")).unwrap(), Outcome::Skipped);
    }

    #[test]
    fn overwrite_skips_identical_content() {
        let fs = FakeFilesystem::new().with_file("/p/.editorconfig", "root = true\n");
        let materializer = Materializer::new(&fs);

        assert_eq!(
            materializer
                .overwrite(Path::new("/p/.editorconfig"), || b"root = true\n".to_vec())
                .unwrap(),
            Outcome::Skipped
        );
        assert_eq!(
            materializer
                .overwrite(Path::new("/p/.editorconfig"), || b"root = false\n".to_vec())
                .unwrap(),
            Outcome::Updated
        );
        assert_eq!(fs.read("/p/.editorconfig").as_deref(), Some("root = false\n"));
    }

    #[test]
    fn ensure_line_appends_once() {
        let fs = FakeFilesystem::new().with_file("/p/settings.gradle.kts", "include(\":app\")");
        let materializer = Materializer::new(&fs);
        let path = Path::new("/p/settings.gradle.kts");

        assert_eq!(
            materializer.ensure_line(path, "include(\":core\")").unwrap(),
            Outcome::Updated
        );
        assert_eq!(
            materializer.ensure_line(path, "include(\":core\")").unwrap(),
            Outcome::Skipped
        );
        assert_eq!(
            fs.read("/p/settings.gradle.kts").as_deref(),
            Some("include(\":app\")\ninclude(\":core\")\n")
        );
    }

    #[test]
    fn ensure_line_creates_missing_file() {
        let fs = FakeFilesystem::new();
        let outcome = Materializer::new(&fs)
            .ensure_line(Path::new("/p/settings.gradle.kts"), "include(\":app\")")
            .unwrap();
        assert_eq!(outcome, Outcome::Created);
    }

    struct OneIcon;

    impl ResourceBundle for OneIcon {
        fn names(&self) -> Vec<String> {
            vec!["icons".into()]
        }

        fn files(&self, bundle: &str) -> CleandroidResult<Vec<ResourceFile>> {
            if bundle != "icons" {
                return Err(ApplicationError::ResourceNotFound {
                    bundle: bundle.into(),
                }
                .into());
            }
            Ok(vec![ResourceFile {
                path: RelativePath::try_new("mipmap-hdpi/ic_launcher.png").unwrap(),
                source: ResourceSource::Embedded(&[0x89, b'P', b'N', b'G']),
            }])
        }
    }

    #[test]
    fn resources_are_copied_only_when_missing() {
        let fs = FakeFilesystem::new().with_file("/p/res/mipmap-hdpi/ic_launcher.png", "custom");
        let materializer = Materializer::new(&fs);

        let results = materializer
            .copy_binary_resource_if_absent(&OneIcon, Path::new("/p/res"), "icons")
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].1, Ok(Outcome::Skipped));
        assert_eq!(fs.read("/p/res/mipmap-hdpi/ic_launcher.png").as_deref(), Some("custom"));

        let fresh = FakeFilesystem::new();
        let results = Materializer::new(&fresh)
            .copy_binary_resource_if_absent(&OneIcon, Path::new("/p/res"), "icons")
            .unwrap();
        assert_eq!(results[0].1, Ok(Outcome::Created));
    }

    struct IconDirectory;

    impl ResourceBundle for IconDirectory {
        fn names(&self) -> Vec<String> {
            vec!["icons".into()]
        }

        fn files(&self, _bundle: &str) -> CleandroidResult<Vec<ResourceFile>> {
            Ok(vec![ResourceFile {
                path: RelativePath::try_new("mipmap-hdpi/ic_launcher.png").unwrap(),
                source: ResourceSource::File(PathBuf::from("/icons/mipmap-hdpi/ic_launcher.png")),
            }])
        }
    }

    #[test]
    fn directory_resources_are_copied_through_a_temporary() {
        let target = "/p/res/mipmap-hdpi/ic_launcher.png";
        let mut mock = MockFilesystem::new();
        mock.expect_exists()
            .withf(move |p: &Path| p == Path::new(target))
            .return_const(false);
        mock.expect_create_dir_all().returning(|_| Ok(()));
        mock.expect_copy_file()
            .withf(|_, to: &Path, _| to.to_string_lossy().ends_with(".tmp"))
            .times(1)
            .returning(|_, _, _| Ok(()));
        mock.expect_rename()
            .returning(|from, _| Err(ApplicationError::filesystem(from, "device busy").into()));
        mock.expect_exists()
            .withf(|p: &Path| p.to_string_lossy().ends_with(".tmp"))
            .return_const(true);
        mock.expect_delete()
            .withf(|p: &Path| p.to_string_lossy().ends_with(".tmp"))
            .times(1)
            .returning(|_| Ok(()));

        let results = Materializer::new(&mock)
            .copy_binary_resource_if_absent(&IconDirectory, Path::new("/p/res"), "icons")
            .unwrap();

        assert_eq!(results[0].0, PathBuf::from(target));
        assert_eq!(
            results[0].1,
            Err(CleandroidError::from(ApplicationError::filesystem(target, "device busy")))
        );
    }

    #[test]
    fn append_line_if_present_leaves_missing_file_missing() {
        let fs = FakeFilesystem::new().with_file("/p/app/build.gradle.kts", "plugins {}\n");
        let materializer = Materializer::new(&fs);
        let line = "dependencies { implementation(project(\":feature-login\")) }";

        assert_eq!(
            materializer
                .append_line_if_present(Path::new("/p/core/build.gradle.kts"), line)
                .unwrap(),
            Outcome::Skipped
        );
        assert!(fs.read("/p/core/build.gradle.kts").is_none());

        assert_eq!(
            materializer
                .append_line_if_present(Path::new("/p/app/build.gradle.kts"), line)
                .unwrap(),
            Outcome::Updated
        );
        assert_eq!(
            fs.read("/p/app/build.gradle.kts").as_deref(),
            Some("plugins {}\ndependencies { implementation(project(\":feature-login\")) }\n")
        );
    }

    #[test]
    fn unknown_bundle_is_not_found() {
        let fs = FakeFilesystem::new();
        let err = Materializer::new(&fs)
            .copy_binary_resource_if_absent(&OneIcon, Path::new("/p"), "nope")
            .unwrap_err();
        assert!(matches!(
            err,
            CleandroidError::Application(ApplicationError::ResourceNotFound { .. })
        ));
    }
}
