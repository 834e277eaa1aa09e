//! Validated, separator-normalized paths on the host filesystem.
//!
//! A [`Path`] is built once from a raw string. Both `/` and `\` are accepted as separators on
//! input and replaced with the platform's canonical separator. Construction checks that:
//! - every segment matches the legality pattern selected by the [`PathOptions`];
//! - every existing prefix that has to be a directory really is one (a path can never be made to
//!   run through a regular file).
//!
//! Non-existing prefixes are accepted, they can be created later with [`Path::create_dirs`].
//! Relative paths are resolved against the process working directory, paths starting with the
//! separator are used as they are.

use std::fmt;
use std::path::PathBuf;

use log::{debug, trace};

use crate::core::utils::{self, SEPARATOR};
use crate::core::{ConstructionError, Error, Result};
use crate::hdd::{PathOptions, SegmentValidator};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    path: String,          // canonical separators only
    segments: Vec<String>, // empty only at index 0 (rooted path)
    options: PathOptions,
    dir_tail: bool, // raw input ended with a separator
}

impl Path {
    /// Normalizes and validates `raw`.
    ///
    /// Fails with [`Error::Construction`] if a segment is illegal, if an existing prefix is not a
    /// directory, or if the legality pattern itself cannot be built.
    pub fn new<S: AsRef<str>>(raw: S, options: PathOptions) -> Result<Self> {
        let raw = raw.as_ref();
        let path = utils::normalize_separators(raw);
        let segments = utils::split_segments(&path);
        let dir_tail = path.len() > 1 && path.ends_with(SEPARATOR);

        let built = Self {
            path,
            segments,
            options,
            dir_tail,
        };
        built
            .validate()
            .map_err(|cause| Error::construction(raw, cause))?;

        trace!("path '{}' constructed from '{}'", built.path, raw);
        Ok(built)
    }

    fn validate(&self) -> std::result::Result<(), ConstructionError> {
        let validator = SegmentValidator::new(self.options)?;
        for segment in &self.segments {
            validator.check(segment)?;
        }

        let anchor = utils::root_anchor(self.is_absolute()).map_err(ConstructionError::CurrentDir)?;
        for index in 0..self.dir_segments_count() {
            if self.segments[index].is_empty() {
                continue;
            }
            let prefix = self.rising_path(&anchor, index);
            if prefix.exists() && !prefix.is_dir() {
                return Err(ConstructionError::NonDirPrefix { prefix });
            }
        }

        Ok(())
    }

    /// Returns the normalized path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the normalized path with exactly one trailing separator. Does not modify `self`.
    pub fn path_with_separator(&self) -> String {
        let mut path = self.path.trim_end_matches(SEPARATOR).to_string();
        path.push(SEPARATOR);
        path
    }

    /// Rewrites the stored path so it ends with exactly one separator. Which segments
    /// `create_dirs` treats as directories stays as it was at construction.
    pub fn normalize_trailing_separator(&mut self) {
        self.path = self.path_with_separator();
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn options(&self) -> PathOptions {
        self.options
    }

    /// A path whose first segment is empty starts at the filesystem root.
    pub fn is_absolute(&self) -> bool {
        self.segments.first().is_some_and(|first| first.is_empty())
    }

    pub fn is_existing(&self) -> bool {
        self.as_std_path().exists()
    }

    pub fn is_not_existing(&self) -> bool {
        !self.is_existing()
    }

    pub fn is_dir(&self) -> bool {
        self.as_std_path().is_dir()
    }

    pub fn is_not_dir(&self) -> bool {
        !self.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.as_std_path().is_file()
    }

    pub fn is_not_file(&self) -> bool {
        !self.is_file()
    }

    pub fn as_std_path(&self) -> &std::path::Path {
        std::path::Path::new(&self.path)
    }

    /// Creates every missing directory on this path.
    ///
    /// The last segment is created only when `create_last_segment` is set or when the raw path
    /// ended with a separator. Calling it again on a fully created path does nothing.
    pub fn create_dirs(&self, create_last_segment: bool) -> Result<()> {
        let anchor = utils::root_anchor(self.is_absolute())?;
        let count = if create_last_segment {
            self.segments.len()
        } else {
            self.dir_segments_count()
        };

        for index in 0..count {
            if self.segments[index].is_empty() {
                continue;
            }
            let rising = self.rising_path(&anchor, index);
            if !rising.exists() {
                std::fs::create_dir(&rising)?;
                debug!("created directory {}", rising.display());
            }
        }

        Ok(())
    }

    /// Removes empty directories from the deepest segment upwards.
    ///
    /// Segments with an index lower than `starting_with_segment` are never touched. Missing
    /// directories are skipped, the first directory that still has entries (or the first entry
    /// that is not a directory) ends the walk.
    pub fn delete_empty_dirs(&self, starting_with_segment: usize) -> Result<()> {
        let anchor = utils::root_anchor(self.is_absolute())?;

        for index in (starting_with_segment..self.segments.len()).rev() {
            if self.segments[index].is_empty() {
                continue;
            }
            let rising = self.rising_path(&anchor, index);
            if !rising.exists() {
                continue;
            }
            if !rising.is_dir() || !utils::is_empty_dir(&rising)? {
                debug!("pruning stopped at {}", rising.display());
                break;
            }
            std::fs::remove_dir(&rising)?;
            debug!("removed empty directory {}", rising.display());
        }

        Ok(())
    }

    /// Number of leading segments that must be directories: all but the last one, or all of
    /// them when the raw path ended with a separator.
    fn dir_segments_count(&self) -> usize {
        if self.dir_tail {
            self.segments.len()
        } else {
            self.segments.len().saturating_sub(1)
        }
    }

    /// Host path made of `anchor` and the segments up to `index` (inclusive).
    fn rising_path(&self, anchor: &str, index: usize) -> PathBuf {
        let mut rising = String::from(anchor);
        for (idx, segment) in self.segments[..=index].iter().enumerate() {
            if idx > 0 {
                rising.push(SEPARATOR);
            }
            rising.push_str(segment);
        }
        PathBuf::from(rising)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

impl AsRef<std::path::Path> for Path {
    fn as_ref(&self) -> &std::path::Path {
        self.as_std_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path as StdPath;
    use tempdir::TempDir;

    mod creations {
        use super::*;

        #[test]
        fn test_new_normalizes_separators() {
            let forward = Path::new("a/b/c.txt", PathOptions::empty()).unwrap();
            let backward = Path::new("a\\b\\c.txt", PathOptions::empty()).unwrap();
            let mixed = Path::new("a/b\\c.txt", PathOptions::empty()).unwrap();

            let expected = ["a", "b", "c.txt"].join(&SEPARATOR.to_string());
            assert_eq!(forward.path(), expected);
            assert_eq!(backward.path(), expected);
            assert_eq!(mixed.path(), expected);
            assert_eq!(forward.segments(), backward.segments());
            assert_eq!(forward.segments(), mixed.segments());
        }

        #[test]
        fn test_new_absolute_path() {
            let path = Path::new("\\config", PathOptions::empty()).unwrap();
            assert_eq!(path.path(), format!("{SEPARATOR}config"));
            assert_eq!(path.segments(), ["", "config"]);
            assert!(path.is_absolute());

            let path = Path::new("config", PathOptions::empty()).unwrap();
            assert!(!path.is_absolute());
        }

        #[test]
        fn test_new_wrong_name() {
            let err = Path::new("wro name", PathOptions::empty()).unwrap_err();
            match err {
                Error::Construction { path, cause } => {
                    assert_eq!(path, "wro name");
                    assert!(matches!(cause, ConstructionError::InvalidSegment { .. }));
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn test_new_with_flags() {
            assert!(Path::new("my dir/zażółć", PathOptions::empty()).is_err());
            assert!(Path::new("my dir/plain", PathOptions::ALLOW_SPACES_IN_NAMES).is_ok());
            assert!(
                Path::new("my dir/zażółć", PathOptions::ALLOW_SPACES_IN_NAMES).is_err()
            );
            let all = PathOptions::ALLOW_SPACES_IN_NAMES | PathOptions::ALLOW_NATIONAL_LETTERS_NAMES;
            assert!(Path::new("my dir/zażółć", all).is_ok());
        }

        #[test]
        fn test_new_drive_letter_and_dots() {
            assert!(Path::new("C:\\work\\file.txt", PathOptions::empty()).is_ok());
            assert!(Path::new("../a/./b", PathOptions::empty()).is_ok());
        }

        #[test]
        fn test_new_through_file_fails() {
            let temp_dir = setup_test_env();
            let file = temp_dir.path().join("file.txt");
            std::fs::write(&file, "content").unwrap();

            let through = format!("{}/hello", file.display());
            let err = Path::new(&through, PathOptions::empty()).unwrap_err();
            match err.construction_cause() {
                Some(ConstructionError::NonDirPrefix { prefix }) => assert_eq!(prefix, &file),
                other => panic!("unexpected cause: {other:?}"),
            }

            let through = format!("{}/a/b", file.display());
            assert!(Path::new(&through, PathOptions::empty()).is_err());
        }

        #[test]
        fn test_new_stopping_at_file_succeeds() {
            let temp_dir = setup_test_env();
            let file = temp_dir.path().join("file.txt");
            std::fs::write(&file, "content").unwrap();

            let path = Path::new(file.to_str().unwrap(), PathOptions::empty()).unwrap();
            assert!(path.is_file());
        }

        #[test]
        fn test_new_trailing_separator_on_file_fails() {
            let temp_dir = setup_test_env();
            let file = temp_dir.path().join("file.txt");
            std::fs::write(&file, "content").unwrap();

            let raw = format!("{}/", file.display());
            assert!(Path::new(&raw, PathOptions::empty()).is_err());
        }

        #[test]
        fn test_new_nonexistent_prefixes_allowed() {
            let temp_dir = setup_test_env();
            let raw = temp_dir.path().join("x/y/z.txt");
            let path = Path::new(raw.to_str().unwrap(), PathOptions::empty()).unwrap();
            assert!(path.is_not_existing());
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn test_queries_on_dir() {
            let temp_dir = setup_test_env();
            let path = Path::new(temp_dir.path().to_str().unwrap(), PathOptions::empty()).unwrap();

            assert!(path.is_existing());
            assert!(!path.is_not_existing());
            assert!(path.is_dir());
            assert!(!path.is_not_dir());
            assert!(!path.is_file());
            assert!(path.is_not_file());
        }

        #[test]
        fn test_queries_on_file() {
            let temp_dir = setup_test_env();
            let file = temp_dir.path().join("a.txt");
            std::fs::write(&file, "").unwrap();
            let path = Path::new(file.to_str().unwrap(), PathOptions::empty()).unwrap();

            assert!(path.is_existing());
            assert!(path.is_file());
            assert!(path.is_not_dir());
        }

        #[test]
        fn test_queries_on_missing() {
            let temp_dir = setup_test_env();
            let missing = temp_dir.path().join("missing");
            let path = Path::new(missing.to_str().unwrap(), PathOptions::empty()).unwrap();

            assert!(path.is_not_existing());
            assert!(!path.is_dir());
            assert!(!path.is_file());
        }

        #[test]
        fn test_queries_are_live() {
            let temp_dir = setup_test_env();
            let dir = temp_dir.path().join("later");
            let path = Path::new(dir.to_str().unwrap(), PathOptions::empty()).unwrap();

            assert!(path.is_not_existing());
            std::fs::create_dir(&dir).unwrap();
            assert!(path.is_dir());
        }
    }

    mod separators {
        use super::*;

        #[test]
        fn test_path_with_separator_is_pure() {
            let path = Path::new("config", PathOptions::empty()).unwrap();
            assert_eq!(path.path_with_separator(), format!("config{SEPARATOR}"));
            assert_eq!(path.path(), "config");
        }

        #[test]
        fn test_normalize_trailing_separator() {
            let mut path = Path::new("config//", PathOptions::empty()).unwrap();
            path.normalize_trailing_separator();
            assert_eq!(path.path(), format!("config{SEPARATOR}"));
            assert_eq!(path.segments(), ["config"]);

            path.normalize_trailing_separator();
            assert_eq!(path.path(), format!("config{SEPARATOR}"));
        }

        #[test]
        fn test_display() {
            let path = Path::new("a\\b", PathOptions::empty()).unwrap();
            assert_eq!(path.to_string(), format!("a{SEPARATOR}b"));
        }
    }

    mod create_dirs {
        use super::*;

        #[test]
        fn test_create_dirs_skips_last_segment() {
            let temp_dir = setup_test_env();
            let target = temp_dir.path().join("a/b/c.txt");
            let path = Path::new(target.to_str().unwrap(), PathOptions::empty()).unwrap();

            path.create_dirs(false).unwrap();

            assert!(temp_dir.path().join("a/b").is_dir());
            assert!(!target.exists());
        }

        #[test]
        fn test_create_dirs_with_last_segment() {
            let temp_dir = setup_test_env();
            let target = temp_dir.path().join("a/b/c");
            let path = Path::new(target.to_str().unwrap(), PathOptions::empty()).unwrap();

            path.create_dirs(true).unwrap();

            assert!(target.is_dir());
            assert!(path.is_dir());
        }

        #[test]
        fn test_create_dirs_trailing_separator() {
            let temp_dir = setup_test_env();
            let raw = format!("{}/a/b/", temp_dir.path().display());
            let path = Path::new(&raw, PathOptions::empty()).unwrap();

            path.create_dirs(false).unwrap();

            assert!(temp_dir.path().join("a/b").is_dir());
        }

        #[test]
        fn test_create_dirs_after_normalizing_separator() {
            let temp_dir = setup_test_env();
            let target = temp_dir.path().join("x/y.txt");
            let mut path = Path::new(target.to_str().unwrap(), PathOptions::empty()).unwrap();

            path.normalize_trailing_separator();
            path.create_dirs(false).unwrap();

            assert!(temp_dir.path().join("x").is_dir());
            assert!(!target.exists());
        }

        #[test]
        fn test_create_dirs_is_idempotent() {
            let temp_dir = setup_test_env();
            let target = temp_dir.path().join("x/y/z");
            let path = Path::new(target.to_str().unwrap(), PathOptions::empty()).unwrap();

            path.create_dirs(true).unwrap();
            let first = snapshot(temp_dir.path());
            path.create_dirs(true).unwrap();
            let second = snapshot(temp_dir.path());

            assert_eq!(first, second);
        }

        #[test]
        fn test_create_dirs_relative_to_cwd() {
            let path = Path::new("a/b", PathOptions::empty()).unwrap();
            let anchor = utils::root_anchor(path.is_absolute()).unwrap();
            let expected = std::env::current_dir().unwrap().join("a");

            assert_eq!(path.rising_path(&anchor, 0), expected);
        }

        #[test]
        fn test_create_dirs_surfaces_conflicts() {
            let temp_dir = setup_test_env();
            let target = temp_dir.path().join("a/b/c");
            let path = Path::new(target.to_str().unwrap(), PathOptions::empty()).unwrap();

            // "a" turns into a file after construction
            std::fs::write(temp_dir.path().join("a"), "").unwrap();

            assert!(matches!(path.create_dirs(true), Err(Error::Io(_))));
        }
    }

    mod delete_empty_dirs {
        use super::*;

        fn deep_path(temp_dir: &TempDir) -> (Path, usize) {
            let raw = temp_dir.path().join("config/creationTest/deep/deeper/target/1234");
            let path = Path::new(raw.to_str().unwrap(), PathOptions::empty()).unwrap();
            let config_index = path
                .segments()
                .iter()
                .position(|segment| segment == "config")
                .unwrap();
            (path, config_index)
        }

        #[test]
        fn test_delete_empty_dirs_below_index() {
            let temp_dir = setup_test_env();
            let (path, config_index) = deep_path(&temp_dir);
            path.create_dirs(true).unwrap();
            assert!(path.is_dir());

            path.delete_empty_dirs(config_index + 1).unwrap();

            assert!(path.is_not_existing());
            assert!(!temp_dir.path().join("config/creationTest").exists());
            assert!(temp_dir.path().join("config").is_dir());
        }

        #[test]
        fn test_delete_empty_dirs_is_idempotent() {
            let temp_dir = setup_test_env();
            let (path, config_index) = deep_path(&temp_dir);
            path.create_dirs(true).unwrap();

            path.delete_empty_dirs(config_index + 1).unwrap();
            let first = snapshot(temp_dir.path());
            path.delete_empty_dirs(config_index + 1).unwrap();
            let second = snapshot(temp_dir.path());

            assert_eq!(first, second);
            assert!(temp_dir.path().join("config").is_dir());
        }

        #[test]
        fn test_delete_empty_dirs_stops_at_nonempty() {
            let temp_dir = setup_test_env();
            let (path, config_index) = deep_path(&temp_dir);
            path.create_dirs(true).unwrap();
            let keep = temp_dir.path().join("config/creationTest/deep/keep.txt");
            std::fs::write(&keep, "keep").unwrap();

            path.delete_empty_dirs(config_index).unwrap();

            assert!(!temp_dir.path().join("config/creationTest/deep/deeper").exists());
            assert!(keep.is_file());
            assert!(temp_dir.path().join("config/creationTest").is_dir());
            assert!(temp_dir.path().join("config").is_dir());
        }

        #[test]
        fn test_delete_empty_dirs_ignores_nonempty_target() {
            let temp_dir = setup_test_env();
            let dir = temp_dir.path().join("src");
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join("lib.rs"), "").unwrap();
            let path = Path::new(dir.to_str().unwrap(), PathOptions::empty()).unwrap();

            path.delete_empty_dirs(0).unwrap();

            assert!(dir.is_dir());
            assert!(temp_dir.path().is_dir());
        }

        #[test]
        fn test_delete_empty_dirs_never_removes_files() {
            let temp_dir = setup_test_env();
            let dir = temp_dir.path().join("a");
            std::fs::create_dir(&dir).unwrap();
            let file = dir.join("b.txt");
            std::fs::write(&file, "").unwrap();
            let path = Path::new(file.to_str().unwrap(), PathOptions::empty()).unwrap();

            path.delete_empty_dirs(0).unwrap();

            assert!(file.is_file());
        }

        #[test]
        fn test_delete_empty_dirs_partially_pruned() {
            let temp_dir = setup_test_env();
            let (path, config_index) = deep_path(&temp_dir);
            std::fs::create_dir_all(temp_dir.path().join("config/creationTest/deep")).unwrap();

            path.delete_empty_dirs(config_index + 1).unwrap();

            assert!(!temp_dir.path().join("config/creationTest").exists());
            assert!(temp_dir.path().join("config").is_dir());
        }

        #[test]
        fn test_delete_empty_dirs_index_out_of_range() {
            let temp_dir = setup_test_env();
            let (path, _) = deep_path(&temp_dir);
            path.create_dirs(true).unwrap();

            path.delete_empty_dirs(path.segments().len() + 3).unwrap();

            assert!(path.is_dir());
        }
    }

    fn snapshot(root: &StdPath) -> Vec<PathBuf> {
        let mut found = Vec::new();
        let mut pending = vec![root.to_path_buf()];
        while let Some(dir) = pending.pop() {
            for entry in std::fs::read_dir(&dir).unwrap() {
                let entry = entry.unwrap().path();
                if entry.is_dir() {
                    pending.push(entry.clone());
                }
                found.push(entry);
            }
        }
        found.sort();
        found
    }

    fn setup_test_env() -> TempDir {
        TempDir::new("hdd_path_test").unwrap()
    }
}
