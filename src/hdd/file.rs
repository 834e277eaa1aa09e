use log::debug;

use crate::core::utils::LINE_SEPARATOR;
use crate::core::{ConstructionError, Error, ResourceKind, Result};
use crate::hdd::{Path, PathOptions};

/// A file path paired with an in-memory buffer.
///
/// The buffer only changes through `set_contents`, `read`, `read_if_exists` and the append
/// methods; external changes to the file are not noticed. Nothing here is atomic: `append` is a
/// read-modify-write with no locking.
///
/// ### Example:
/// ```no_run
/// use hdd_kit::{File, PathOptions};
///
/// let mut file = File::new("config/file.txt", PathOptions::empty()).unwrap();
/// file.set_contents("test");
/// file.save().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct File {
    path: Path,
    contents: String,
}

impl File {
    /// Fails if `raw` is not a valid path or denotes an existing directory.
    pub fn new<S: AsRef<str>>(raw: S, options: PathOptions) -> Result<Self> {
        let raw = raw.as_ref();
        let path = Path::new(raw, options)?;
        if path.is_dir() {
            return Err(Error::construction(raw, ConstructionError::IsADirectory));
        }
        Ok(Self {
            path,
            contents: String::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_contents<S: Into<String>>(&mut self, contents: S) -> &mut Self {
        self.contents = contents.into();
        self
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Replaces the buffer with the contents of the file.
    /// * `Error::ResourceMissing` if nothing exists at the path.
    /// * `Error::WrongKind` if something other than a file exists there.
    /// * `Error::Io` with `InvalidData` if the file is not valid UTF-8; the buffer is left as it
    ///   was.
    pub fn read(&mut self) -> Result<&str> {
        if self.path.is_not_existing() {
            return Err(Error::ResourceMissing(self.path.as_std_path().to_path_buf()));
        }
        if self.path.is_not_file() {
            return Err(self.not_a_file());
        }
        self.contents = std::fs::read_to_string(&self.path)?;
        Ok(&self.contents)
    }

    /// Like `read`, but a missing file empties the buffer instead of failing.
    pub fn read_if_exists(&mut self) -> Result<&str> {
        if self.path.is_file() {
            return self.read();
        }
        self.contents.clear();
        Ok(&self.contents)
    }

    /// Writes the buffer to the file, replacing its contents. Missing parent directories are
    /// created first.
    pub fn save(&self) -> Result<()> {
        if self.path.is_not_existing() {
            self.path.create_dirs(false)?;
        } else if self.path.is_dir() {
            return Err(self.not_a_file());
        }
        std::fs::write(&self.path, &self.contents)?;
        debug!("saved {} ({} bytes)", self.path, self.contents.len());
        Ok(())
    }

    /// Reloads the file (if any), appends `contents` to the buffer and saves it.
    pub fn append(&mut self, contents: &str) -> Result<()> {
        self.read_if_exists()?;
        self.contents.push_str(contents);
        self.save()
    }

    /// Same as `append`, with a line separator put before `contents`.
    pub fn append_line(&mut self, contents: &str) -> Result<()> {
        self.append(&format!("{LINE_SEPARATOR}{contents}"))
    }

    pub fn delete(&self) -> Result<()> {
        if self.path.is_not_existing() {
            return Err(Error::ResourceMissing(self.path.as_std_path().to_path_buf()));
        }
        if self.path.is_dir() {
            return Err(self.not_a_file());
        }
        std::fs::remove_file(&self.path)?;
        debug!("deleted {}", self.path);
        Ok(())
    }

    pub fn delete_if_exists(&self) -> Result<()> {
        if self.path.is_existing() {
            self.delete()?;
        }
        Ok(())
    }

    /// Saves the buffer as a new file. Fails with `Error::AlreadyExists` if anything exists at
    /// the path.
    pub fn create(&self) -> Result<()> {
        if self.path.is_existing() {
            return Err(Error::AlreadyExists(self.path.as_std_path().to_path_buf()));
        }
        self.save()
    }

    fn not_a_file(&self) -> Error {
        Error::WrongKind {
            path: self.path.as_std_path().to_path_buf(),
            expected: ResourceKind::File,
        }
    }
}

impl AsRef<Path> for File {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
