#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementKind {
    File,
    Directory,
}

/// One entry found by a `Dir` scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    uri: String, // relative to the scanned directory, canonical separators
    kind: ElementKind,
    mtime: Option<i64>,
    mtime_formatted: Option<String>,
}

impl Element {
    pub fn new<S: Into<String>>(uri: S, kind: ElementKind) -> Element {
        Element {
            uri: uri.into(),
            kind,
            mtime: None,
            mtime_formatted: None,
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_file(&self) -> bool {
        self.kind == ElementKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == ElementKind::Directory
    }

    /// Last modification time in epoch seconds, set by `Dir::add_files_mtimes` for files.
    pub fn mtime(&self) -> Option<i64> {
        self.mtime
    }

    /// Last modification time as `YYYY-MM-DD HH:MM:SS` (local time).
    pub fn mtime_formatted(&self) -> Option<&str> {
        self.mtime_formatted.as_deref()
    }

    pub(crate) fn set_mtime(&mut self, epoch: i64, formatted: String) {
        self.mtime = Some(epoch);
        self.mtime_formatted = Some(formatted);
    }
}
