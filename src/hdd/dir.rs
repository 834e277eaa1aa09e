//! Directory listings built on top of a validated [`Path`].
//!
//! A [`Dir`] scans its directory (optionally recursively) into an ordered list of [`Element`]s.
//! The scan result is cached: counting and mtime annotation reuse it, only [`Dir::read`] replaces
//! it with a fresh scan. Changes made to the filesystem in the meantime are not seen until the
//! next `read`.

use glob::Pattern;
use log::{debug, trace, warn};

use crate::core::utils::{self, SEPARATOR};
use crate::core::{ConstructionError, Error, Result};
use crate::hdd::{Element, ElementKind, Path, PathOptions};

/// Cached result of the last scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ScanState {
    #[default]
    NotScanned,
    Scanned(Vec<Element>),
}

#[derive(Debug, Clone)]
pub struct Dir {
    path: Path,
    scan: ScanState,
}

impl Dir {
    /// Creates a `Dir` for an existing directory.
    ///
    /// Scan behavior follows the `DIR_READ_*` flags of `options`.
    pub fn new<S: AsRef<str>>(raw: S, options: PathOptions) -> Result<Self> {
        let raw = raw.as_ref();
        let path = Path::new(raw, options)?;
        if !path.is_dir() {
            return Err(Error::construction(raw, ConstructionError::NotADirectory));
        }
        Ok(Self {
            path,
            scan: ScanState::NotScanned,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn scan_state(&self) -> &ScanState {
        &self.scan
    }

    pub fn is_scanned(&self) -> bool {
        matches!(self.scan, ScanState::Scanned(_))
    }

    /// Elements of the last scan in scan order, `None` before the first scan.
    pub fn elements(&self) -> Option<&[Element]> {
        match &self.scan {
            ScanState::NotScanned => None,
            ScanState::Scanned(elements) => Some(elements),
        }
    }

    pub fn element(&self, uri: &str) -> Option<&Element> {
        self.elements()?.iter().find(|element| element.uri() == uri)
    }

    /// Scans the directory again and returns the relative URIs of everything found.
    ///
    /// With a non-empty `mask` only entries whose URI matches it are kept, both in the result and
    /// in the cache. Masks use [`glob::Pattern`] syntax (`[!a]` negates a class, `**` must be a
    /// whole segment), and `*` also matches the separator. A directory is listed before its own
    /// contents; sibling order follows the host's directory listing.
    pub fn read(&mut self, mask: Option<&str>) -> Result<Vec<String>> {
        let mask = compile_mask(mask)?;

        let mut elements = Vec::new();
        self.read_raw("", &mut elements)?;
        if let Some(mask) = &mask {
            elements.retain(|element| mask.matches(element.uri()));
        }
        debug!(
            "scanned {}: {} element(s) kept",
            self.path,
            elements.len()
        );

        let uris = elements.iter().map(|e| e.uri().to_string()).collect();
        self.scan = ScanState::Scanned(elements);
        Ok(uris)
    }

    /// Counts cached elements matching `mask` and the kind filters.
    ///
    /// Scans once if nothing is cached yet, otherwise reuses the cache as it is. The cache is
    /// never modified. With both `only_files` and `only_dirs` unset every kind is counted.
    /// `mask` has the same syntax as in [`Dir::read`].
    pub fn count(&mut self, mask: Option<&str>, only_files: bool, only_dirs: bool) -> Result<usize> {
        let mask = compile_mask(mask)?;
        self.ensure_scanned()?;

        let elements = self.elements().unwrap_or_default();
        Ok(elements
            .iter()
            .filter(|element| !only_dirs || element.is_dir())
            .filter(|element| !only_files || element.is_file())
            .filter(|element| mask.as_ref().is_none_or(|mask| mask.matches(element.uri())))
            .count())
    }

    pub fn count_files(&mut self, mask: Option<&str>) -> Result<usize> {
        self.count(mask, true, false)
    }

    pub fn count_dirs(&mut self, mask: Option<&str>) -> Result<usize> {
        self.count(mask, false, true)
    }

    /// Attaches the last modification time to every cached file and returns the cache.
    /// Directories are left as they are.
    pub fn add_files_mtimes(&mut self) -> Result<&[Element]> {
        self.ensure_scanned()?;

        let root = self.path.as_std_path().to_path_buf();
        if let ScanState::Scanned(elements) = &mut self.scan {
            for element in elements.iter_mut().filter(|element| element.is_file()) {
                let modified = std::fs::metadata(root.join(element.uri()))?.modified()?;
                let (epoch, formatted) = utils::mtime_parts(modified);
                element.set_mtime(epoch, formatted);
            }
        }

        Ok(self.elements().unwrap_or_default())
    }

    fn ensure_scanned(&mut self) -> Result<()> {
        if !self.is_scanned() {
            self.read(None)?;
        }
        Ok(())
    }

    /// Appends entries below `deeper` (relative to the root of this `Dir`) to `out`.
    ///
    /// An entry comes before its children. Entries that are neither files nor directories
    /// (e.g. broken links) are never reported.
    fn read_raw(&self, deeper: &str, out: &mut Vec<Element>) -> Result<()> {
        let options = self.path.options();
        let host_dir = self.path.as_std_path().join(deeper);

        for entry in std::fs::read_dir(&host_dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(name) => {
                    warn!("skipping non UTF-8 entry {:?} in {}", name, host_dir.display());
                    continue;
                }
            };
            let uri = if deeper.is_empty() {
                name
            } else {
                format!("{deeper}{SEPARATOR}{name}")
            };

            let host = entry.path();
            let kind = if host.is_dir() {
                ElementKind::Directory
            } else if host.is_file() {
                ElementKind::File
            } else {
                trace!("skipping {uri}: neither a file nor a directory");
                continue;
            };

            let ignored = match kind {
                ElementKind::Directory => options.ignores_dirs(),
                ElementKind::File => options.ignores_files(),
            };
            if !ignored {
                trace!("found {uri}");
                out.push(Element::new(uri.clone(), kind));
            }

            if kind == ElementKind::Directory && options.reads_recursively() {
                self.read_raw(&uri, out)?;
            }
        }

        Ok(())
    }
}

impl AsRef<Path> for Dir {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// An empty mask means "no mask".
fn compile_mask(mask: Option<&str>) -> Result<Option<Pattern>> {
    match mask {
        None | Some("") => Ok(None),
        Some(mask) => Pattern::new(mask)
            .map(Some)
            .map_err(|source| Error::InvalidMask {
                mask: mask.to_string(),
                source,
            }),
    }
}
