//! A small toolkit over the host filesystem: validated paths, directory scans and buffered files.
//!
//! ### Overview
//!
//! `hdd-kit` wraps three things most build, config and asset scripts end up writing by hand:
//! - [`Path`]: a path string with `/` and `\` normalized to the platform separator, validated
//!   segment by segment, able to create its missing directories and to prune empty ones.
//! - [`Dir`]: a directory scanned (flat or recursively) into a cached, glob-filterable list of
//!   [`Element`]s with counts and modification times.
//! - [`File`]: a path with an in-memory buffer and read / save / append / create / delete calls.
//!
//! **Key ideas**:
//! - **Validation up front**: illegal segment names and paths running through regular files are
//!   rejected when the value is constructed, not when it is used.
//! - **Typed options**: construction flags are a [`PathOptions`] set instead of a bare integer.
//! - **Typed errors**: every failure is an [`Error`] variant; construction errors keep their cause.
//! - **Single-threaded**: no locking is done, concurrent writers to the same file will race.
//!
//! ### Example:
//! ```no_run
//! use hdd_kit::{Dir, File, PathOptions};
//!
//! let mut file = File::new("assets/notes/todo.txt", PathOptions::empty()).unwrap();
//! file.set_contents("first").save().unwrap();
//! file.append_line("second").unwrap();
//!
//! let mut dir = Dir::new("assets", PathOptions::DIR_READ_RECURSIVELY).unwrap();
//! let texts = dir.read(Some("*.txt")).unwrap();
//! assert_eq!(texts.len(), 1);
//! ```

mod core;
mod hdd;

pub use crate::core::{ConstructionError, Error, ResourceKind, Result};
pub use crate::hdd::{Dir, Element, ElementKind, File, Path, PathOptions, ScanState, SegmentValidator};
