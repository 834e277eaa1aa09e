mod dir;
mod entry;
mod file;
mod options;
mod path;
mod validator;

pub use dir::{Dir, ScanState};
pub use entry::{Element, ElementKind};
pub use file::File;
pub use options::PathOptions;
pub use path::Path;
pub use validator::SegmentValidator;
