use std::path::{MAIN_SEPARATOR, Path};
use std::time::SystemTime;

use chrono::{DateTime, Local};

/// Canonical separator every stored path uses.
pub const SEPARATOR: char = MAIN_SEPARATOR;

/// Line separator used by `File::append_line`.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

const MTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Replaces both `/` and `\` with the canonical separator.
pub fn normalize_separators(raw: &str) -> String {
    raw.chars()
        .map(|ch| match ch {
            '/' | '\\' => SEPARATOR,
            other => other,
        })
        .collect()
}

/// Splits a normalized path into segments. A leading empty segment is kept (it marks a rooted
/// path), every other empty segment is dropped.
pub fn split_segments(normalized: &str) -> Vec<String> {
    normalized
        .split(SEPARATOR)
        .enumerate()
        .filter(|(idx, segment)| *idx == 0 || !segment.is_empty())
        .map(|(_, segment)| segment.to_string())
        .collect()
}

/// Returns the string every relative path is resolved against: empty for rooted paths, the
/// current working directory with exactly one trailing separator otherwise.
pub fn root_anchor(is_absolute: bool) -> std::io::Result<String> {
    if is_absolute {
        return Ok(String::new());
    }
    let cwd = std::env::current_dir()?;
    let mut anchor = cwd.to_string_lossy().trim_end_matches(SEPARATOR).to_string();
    anchor.push(SEPARATOR);
    Ok(anchor)
}

/// Returns true if the directory has no entries besides `.` and `..`.
pub fn is_empty_dir<P: AsRef<Path>>(path: P) -> std::io::Result<bool> {
    Ok(std::fs::read_dir(path)?.next().is_none())
}

/// Converts a modification time into epoch seconds and its local `YYYY-MM-DD HH:MM:SS` form.
pub fn mtime_parts(mtime: SystemTime) -> (i64, String) {
    let local: DateTime<Local> = mtime.into();
    (local.timestamp(), local.format(MTIME_FORMAT).to_string())
}
