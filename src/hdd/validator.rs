use regex::Regex;

use crate::core::ConstructionError;
use crate::hdd::PathOptions;

/// Checks path segments against the legality pattern selected by a set of options.
///
/// The base class is `[A-Za-z0-9_\-.:]`; the colon is always accepted so drive letters pass.
/// `ALLOW_NATIONAL_LETTERS_NAMES` adds every Unicode letter and `ALLOW_SPACES_IN_NAMES` adds a
/// literal space. The whole segment must match.
#[derive(Debug, Clone)]
pub struct SegmentValidator {
    pattern: Regex,
}

impl SegmentValidator {
    pub fn new(options: PathOptions) -> Result<Self, ConstructionError> {
        let pattern =
            Regex::new(&Self::pattern_source(options)).map_err(ConstructionError::PatternEngine)?;
        Ok(Self { pattern })
    }

    fn pattern_source(options: PathOptions) -> String {
        let mut class = String::from(r"A-Za-z0-9_\-.:");
        if options.contains(PathOptions::ALLOW_NATIONAL_LETTERS_NAMES) {
            class.push_str(r"\p{L}");
        }
        if options.contains(PathOptions::ALLOW_SPACES_IN_NAMES) {
            class.push(' ');
        }
        format!("^[{class}]+$")
    }

    /// Empty segments are always legal.
    pub fn is_legal(&self, segment: &str) -> bool {
        segment.is_empty() || self.pattern.is_match(segment)
    }

    pub fn check(&self, segment: &str) -> Result<(), ConstructionError> {
        if self.is_legal(segment) {
            Ok(())
        } else {
            Err(ConstructionError::InvalidSegment {
                segment: segment.to_string(),
            })
        }
    }
}
