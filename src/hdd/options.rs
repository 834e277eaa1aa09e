use bitflags::bitflags;

bitflags! {
    /// Construction options of a `Path`, `Dir` or `File`.
    ///
    /// The flags only affect segment validation and directory scans. They are fixed once the
    /// value is constructed.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct PathOptions: u32 {
        /// Reserved. Segments made of dots (`.`, `..`) are always accepted.
        const ALLOW_DIR_DOTS = 1;
        /// Accepts non-ASCII letters in segments.
        const ALLOW_NATIONAL_LETTERS_NAMES = 2;
        /// Accepts spaces in segments.
        const ALLOW_SPACES_IN_NAMES = 4;
        /// `Dir` scans descend into subdirectories.
        const DIR_READ_RECURSIVELY = 8;
        /// `Dir` scans leave directories out of the results.
        const DIR_READ_IGNORE_DIRS = 16;
        /// `Dir` scans leave files out of the results.
        const DIR_READ_IGNORE_FILES = 32;
    }
}

impl PathOptions {
    /// Decodes an integer bitmask. Bits that name no option are ignored.
    pub const fn decode(bitmask: u32) -> Self {
        Self::from_bits_truncate(bitmask)
    }

    pub const fn reads_recursively(&self) -> bool {
        self.contains(Self::DIR_READ_RECURSIVELY)
    }

    pub const fn ignores_dirs(&self) -> bool {
        self.contains(Self::DIR_READ_IGNORE_DIRS)
    }

    pub const fn ignores_files(&self) -> bool {
        self.contains(Self::DIR_READ_IGNORE_FILES)
    }
}
