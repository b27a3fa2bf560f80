//! File identifiers for source and markup files.

use std::fmt;

/// A lightweight handle identifying one file of the analyzed pair
/// (a component class source file or its markup document).
///
/// The host editor assigns ids; this crate only carries them on locations
/// so results can be routed back to the right document. Comparisons and
/// hashing are O(1), and the handle is 4 bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    /// Create a FileId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_equality() {
        assert_eq!(FileId::new(3), FileId::new(3));
        assert_ne!(FileId::new(3), FileId::new(4));
    }

    #[test]
    fn test_file_id_display() {
        assert_eq!(format!("{}", FileId::new(7)), "file#7");
    }

    #[test]
    fn test_file_id_size() {
        assert_eq!(std::mem::size_of::<FileId>(), 4);
    }
}
