//! Identifier paths shared by both hierarchies.
//!
//! A path names a node in a hierarchy by joining the component identifiers
//! from the root down, e.g. `:form:row:name`. The root itself is the empty
//! path; every non-root path starts with the separator. Both hierarchy
//! builders index by these strings, which is what lets a class-side path be
//! looked up directly in the markup-side index.

/// Separator between identifiers in a hierarchy path.
pub const PATH_SEPARATOR: char = ':';

/// Join a parent path and a child identifier.
pub fn join(parent: &str, key: &str) -> String {
    let mut path = String::with_capacity(parent.len() + key.len() + 1);
    path.push_str(parent);
    path.push(PATH_SEPARATOR);
    path.push_str(key);
    path
}

/// The parent of a path: everything before the last separator.
///
/// Top-level paths (`:x`) have the root (empty) path as parent; the root's
/// parent is the root itself.
pub fn parent(path: &str) -> &str {
    match path.rfind(PATH_SEPARATOR) {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The final identifier of a path, if any.
pub fn last_segment(path: &str) -> Option<&str> {
    path.rfind(PATH_SEPARATOR).map(|idx| &path[idx + 1..])
}

/// An append/truncate path accumulator for hierarchy walks.
///
/// Walks push an identifier on the way down and restore the saved length on
/// the way back up, so one buffer serves the whole traversal.
#[derive(Debug, Default)]
pub struct PathBuilder {
    buf: String,
}

impl PathBuilder {
    /// Create an empty (root) path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a separator and identifier, returning the length to restore
    /// when leaving this node.
    pub fn push(&mut self, key: &str) -> usize {
        let mark = self.buf.len();
        self.buf.push(PATH_SEPARATOR);
        self.buf.push_str(key);
        mark
    }

    /// Restore a length previously returned by [`PathBuilder::push`].
    pub fn truncate(&mut self, mark: usize) {
        self.buf.truncate(mark);
    }

    /// The current path.
    pub fn as_str(&self) -> &str {
        &self.buf
    }
}
