//! The shared named-tree shape of both hierarchies.
//!
//! Class-side and markup-side hierarchies differ only in what a node's
//! references point at, so both are an [`ItemTree`] over their own
//! reference type. Items live in an arena and the path index maps every
//! registered path (including the empty root path) to its item in O(1);
//! index iteration follows registration order, which keeps downstream
//! scans deterministic.

use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

/// Id of an item within one [`ItemTree`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

/// One node of a hierarchy.
#[derive(Clone, Debug)]
pub struct ItemData<R> {
    /// The component identifier; empty only on the root.
    pub key: SmolStr,
    /// Children in first-encountered order, keys unique among siblings.
    pub children: Vec<ItemId>,
    /// The source occurrences that produced this node.
    pub references: Vec<R>,
}

/// A named tree plus its path index.
#[derive(Clone, Debug)]
pub struct ItemTree<R> {
    items: Vec<ItemData<R>>,
    index: IndexMap<String, ItemId>,
}

impl<R> ItemTree<R> {
    /// The root item, present in every tree under the empty path.
    pub const ROOT: ItemId = ItemId(0);

    /// Create a tree holding only the root.
    pub fn new() -> Self {
        let mut index = IndexMap::new();
        index.insert(String::new(), Self::ROOT);
        Self {
            items: vec![ItemData {
                key: SmolStr::default(),
                children: Vec::new(),
                references: Vec::new(),
            }],
            index,
        }
    }

    /// Get an item.
    pub fn item(&self, id: ItemId) -> &ItemData<R> {
        &self.items[id.index()]
    }

    /// The root item.
    pub fn root(&self) -> &ItemData<R> {
        self.item(Self::ROOT)
    }

    /// Look up an item by its full path.
    pub fn lookup(&self, path: &str) -> Option<ItemId> {
        self.index.get(path).copied()
    }

    /// Find a direct child by key.
    pub fn find_child(&self, parent: ItemId, key: &str) -> Option<ItemId> {
        self.item(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.item(c).key == key)
    }

    /// Find a child by key, creating and indexing it at `path` when absent.
    pub fn find_or_create_child(&mut self, path: &str, parent: ItemId, key: &str) -> ItemId {
        if let Some(existing) = self.find_child(parent, key) {
            return existing;
        }
        let id = ItemId(self.items.len() as u32);
        self.items.push(ItemData {
            key: SmolStr::new(key),
            children: Vec::new(),
            references: Vec::new(),
        });
        self.items[parent.index()].children.push(id);
        self.index.insert(path.to_owned(), id);
        id
    }

    /// Record a source occurrence on an item.
    pub fn add_reference(&mut self, item: ItemId, reference: R) {
        self.items[item.index()].references.push(reference);
    }

    /// All indexed paths with their items, in registration order.
    pub fn paths(&self) -> impl Iterator<Item = (&str, ItemId)> {
        self.index.iter().map(|(path, &id)| (path.as_str(), id))
    }

    /// Number of indexed paths, the root included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True when only the root exists.
    pub fn is_empty(&self) -> bool {
        self.index.len() == 1
    }
}

impl<R> Default for ItemTree<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_or_create_is_idempotent() {
        let mut tree: ItemTree<u32> = ItemTree::new();
        let a = tree.find_or_create_child(":form", ItemTree::<u32>::ROOT, "form");
        let b = tree.find_or_create_child(":form", ItemTree::<u32>::ROOT, "form");

        assert_eq!(a, b);
        assert_eq!(tree.root().children.len(), 1);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree: ItemTree<u32> = ItemTree::new();
        for key in ["c", "a", "b"] {
            let path = format!(":{key}");
            tree.find_or_create_child(&path, ItemTree::<u32>::ROOT, key);
        }

        let keys: Vec<_> = tree
            .root()
            .children
            .iter()
            .map(|&c| tree.item(c).key.as_str().to_owned())
            .collect();
        assert_eq!(keys, ["c", "a", "b"]);
    }

    #[test]
    fn test_lookup_by_path() {
        let mut tree: ItemTree<u32> = ItemTree::new();
        let form = tree.find_or_create_child(":form", ItemTree::<u32>::ROOT, "form");
        let name = tree.find_or_create_child(":form:name", form, "name");
        tree.add_reference(name, 7);

        assert_eq!(tree.lookup(""), Some(ItemTree::<u32>::ROOT));
        assert_eq!(tree.lookup(":form:name"), Some(name));
        assert_eq!(tree.item(name).references, [7]);
        assert_eq!(tree.lookup(":missing"), None);
    }
}
