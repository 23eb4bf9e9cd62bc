/// Arena node storage for [`RankTree`](super::RankTree).
///
/// Nodes live in a flat `Vec<Node<K>>` and reference each other through
/// `NodeIndex` handles rather than owning pointers. Parent links are plain
/// back-references, so a rotation is a handful of index swaps with no
/// ownership juggling and no risk of a dangling node.
///
/// There is no sentinel "nil" node: absent children and the root's absent
/// parent are `Option<NodeIndex>`, and an absent node is Black by
/// definition with subtree size 0.

/// Lightweight handle into the arena `Vec<Node<K>>`.
///
/// Uses `u32` to keep nodes small — supports up to ~4 billion stored keys,
/// far beyond any realistic statistics run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(u32);

impl NodeIndex {
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "NodeIndex overflow");
        Self(index as u32)
    }

    /// Return the handle as a `usize` for Vec indexing.
    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Node color for red-black balancing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// One stored key plus its structural links and augmentation.
///
/// `size` counts the keys in the subtree rooted here, inclusive. It is
/// maintained incrementally by insert/delete/rotation in the same pass as
/// the structural change; nothing ever recomputes it from scratch.
#[derive(Debug)]
pub(crate) struct Node<K> {
    pub key: K,
    pub color: Color,
    pub parent: Option<NodeIndex>,
    pub left: Option<NodeIndex>,
    pub right: Option<NodeIndex>,
    pub size: usize,
}

impl<K> Node<K> {
    /// A freshly inserted node: Red, detached, subtree of one.
    pub fn new(key: K) -> Self {
        Self {
            key,
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
            size: 1,
        }
    }
}
