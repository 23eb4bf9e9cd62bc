/// Order-statistics tree — the ranking engine behind every "top N" report.
///
/// [`RankTree`] is a red-black tree augmented with per-node subtree sizes,
/// stored in a flat arena (see [`node`]) and generic over a caller-supplied
/// total order. It maintains O(log n) insert/delete and answers "i-th
/// smallest" queries in O(log n) via the size augmentation, which a plain
/// sorted vector cannot do under interleaved mutation.
///
/// [`TopK`](top_k::TopK) layers a fixed-capacity eviction policy on top so
/// that an unbounded stream of observations can be reduced to its K
/// greatest entries in O(K) memory.
///
/// The intended discipline is feed-then-query: populate the structure from
/// a stream, then traverse or rank-select. Queries never mutate, and the
/// usual `&`/`&mut` rules give one logical writer per instance.
mod node;
pub mod top_k;

pub use top_k::TopK;

use node::{Color, Node, NodeIndex};
use thiserror::Error;

/// Strict total order over keys stored in a [`RankTree`].
///
/// For any two keys exactly one of `a.less_than(b)`, `b.less_than(a)`,
/// `a.equal_to(b)` must hold. Keys comparing `equal_to` are permitted in
/// the same tree and are kept as distinct entries; the tree never
/// deduplicates. A comparator that violates the contract (for example,
/// both `a < b` and `b < a`) is a programming error and yields unspecified
/// ordering, not a runtime failure.
pub trait TotalOrder {
    fn less_than(&self, other: &Self) -> bool;
    fn equal_to(&self, other: &Self) -> bool;
}

/// Errors surfaced by [`RankTree`] operations.
///
/// Both variants are pure functions of the arguments and are expected to
/// be handled locally by callers; in normal report generation neither
/// occurs (collectors only delete keys they just observed as the tracked
/// minimum and only select ranks within `1..=len`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// `delete` was called with a key absent from the tree.
    #[error("key not found in tree")]
    NotFound,
    /// `select` was called with a rank outside `1..=len`.
    #[error("rank {rank} out of range 1..={len}")]
    RankOutOfRange { rank: usize, len: usize },
}

/// Arena-backed red-black tree with subtree-size augmentation.
///
/// Callers only ever see keys; node handles stay internal to the arena.
/// Slots vacated by deletions are recycled through a free list, so a
/// structure that deletes as often as it inserts (the top-K eviction
/// pattern) never grows past its peak population.
#[derive(Debug)]
pub struct RankTree<K> {
    nodes: Vec<Node<K>>,
    free: Vec<NodeIndex>,
    root: Option<NodeIndex>,
}

impl<K> Default for RankTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RankTree<K> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
        }
    }

    /// Number of keys currently stored — the root's augmented size.
    #[inline]
    pub fn len(&self) -> usize {
        self.root.map_or(0, |r| self.nodes[r.idx()].size)
    }

    /// Returns `true` if the tree holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    fn subtree_size(&self, n: Option<NodeIndex>) -> usize {
        n.map_or(0, |i| self.nodes[i.idx()].size)
    }

    /// Absent nodes are Black by definition.
    #[inline]
    fn color_of(&self, n: Option<NodeIndex>) -> Color {
        n.map_or(Color::Black, |i| self.nodes[i.idx()].color)
    }

    fn min_node(&self, from: NodeIndex) -> NodeIndex {
        let mut x = from;
        while let Some(l) = self.nodes[x.idx()].left {
            x = l;
        }
        x
    }

    fn max_node(&self, from: NodeIndex) -> NodeIndex {
        let mut x = from;
        while let Some(r) = self.nodes[x.idx()].right {
            x = r;
        }
        x
    }

    /// In-order successor: right subtree's minimum, else the first ancestor
    /// reached from a left child.
    fn successor(&self, n: NodeIndex) -> Option<NodeIndex> {
        if let Some(r) = self.nodes[n.idx()].right {
            return Some(self.min_node(r));
        }
        let mut child = n;
        let mut parent = self.nodes[n.idx()].parent;
        while let Some(p) = parent {
            if self.nodes[p.idx()].left == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.nodes[p.idx()].parent;
        }
        None
    }

    /// Mirror of [`successor`](Self::successor).
    fn predecessor(&self, n: NodeIndex) -> Option<NodeIndex> {
        if let Some(l) = self.nodes[n.idx()].left {
            return Some(self.max_node(l));
        }
        let mut child = n;
        let mut parent = self.nodes[n.idx()].parent;
        while let Some(p) = parent {
            if self.nodes[p.idx()].right == Some(child) {
                return Some(p);
            }
            child = p;
            parent = self.nodes[p.idx()].parent;
        }
        None
    }

    /// Allocate a slot for `key`, reusing a freed one when available.
    fn alloc(&mut self, key: K) -> NodeIndex {
        match self.free.pop() {
            Some(i) => {
                self.nodes[i.idx()] = Node::new(key);
                i
            }
            None => {
                let i = NodeIndex::new(self.nodes.len());
                self.nodes.push(Node::new(key));
                i
            }
        }
    }

    /// Return a slot to the free list. The stale contents are overwritten
    /// on the next [`alloc`](Self::alloc).
    fn release(&mut self, i: NodeIndex) {
        self.free.push(i);
    }

    /// Smallest key, if any.
    pub fn minimum(&self) -> Option<&K> {
        self.root
            .map(|r| &self.nodes[self.min_node(r).idx()].key)
    }

    /// Largest key, if any.
    pub fn maximum(&self) -> Option<&K> {
        self.root
            .map(|r| &self.nodes[self.max_node(r).idx()].key)
    }

    /// Ascending in-order walk. The visitor returns `true` to continue or
    /// `false` to stop early.
    pub fn walk_in_order<F: FnMut(&K) -> bool>(&self, mut visit: F) {
        let mut cur = self.root.map(|r| self.min_node(r));
        while let Some(n) = cur {
            if !visit(&self.nodes[n.idx()].key) {
                return;
            }
            cur = self.successor(n);
        }
    }

    /// Descending walk, maximum first. The visitor returns `true` to
    /// continue or `false` to stop early.
    pub fn walk_descending<F: FnMut(&K) -> bool>(&self, mut visit: F) {
        let mut cur = self.root.map(|r| self.max_node(r));
        while let Some(n) = cur {
            if !visit(&self.nodes[n.idx()].key) {
                return;
            }
            cur = self.predecessor(n);
        }
    }

    /// Pre-order walk (node, left, right) for structural export and
    /// debugging. Carries no ordering guarantee over keys.
    pub fn walk_pre_order<F: FnMut(&K) -> bool>(&self, mut visit: F) {
        let mut stack = Vec::new();
        if let Some(r) = self.root {
            stack.push(r);
        }
        while let Some(n) = stack.pop() {
            if !visit(&self.nodes[n.idx()].key) {
                return;
            }
            if let Some(r) = self.nodes[n.idx()].right {
                stack.push(r);
            }
            if let Some(l) = self.nodes[n.idx()].left {
                stack.push(l);
            }
        }
    }
}

impl<K: TotalOrder> RankTree<K> {
    /// Insert `key`, keeping duplicates: a key equal to an existing one is
    /// placed after it (descends right).
    ///
    /// Every node on the descent path has its subtree size incremented in
    /// the same pass, then the standard recolor/rotate fixup restores the
    /// red-black invariants bottom-up.
    pub fn insert(&mut self, key: K) {
        let z = self.alloc(key);
        let mut parent: Option<NodeIndex> = None;
        let mut cursor = self.root;
        while let Some(c) = cursor {
            parent = Some(c);
            self.nodes[c.idx()].size += 1;
            cursor = if self.nodes[z.idx()].key.less_than(&self.nodes[c.idx()].key) {
                self.nodes[c.idx()].left
            } else {
                self.nodes[c.idx()].right
            };
        }
        self.nodes[z.idx()].parent = parent;
        match parent {
            None => self.root = Some(z),
            Some(p) => {
                if self.nodes[z.idx()].key.less_than(&self.nodes[p.idx()].key) {
                    self.nodes[p.idx()].left = Some(z);
                } else {
                    self.nodes[p.idx()].right = Some(z);
                }
            }
        }
        self.insert_fixup(z);
    }

    /// Remove one key comparing `equal_to(key)`.
    ///
    /// With duplicates present, the occupant found first on the search
    /// path is removed; which duplicate that is carries no guarantee.
    pub fn delete(&mut self, key: &K) -> Result<(), TreeError> {
        let z = self.find(key).ok_or(TreeError::NotFound)?;
        self.remove_at(z);
        Ok(())
    }

    /// Remove the current minimum. No-op on an empty tree.
    pub(crate) fn delete_min(&mut self) {
        if let Some(r) = self.root {
            let m = self.min_node(r);
            self.remove_at(m);
        }
    }

    /// Order-statistic lookup: the `rank`-th smallest key, 1-indexed.
    ///
    /// O(log n): at each node the left subtree size decides whether the
    /// target is the node itself, to its left, or to its right with a
    /// reduced rank.
    pub fn select(&self, rank: usize) -> Result<&K, TreeError> {
        let len = self.len();
        if rank == 0 || rank > len {
            return Err(TreeError::RankOutOfRange { rank, len });
        }
        let mut cursor = self.root;
        let mut i = rank;
        while let Some(c) = cursor {
            let node = &self.nodes[c.idx()];
            let r = self.subtree_size(node.left) + 1;
            if i == r {
                return Ok(&node.key);
            }
            if i < r {
                cursor = node.left;
            } else {
                i -= r;
                cursor = node.right;
            }
        }
        // Unreachable while the size augmentation is consistent.
        Err(TreeError::RankOutOfRange { rank, len })
    }

    fn find(&self, key: &K) -> Option<NodeIndex> {
        let mut cursor = self.root;
        while let Some(c) = cursor {
            let node = &self.nodes[c.idx()];
            if key.equal_to(&node.key) {
                return Some(c);
            }
            cursor = if key.less_than(&node.key) {
                node.left
            } else {
                node.right
            };
        }
        None
    }

    fn insert_fixup(&mut self, mut z: NodeIndex) {
        loop {
            let Some(p) = self.nodes[z.idx()].parent else { break };
            if self.nodes[p.idx()].color == Color::Black {
                break;
            }
            // A Red parent is never the root, so the grandparent exists.
            let Some(g) = self.nodes[p.idx()].parent else { break };
            if self.nodes[g.idx()].left == Some(p) {
                match self.nodes[g.idx()].right {
                    Some(u) if self.nodes[u.idx()].color == Color::Red => {
                        self.nodes[p.idx()].color = Color::Black;
                        self.nodes[u.idx()].color = Color::Black;
                        self.nodes[g.idx()].color = Color::Red;
                        z = g;
                    }
                    _ => {
                        if self.nodes[p.idx()].right == Some(z) {
                            z = p;
                            self.rotate_left(z);
                        }
                        if let Some(np) = self.nodes[z.idx()].parent {
                            self.nodes[np.idx()].color = Color::Black;
                            if let Some(ng) = self.nodes[np.idx()].parent {
                                self.nodes[ng.idx()].color = Color::Red;
                                self.rotate_right(ng);
                            }
                        }
                    }
                }
            } else {
                match self.nodes[g.idx()].left {
                    Some(u) if self.nodes[u.idx()].color == Color::Red => {
                        self.nodes[p.idx()].color = Color::Black;
                        self.nodes[u.idx()].color = Color::Black;
                        self.nodes[g.idx()].color = Color::Red;
                        z = g;
                    }
                    _ => {
                        if self.nodes[p.idx()].left == Some(z) {
                            z = p;
                            self.rotate_right(z);
                        }
                        if let Some(np) = self.nodes[z.idx()].parent {
                            self.nodes[np.idx()].color = Color::Black;
                            if let Some(ng) = self.nodes[np.idx()].parent {
                                self.nodes[ng.idx()].color = Color::Red;
                                self.rotate_left(ng);
                            }
                        }
                    }
                }
            }
        }
        if let Some(r) = self.root {
            self.nodes[r.idx()].color = Color::Black;
        }
    }

    /// Physically remove the node at `z`, maintaining sizes and balance.
    fn remove_at(&mut self, z: NodeIndex) {
        // The node whose arena position leaves the tree: z itself, or its
        // in-order successor when z has two children. Subtree sizes shrink
        // by one along that node's strict-ancestor path and nowhere else.
        let spliced = match (self.nodes[z.idx()].left, self.nodes[z.idx()].right) {
            (Some(_), Some(r)) => self.min_node(r),
            _ => z,
        };
        let mut p = self.nodes[spliced.idx()].parent;
        while let Some(a) = p {
            self.nodes[a.idx()].size -= 1;
            p = self.nodes[a.idx()].parent;
        }

        let removed_color;
        let fix_x;
        let fix_parent;
        match (self.nodes[z.idx()].left, self.nodes[z.idx()].right) {
            (None, right) => {
                removed_color = self.nodes[z.idx()].color;
                fix_x = right;
                fix_parent = self.nodes[z.idx()].parent;
                self.transplant(z, right);
            }
            (left, None) => {
                removed_color = self.nodes[z.idx()].color;
                fix_x = left;
                fix_parent = self.nodes[z.idx()].parent;
                self.transplant(z, left);
            }
            (Some(zl), Some(zr)) => {
                let y = spliced;
                removed_color = self.nodes[y.idx()].color;
                fix_x = self.nodes[y.idx()].right;
                if self.nodes[y.idx()].parent == Some(z) {
                    fix_parent = Some(y);
                } else {
                    fix_parent = self.nodes[y.idx()].parent;
                    self.transplant(y, self.nodes[y.idx()].right);
                    self.nodes[y.idx()].right = Some(zr);
                    self.nodes[zr.idx()].parent = Some(y);
                }
                self.transplant(z, Some(y));
                self.nodes[y.idx()].left = Some(zl);
                self.nodes[zl.idx()].parent = Some(y);
                self.nodes[y.idx()].color = self.nodes[z.idx()].color;
                // z's size was already decremented by the ancestor walk
                // above, so it is exactly the size of the subtree y now
                // roots in z's old position.
                self.nodes[y.idx()].size = self.nodes[z.idx()].size;
            }
        }
        if removed_color == Color::Black {
            self.delete_fixup(fix_x, fix_parent);
        }
        self.release(z);
    }

    /// Replace the subtree rooted at `u` with the one rooted at `v`.
    fn transplant(&mut self, u: NodeIndex, v: Option<NodeIndex>) {
        let up = self.nodes[u.idx()].parent;
        match up {
            None => self.root = v,
            Some(p) => {
                if self.nodes[p.idx()].left == Some(u) {
                    self.nodes[p.idx()].left = v;
                } else {
                    self.nodes[p.idx()].right = v;
                }
            }
        }
        if let Some(vi) = v {
            self.nodes[vi.idx()].parent = up;
        }
    }

    /// Push the "double Black" deficiency left by removing a Black node up
    /// the tree until absorbed.
    ///
    /// `x` may be absent (an empty subtree is Black), so its parent is
    /// threaded separately instead of being read from a node.
    fn delete_fixup(&mut self, mut x: Option<NodeIndex>, mut parent: Option<NodeIndex>) {
        while x != self.root && self.color_of(x) == Color::Black {
            let Some(p) = parent else { break };
            if self.nodes[p.idx()].left == x {
                let Some(mut w) = self.nodes[p.idx()].right else { break };
                if self.nodes[w.idx()].color == Color::Red {
                    self.nodes[w.idx()].color = Color::Black;
                    self.nodes[p.idx()].color = Color::Red;
                    self.rotate_left(p);
                    match self.nodes[p.idx()].right {
                        Some(nw) => w = nw,
                        None => break,
                    }
                }
                if self.color_of(self.nodes[w.idx()].left) == Color::Black
                    && self.color_of(self.nodes[w.idx()].right) == Color::Black
                {
                    self.nodes[w.idx()].color = Color::Red;
                    x = Some(p);
                    parent = self.nodes[p.idx()].parent;
                } else {
                    if self.color_of(self.nodes[w.idx()].right) == Color::Black {
                        if let Some(wl) = self.nodes[w.idx()].left {
                            self.nodes[wl.idx()].color = Color::Black;
                        }
                        self.nodes[w.idx()].color = Color::Red;
                        self.rotate_right(w);
                        match self.nodes[p.idx()].right {
                            Some(nw) => w = nw,
                            None => break,
                        }
                    }
                    self.nodes[w.idx()].color = self.nodes[p.idx()].color;
                    self.nodes[p.idx()].color = Color::Black;
                    if let Some(wr) = self.nodes[w.idx()].right {
                        self.nodes[wr.idx()].color = Color::Black;
                    }
                    self.rotate_left(p);
                    x = self.root;
                    parent = None;
                }
            } else {
                let Some(mut w) = self.nodes[p.idx()].left else { break };
                if self.nodes[w.idx()].color == Color::Red {
                    self.nodes[w.idx()].color = Color::Black;
                    self.nodes[p.idx()].color = Color::Red;
                    self.rotate_right(p);
                    match self.nodes[p.idx()].left {
                        Some(nw) => w = nw,
                        None => break,
                    }
                }
                if self.color_of(self.nodes[w.idx()].right) == Color::Black
                    && self.color_of(self.nodes[w.idx()].left) == Color::Black
                {
                    self.nodes[w.idx()].color = Color::Red;
                    x = Some(p);
                    parent = self.nodes[p.idx()].parent;
                } else {
                    if self.color_of(self.nodes[w.idx()].left) == Color::Black {
                        if let Some(wr) = self.nodes[w.idx()].right {
                            self.nodes[wr.idx()].color = Color::Black;
                        }
                        self.nodes[w.idx()].color = Color::Red;
                        self.rotate_left(w);
                        match self.nodes[p.idx()].left {
                            Some(nw) => w = nw,
                            None => break,
                        }
                    }
                    self.nodes[w.idx()].color = self.nodes[p.idx()].color;
                    self.nodes[p.idx()].color = Color::Black;
                    if let Some(wl) = self.nodes[w.idx()].left {
                        self.nodes[wl.idx()].color = Color::Black;
                    }
                    self.rotate_right(p);
                    x = self.root;
                    parent = None;
                }
            }
        }
        if let Some(xi) = x {
            self.nodes[xi.idx()].color = Color::Black;
        }
    }

    /// Rotate left around `x`. O(1) link swaps; the pivot inherits `x`'s
    /// subtree size and `x` recomputes from its new children — the only
    /// place the augmentation moves during rebalancing.
    fn rotate_left(&mut self, x: NodeIndex) {
        let y = match self.nodes[x.idx()].right {
            Some(y) => y,
            None => return,
        };
        let y_left = self.nodes[y.idx()].left;
        self.nodes[x.idx()].right = y_left;
        if let Some(yl) = y_left {
            self.nodes[yl.idx()].parent = Some(x);
        }
        let xp = self.nodes[x.idx()].parent;
        self.nodes[y.idx()].parent = xp;
        match xp {
            None => self.root = Some(y),
            Some(p) => {
                if self.nodes[p.idx()].left == Some(x) {
                    self.nodes[p.idx()].left = Some(y);
                } else {
                    self.nodes[p.idx()].right = Some(y);
                }
            }
        }
        self.nodes[y.idx()].left = Some(x);
        self.nodes[x.idx()].parent = Some(y);

        self.nodes[y.idx()].size = self.nodes[x.idx()].size;
        self.nodes[x.idx()].size =
            1 + self.subtree_size(self.nodes[x.idx()].left) + self.subtree_size(self.nodes[x.idx()].right);
    }

    /// Mirror of [`rotate_left`](Self::rotate_left).
    fn rotate_right(&mut self, x: NodeIndex) {
        let y = match self.nodes[x.idx()].left {
            Some(y) => y,
            None => return,
        };
        let y_right = self.nodes[y.idx()].right;
        self.nodes[x.idx()].left = y_right;
        if let Some(yr) = y_right {
            self.nodes[yr.idx()].parent = Some(x);
        }
        let xp = self.nodes[x.idx()].parent;
        self.nodes[y.idx()].parent = xp;
        match xp {
            None => self.root = Some(y),
            Some(p) => {
                if self.nodes[p.idx()].right == Some(x) {
                    self.nodes[p.idx()].right = Some(y);
                } else {
                    self.nodes[p.idx()].left = Some(y);
                }
            }
        }
        self.nodes[y.idx()].right = Some(x);
        self.nodes[x.idx()].parent = Some(y);

        self.nodes[y.idx()].size = self.nodes[x.idx()].size;
        self.nodes[x.idx()].size =
            1 + self.subtree_size(self.nodes[x.idx()].left) + self.subtree_size(self.nodes[x.idx()].right);
    }
}

#[cfg(test)]
impl<K: TotalOrder> RankTree<K> {
    /// Full structural audit: root Black, no Red-Red edge, uniform Black
    /// height, exact subtree sizes, consistent parent back-links.
    fn audit(&self) {
        assert_eq!(self.color_of(self.root), Color::Black, "root must be Black");
        if let Some(r) = self.root {
            assert_eq!(self.nodes[r.idx()].parent, None, "root has no parent");
        }
        self.audit_node(self.root);
    }

    /// Returns (black height, subtree size) for the subtree at `n`.
    fn audit_node(&self, n: Option<NodeIndex>) -> (usize, usize) {
        let Some(i) = n else { return (1, 0) };
        let node = &self.nodes[i.idx()];
        if node.color == Color::Red {
            assert_eq!(self.color_of(node.left), Color::Black, "Red node with Red left child");
            assert_eq!(self.color_of(node.right), Color::Black, "Red node with Red right child");
        }
        if let Some(l) = node.left {
            assert_eq!(self.nodes[l.idx()].parent, Some(i), "broken left parent link");
            assert!(
                !node.key.less_than(&self.nodes[l.idx()].key),
                "left child greater than parent"
            );
        }
        if let Some(r) = node.right {
            assert_eq!(self.nodes[r.idx()].parent, Some(i), "broken right parent link");
            assert!(
                !self.nodes[r.idx()].key.less_than(&node.key),
                "right child less than parent"
            );
        }
        let (lh, ls) = self.audit_node(node.left);
        let (rh, rs) = self.audit_node(node.right);
        assert_eq!(lh, rh, "unequal black heights");
        assert_eq!(node.size, 1 + ls + rs, "stale subtree size");
        let own = if node.color == Color::Black { 1 } else { 0 };
        (lh + own, node.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl TotalOrder for u64 {
        fn less_than(&self, other: &Self) -> bool {
            self < other
        }
        fn equal_to(&self, other: &Self) -> bool {
            self == other
        }
    }

    /// Deterministic scrambled sequence, long enough to force every
    /// rotation and recoloring case on both sides.
    fn scrambled(n: u64) -> Vec<u64> {
        let mut v = Vec::with_capacity(n as usize);
        let mut x: u64 = 11;
        for _ in 0..n {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            v.push(x % 1000);
        }
        v
    }

    fn collect_in_order(tree: &RankTree<u64>) -> Vec<u64> {
        let mut out = Vec::new();
        tree.walk_in_order(|k| {
            out.push(*k);
            true
        });
        out
    }

    #[test]
    fn empty_tree_has_no_extremes() {
        let tree: RankTree<u64> = RankTree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert_eq!(tree.minimum(), None);
        assert_eq!(tree.maximum(), None);
        tree.audit();
    }

    /// In-order traversal yields a non-decreasing sequence for any insert
    /// order, with `!next.less_than(prev)` for every adjacent pair.
    #[test]
    fn in_order_is_sorted() {
        let mut tree = RankTree::new();
        for k in scrambled(500) {
            tree.insert(k);
        }
        tree.audit();
        let keys = collect_in_order(&tree);
        assert_eq!(keys.len(), 500);
        for pair in keys.windows(2) {
            assert!(!pair[1].less_than(&pair[0]), "out of order: {pair:?}");
        }
    }

    /// `select(i)` must equal the i-th element of the in-order walk for
    /// every valid rank.
    #[test]
    fn select_matches_in_order_walk() {
        let mut tree = RankTree::new();
        for k in scrambled(200) {
            tree.insert(k);
        }
        let keys = collect_in_order(&tree);
        for (i, expected) in keys.iter().enumerate() {
            let got = tree.select(i + 1).unwrap();
            assert_eq!(got, expected, "rank {}", i + 1);
        }
    }

    #[test]
    fn select_rejects_out_of_range_ranks() {
        let mut tree = RankTree::new();
        for k in [3u64, 1, 2] {
            tree.insert(k);
        }
        assert_eq!(
            tree.select(0),
            Err(TreeError::RankOutOfRange { rank: 0, len: 3 })
        );
        assert_eq!(
            tree.select(4),
            Err(TreeError::RankOutOfRange { rank: 4, len: 3 })
        );
    }

    /// Concrete sequence: sizes [5, 1, 9, 3, 7, 2, 8]; the 4th smallest
    /// must be 5.
    #[test]
    fn select_fourth_of_seven() {
        let mut tree = RankTree::new();
        for k in [5u64, 1, 9, 3, 7, 2, 8] {
            tree.insert(k);
        }
        assert_eq!(tree.select(4), Ok(&5));
    }

    #[test]
    fn minimum_and_maximum() {
        let mut tree = RankTree::new();
        for k in [42u64, 7, 99, 13] {
            tree.insert(k);
        }
        assert_eq!(tree.minimum(), Some(&7));
        assert_eq!(tree.maximum(), Some(&99));
    }

    /// Equal keys are kept as distinct entries, placed after existing
    /// equals.
    #[test]
    fn duplicates_are_retained() {
        let mut tree = RankTree::new();
        for k in [5u64, 5, 5, 1, 9] {
            tree.insert(k);
        }
        tree.audit();
        assert_eq!(tree.len(), 5);
        assert_eq!(collect_in_order(&tree), vec![1, 5, 5, 5, 9]);
    }

    #[test]
    fn delete_from_empty_is_not_found() {
        let mut tree: RankTree<u64> = RankTree::new();
        assert_eq!(tree.delete(&7), Err(TreeError::NotFound));
    }

    #[test]
    fn delete_missing_key_is_not_found() {
        let mut tree = RankTree::new();
        for k in [4u64, 8, 15] {
            tree.insert(k);
        }
        assert_eq!(tree.delete(&16), Err(TreeError::NotFound));
        assert_eq!(tree.len(), 3);
    }

    /// Invariants must hold after every single delete, not just at the
    /// end, across a scrambled removal order.
    #[test]
    fn delete_all_keys_in_scrambled_order() {
        let keys = scrambled(300);
        let mut tree = RankTree::new();
        for &k in &keys {
            tree.insert(k);
        }
        // Remove in a different order than insertion.
        let mut removal = keys.clone();
        removal.reverse();
        removal.rotate_left(37);
        for (i, k) in removal.iter().enumerate() {
            assert_eq!(tree.delete(k), Ok(()), "delete #{i} of {k}");
            tree.audit();
        }
        assert!(tree.is_empty());
    }

    /// Interleaved inserts and deletes must keep sizes and balance exact;
    /// freed arena slots are reused rather than growing the backing store.
    #[test]
    fn interleaved_insert_delete_stays_consistent() {
        let mut tree = RankTree::new();
        let stream = scrambled(400);
        for (i, &k) in stream.iter().enumerate() {
            tree.insert(k);
            if i % 3 == 2 {
                let min = *tree.minimum().unwrap();
                assert_eq!(tree.delete(&min), Ok(()));
            }
            if i % 29 == 0 {
                tree.audit();
            }
        }
        tree.audit();
        let keys = collect_in_order(&tree);
        assert_eq!(keys.len(), tree.len());
    }

    #[test]
    fn delete_min_removes_smallest() {
        let mut tree = RankTree::new();
        for k in [5u64, 1, 9, 3] {
            tree.insert(k);
        }
        tree.delete_min();
        tree.audit();
        assert_eq!(tree.minimum(), Some(&3));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn descending_walk_is_reverse_of_ascending() {
        let mut tree = RankTree::new();
        for k in scrambled(64) {
            tree.insert(k);
        }
        let mut asc = collect_in_order(&tree);
        let mut desc = Vec::new();
        tree.walk_descending(|k| {
            desc.push(*k);
            true
        });
        asc.reverse();
        assert_eq!(asc, desc);
    }

    /// A visitor returning `false` stops the walk without error.
    #[test]
    fn walks_stop_early() {
        let mut tree = RankTree::new();
        for k in 0u64..50 {
            tree.insert(k);
        }
        let mut seen = 0;
        tree.walk_in_order(|_| {
            seen += 1;
            seen < 10
        });
        assert_eq!(seen, 10);

        let mut seen = 0;
        tree.walk_descending(|_| {
            seen += 1;
            seen < 5
        });
        assert_eq!(seen, 5);
    }

    /// Pre-order visits every key exactly once, root first.
    #[test]
    fn pre_order_covers_all_keys() {
        let mut tree = RankTree::new();
        let keys = scrambled(100);
        for &k in &keys {
            tree.insert(k);
        }
        let mut visited = Vec::new();
        tree.walk_pre_order(|k| {
            visited.push(*k);
            true
        });
        assert_eq!(visited.len(), tree.len());
        let mut sorted_visited = visited.clone();
        sorted_visited.sort_unstable();
        assert_eq!(sorted_visited, collect_in_order(&tree));
    }

    /// `len()` always equals the number of keys the in-order walk yields.
    #[test]
    fn len_matches_traversal_count() {
        let mut tree = RankTree::new();
        for k in scrambled(150) {
            tree.insert(k);
        }
        for _ in 0..40 {
            tree.delete_min();
        }
        tree.audit();
        assert_eq!(collect_in_order(&tree).len(), tree.len());
        assert_eq!(tree.len(), 110);
    }
}
