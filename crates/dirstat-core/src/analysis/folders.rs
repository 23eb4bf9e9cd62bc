/// Folder statistics: the full folder population ordered by path, plus
/// top-N selections by direct byte size and by direct file count.
///
/// Three independent ranking instances over the same entries, one per
/// sort criterion — a node's position depends on exactly one order, so
/// the orders never share storage. The path tree holds everything; the
/// two selectors are bounded and fed from it once the stream ends.
use crate::model::FolderEntry;
use crate::scanner::ScanEvent;
use crate::tree::{RankTree, TopK, TotalOrder};
use std::cmp::Ordering;

/// Orders folders by path — the full-population listing order.
/// Case-insensitive on Windows, matching its filesystems; byte order
/// elsewhere.
#[derive(Debug, Clone)]
pub struct FolderPathKey(pub FolderEntry);

impl TotalOrder for FolderPathKey {
    fn less_than(&self, other: &Self) -> bool {
        path_cmp(&self.0.path, &other.0.path) == Ordering::Less
    }
    fn equal_to(&self, other: &Self) -> bool {
        path_cmp(&self.0.path, &other.0.path) == Ordering::Equal
    }
}

/// Orders folders by direct byte size; the path is payload.
#[derive(Debug, Clone)]
pub struct FolderSizeKey(pub FolderEntry);

impl TotalOrder for FolderSizeKey {
    fn less_than(&self, other: &Self) -> bool {
        self.0.size < other.0.size
    }
    fn equal_to(&self, other: &Self) -> bool {
        self.0.size == other.0.size
    }
}

/// Orders folders by direct file count; the path is payload.
#[derive(Debug, Clone)]
pub struct FolderCountKey(pub FolderEntry);

impl TotalOrder for FolderCountKey {
    fn less_than(&self, other: &Self) -> bool {
        self.0.count < other.0.count
    }
    fn equal_to(&self, other: &Self) -> bool {
        self.0.count == other.0.count
    }
}

#[cfg(windows)]
fn path_cmp(a: &str, b: &str) -> Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

#[cfg(not(windows))]
fn path_cmp(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Folder statistics collector.
pub struct FolderStats {
    by_path: RankTree<FolderPathKey>,
    by_size: TopK<FolderSizeKey>,
    by_count: TopK<FolderCountKey>,
}

impl FolderStats {
    pub fn new(top: usize) -> Self {
        Self {
            by_path: RankTree::new(),
            by_size: TopK::new(top),
            by_count: TopK::new(top),
        }
    }

    pub fn observe(&mut self, event: &ScanEvent) {
        if let ScanEvent::Folder(f) = event {
            self.by_path.insert(FolderPathKey(f.clone()));
        }
    }

    /// Feed the path-ordered population through the two selectors.
    pub fn finish(&mut self) {
        let by_path = &self.by_path;
        let by_size = &mut self.by_size;
        let by_count = &mut self.by_count;
        by_path.walk_in_order(|k| {
            by_size.insert(FolderSizeKey(k.0.clone()));
            by_count.insert(FolderCountKey(k.0.clone()));
            true
        });
    }

    /// Number of folders observed.
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    /// Visit every folder in path order.
    pub fn walk_by_path<F: FnMut(&FolderEntry) -> bool>(&self, mut visit: F) {
        self.by_path.walk_in_order(|k| visit(&k.0));
    }

    /// Visit the top folders, largest direct size first. Populated by
    /// [`finish`](Self::finish).
    pub fn walk_top_by_size<F: FnMut(&FolderEntry) -> bool>(&self, mut visit: F) {
        self.by_size.walk_descending(|k| visit(&k.0));
    }

    /// Visit the top folders, highest direct file count first. Populated
    /// by [`finish`](Self::finish).
    pub fn walk_top_by_count<F: FnMut(&FolderEntry) -> bool>(&self, mut visit: F) {
        self.by_count.walk_descending(|k| visit(&k.0));
    }
}
