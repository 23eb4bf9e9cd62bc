/// Top-N largest files, maintained incrementally from the event stream
/// through a bounded selector: O(log N) per file, never holding more
/// than N entries however large the scan.
use crate::model::FileEntry;
use crate::scanner::ScanEvent;
use crate::tree::{TopK, TotalOrder};

/// Orders file entries by size only; the path is payload. Files of equal
/// size compare equal, so at a full selector's boundary the newest
/// arrival among equals survives.
#[derive(Debug, Clone)]
pub struct FileSizeKey(pub FileEntry);

impl TotalOrder for FileSizeKey {
    fn less_than(&self, other: &Self) -> bool {
        self.0.size < other.0.size
    }
    fn equal_to(&self, other: &Self) -> bool {
        self.0.size == other.0.size
    }
}

/// The N largest files seen so far.
pub struct TopFiles {
    top: TopK<FileSizeKey>,
}

impl TopFiles {
    pub fn new(top: usize) -> Self {
        Self {
            top: TopK::new(top),
        }
    }

    pub fn observe(&mut self, event: &ScanEvent) {
        if let ScanEvent::File(f) = event {
            self.top.insert(FileSizeKey(f.clone()));
        }
    }

    pub fn len(&self) -> usize {
        self.top.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty()
    }

    /// Visit the retained files, largest first.
    pub fn walk_descending<F: FnMut(&FileEntry) -> bool>(&self, mut visit: F) {
        self.top.walk_descending(|k| visit(&k.0));
    }
}
