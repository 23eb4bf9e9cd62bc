/// Scan entry types — the values carried by scanner events.
///
/// Entries are plain data: the scanner produces them, the analysis
/// collectors wrap them in per-statistic ordering keys before feeding the
/// ranking structures. A given entry may be inserted into several
/// independent containers, one per sort criterion, so the types are cheap
/// to clone.
use serde::Serialize;

/// One observed regular file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Full path, as produced by the walker.
    pub path: String,
    /// Logical size in bytes.
    pub size: u64,
}

/// One observed directory with its direct-content aggregates.
///
/// `size` and `count` cover the files directly inside the folder, not
/// descendants of subfolders; each subfolder reports its own totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderEntry {
    /// Full path, as produced by the walker.
    pub path: String,
    /// Total bytes of the files directly inside this folder.
    pub size: u64,
    /// Number of files directly inside this folder.
    pub count: u64,
}
