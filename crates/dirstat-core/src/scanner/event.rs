/// Scan events — messages sent from the walker thread to the consumer
/// over a crossbeam channel.
use crate::model::{FileEntry, FolderEntry};
use std::time::Duration;

/// One message from a running scan.
///
/// `File` and `Folder` carry the data the analysis collectors aggregate;
/// the remaining variants are status. `Folder` events arrive only after
/// the walk has finished, because their totals cover the folder's direct
/// contents and are not complete until every child has been seen.
#[derive(Debug, Clone)]
pub enum ScanEvent {
    /// A regular file was observed.
    File(FileEntry),
    /// A directory's direct-content totals, emitted after the walk.
    Folder(FolderEntry),
    /// A non-fatal error (e.g. permission denied on one entry).
    Error { path: String, message: String },
    /// Scanning completed; no further events follow.
    Complete { duration: Duration, error_count: u64 },
    /// The scan was cancelled; no further events follow.
    Cancelled,
}
