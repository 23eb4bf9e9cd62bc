/// Parallel directory walker using `jwalk`.
///
/// Works on any filesystem and needs no elevated privileges. `jwalk`'s
/// rayon-backed traversal reads directories in parallel; this thread
/// consumes the merged entry stream, stats files, accumulates per-folder
/// direct totals, and emits [`ScanEvent`]s over the channel.
///
/// Folder totals cover *direct* children only: each subfolder reports its
/// own files. They are therefore complete only once the walk has seen
/// every entry, so folder events are flushed in one pass at the end.
use super::event::ScanEvent;
use crate::model::{FileEntry, FolderEntry};
use crossbeam_channel::Sender;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Direct-content totals accumulated for one directory.
#[derive(Default)]
struct DirTotals {
    size: u64,
    count: u64,
}

/// Walk `root_path`, sending events until completion or cancellation.
///
/// Every send ignores disconnection: a consumer that hangs up simply ends
/// the report, it is not an error the walker can act on.
pub(super) fn scan_events(
    root_path: PathBuf,
    events_tx: Sender<ScanEvent>,
    cancel_flag: Arc<AtomicBool>,
) {
    let start = Instant::now();
    let mut error_count: u64 = 0;
    let mut files_seen: u64 = 0;
    let mut bytes_seen: u64 = 0;
    let mut entry_counter: u64 = 0;

    // Per-directory totals, keyed by path. Populated for every directory
    // seen (so empty folders still report zeros) and for file parents.
    let mut dirs: HashMap<PathBuf, DirTotals> = HashMap::with_capacity(10_000);

    let walker = jwalk::WalkDir::new(&root_path)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(walk_parallelism());

    for entry_result in walker {
        // Check cancellation every 1000 entries.
        entry_counter += 1;
        if entry_counter.is_multiple_of(1_000) && cancel_flag.load(Ordering::Relaxed) {
            let _ = events_tx.send(ScanEvent::Cancelled);
            return;
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // jwalk errors are typically access-denied on directories.
                error_count += 1;
                let path = err
                    .path()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let _ = events_tx.send(ScanEvent::Error {
                    path,
                    message: format!("{err}"),
                });
                continue;
            }
        };

        let path = entry.path();

        if entry.file_type().is_dir() {
            dirs.entry(path).or_default();
            continue;
        }

        // Stat outside any shared state: this is the expensive syscall.
        let size = match std::fs::symlink_metadata(&path) {
            Ok(meta) => meta.len(),
            Err(err) => {
                error_count += 1;
                let _ = events_tx.send(ScanEvent::Error {
                    path: path.to_string_lossy().into_owned(),
                    message: format!("{err}"),
                });
                continue;
            }
        };

        if let Some(parent) = path.parent() {
            let totals = dirs.entry(parent.to_path_buf()).or_default();
            totals.size += size;
            totals.count += 1;
        }

        files_seen += 1;
        bytes_seen += size;
        let _ = events_tx.send(ScanEvent::File(FileEntry {
            path: path.to_string_lossy().into_owned(),
            size,
        }));

        if entry_counter.is_multiple_of(50_000) {
            debug!("walked {entry_counter} entries: {files_seen} files, {bytes_seen} bytes");
        }
    }

    // Flush the completed folder totals.
    let folder_count = dirs.len();
    for (path, totals) in dirs {
        let _ = events_tx.send(ScanEvent::Folder(FolderEntry {
            path: path.to_string_lossy().into_owned(),
            size: totals.size,
            count: totals.count,
        }));
    }

    let duration = start.elapsed();
    debug!(
        "walk complete: {files_seen} files, {folder_count} folders, {error_count} errors in {duration:?}"
    );
    let _ = events_tx.send(ScanEvent::Complete {
        duration,
        error_count,
    });
}

/// Build the traversal pool: a dedicated rayon pool with named threads,
/// falling back to jwalk's own pool if thread creation fails.
fn walk_parallelism() -> jwalk::Parallelism {
    let built = rayon::ThreadPoolBuilder::new()
        .num_threads(num_cpus::get())
        .thread_name(|i| format!("dirstat-walk-{i}"))
        .build();
    match built {
        Ok(pool) => jwalk::Parallelism::RayonExistingPool {
            pool: Arc::new(pool),
            busy_timeout: None,
        },
        Err(_) => jwalk::Parallelism::RayonNewPool(num_cpus::get()),
    }
}
