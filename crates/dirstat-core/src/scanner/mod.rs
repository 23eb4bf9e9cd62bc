/// Scanner module — background filesystem walking with an event stream.
///
/// [`start_scan`] spawns a walker thread that traverses the target
/// directory with `jwalk` and streams [`ScanEvent`]s over a bounded
/// channel: one `File` event per regular file as it is seen, one `Folder`
/// event per directory once its direct totals are complete, then a
/// terminal `Complete` (or `Cancelled`). The consumer drains the channel
/// and feeds each event to its collectors; no scan state is shared.
pub mod event;
mod walk;

pub use event::ScanEvent;

use crossbeam_channel::Receiver;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::info;

/// Maximum number of events that may queue up in the channel.
///
/// The consumer is a tight aggregation loop, so it normally stays well
/// ahead of the walker. If it falls behind, the walker blocks on `send`
/// rather than buffering the whole filesystem's worth of events in heap.
pub const EVENT_CHANNEL_CAPACITY: usize = 4_096;

/// Failures starting a scan. Per-entry I/O problems are not here: those
/// flow through the event stream as [`ScanEvent::Error`] and never abort
/// the walk.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handle to a running scan: the event stream plus cancellation.
pub struct ScanHandle {
    /// Receiver for the walker's events, ending with `Complete` or
    /// `Cancelled`.
    pub events_rx: Receiver<ScanEvent>,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the walker thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop as soon as possible.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Start a scan of `root_path` on a background thread.
pub fn start_scan(root_path: PathBuf) -> Result<ScanHandle, ScanError> {
    let (events_tx, events_rx) = crossbeam_channel::bounded::<ScanEvent>(EVENT_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();

    let thread = thread::Builder::new()
        .name("dirstat-scanner".into())
        .spawn(move || {
            info!("Starting scan of {}", root_path.display());
            walk::scan_events(root_path, events_tx, cancel_clone);
        })?;

    Ok(ScanHandle {
        events_rx,
        cancel_flag,
        _thread: Some(thread),
    })
}
