/// Analysis collectors — per-statistic aggregation over the scan event
/// stream.
///
/// Each collector owns its own ranking instances; entries are adapted
/// into a per-statistic ordering key before insertion, and nothing is
/// shared between criteria. The intended flow is: construct [`Stats`],
/// call [`observe`](Stats::observe) for every event the scanner emits,
/// call [`finish`](Stats::finish) exactly once after the terminal event,
/// then hand the whole thing to a renderer.
pub mod extensions;
pub mod folders;
pub mod ranges;
pub mod top_files;
pub mod totals;

pub use extensions::ExtensionStats;
pub use folders::FolderStats;
pub use ranges::SizeRanges;
pub use top_files::TopFiles;
pub use totals::Totals;

use crate::scanner::ScanEvent;

/// Knobs for a statistics run.
#[derive(Debug, Clone)]
pub struct StatsOptions {
    /// Entries per "top N" list.
    pub top: usize,
    /// 1-based size-range numbers whose individual files are collected
    /// for verbose output.
    pub verbose_ranges: Vec<usize>,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            top: 10,
            verbose_ranges: Vec::new(),
        }
    }
}

/// All collectors for one scan.
pub struct Stats {
    pub options: StatsOptions,
    pub totals: Totals,
    pub extensions: ExtensionStats,
    pub ranges: SizeRanges,
    pub top_files: TopFiles,
    pub folders: FolderStats,
}

impl Stats {
    pub fn new(options: &StatsOptions) -> Self {
        Self {
            options: options.clone(),
            totals: Totals::default(),
            extensions: ExtensionStats::new(options.top),
            ranges: SizeRanges::new(options.verbose_ranges.clone()),
            top_files: TopFiles::new(options.top),
            folders: FolderStats::new(options.top),
        }
    }

    /// Feed one event to every collector.
    pub fn observe(&mut self, event: &ScanEvent) {
        self.totals.observe(event);
        self.extensions.observe(event);
        self.ranges.observe(event);
        self.top_files.observe(event);
        self.folders.observe(event);
    }

    /// Finalize after the stream ends: build the finish-time top-N
    /// selections and fill the derived totals.
    pub fn finish(&mut self) {
        self.extensions.finish();
        self.folders.finish();
        self.totals.extensions = self.extensions.unique_count() as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FileEntry, FolderEntry};
    use std::time::Duration;

    #[test]
    fn stats_aggregates_a_small_stream() {
        let mut stats = Stats::new(&StatsOptions::default());
        stats.observe(&ScanEvent::File(FileEntry {
            path: "/d/a.rs".to_string(),
            size: 100,
        }));
        stats.observe(&ScanEvent::File(FileEntry {
            path: "/d/b.txt".to_string(),
            size: 200,
        }));
        stats.observe(&ScanEvent::Folder(FolderEntry {
            path: "/d".to_string(),
            size: 300,
            count: 2,
        }));
        stats.observe(&ScanEvent::Complete {
            duration: Duration::from_secs(1),
            error_count: 0,
        });
        stats.finish();

        assert_eq!(stats.totals.files, 2);
        assert_eq!(stats.totals.total_size, 300);
        assert_eq!(stats.totals.folders, 1);
        assert_eq!(stats.totals.extensions, 2);
        assert_eq!(stats.folders.len(), 1);
        assert_eq!(stats.top_files.len(), 2);
    }
}
