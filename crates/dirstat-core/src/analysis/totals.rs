/// Whole-scan running totals: file/folder/byte counts, distinct
/// extensions, errors, elapsed time. The denominators for every
/// percentage column in the report.
use crate::scanner::ScanEvent;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Default, Clone, Serialize)]
pub struct Totals {
    /// Number of regular files observed.
    pub files: u64,
    /// Sum of all observed file sizes in bytes.
    pub total_size: u64,
    /// Number of folders observed.
    pub folders: u64,
    /// Number of distinct file extensions. Filled in by
    /// [`Stats::finish`](super::Stats::finish).
    pub extensions: u64,
    /// Entries that could not be read.
    pub errors: u64,
    /// Wall-clock duration of the walk.
    pub elapsed: Duration,
}

impl Totals {
    pub fn observe(&mut self, event: &ScanEvent) {
        match event {
            ScanEvent::File(f) => {
                self.files += 1;
                self.total_size += f.size;
            }
            ScanEvent::Folder(_) => self.folders += 1,
            ScanEvent::Complete {
                duration,
                error_count,
            } => {
                self.elapsed = *duration;
                self.errors = *error_count;
            }
            _ => {}
        }
    }

    /// `count` as a percentage of all files. Zero when nothing was seen,
    /// so renderers never divide by zero.
    pub fn count_percent(&self, count: u64) -> f64 {
        if self.files == 0 {
            0.0
        } else {
            count as f64 / self.files as f64 * 100.0
        }
    }

    /// `size` as a percentage of all observed bytes.
    pub fn size_percent(&self, size: u64) -> f64 {
        if self.total_size == 0 {
            0.0
        } else {
            size as f64 / self.total_size as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FileEntry;

    fn file(path: &str, size: u64) -> ScanEvent {
        ScanEvent::File(FileEntry {
            path: path.to_string(),
            size,
        })
    }

    #[test]
    fn accumulates_files_and_bytes() {
        let mut totals = Totals::default();
        totals.observe(&file("/a", 100));
        totals.observe(&file("/b", 300));
        assert_eq!(totals.files, 2);
        assert_eq!(totals.total_size, 400);
    }

    #[test]
    fn complete_records_duration_and_errors() {
        let mut totals = Totals::default();
        totals.observe(&ScanEvent::Complete {
            duration: Duration::from_millis(1500),
            error_count: 3,
        });
        assert_eq!(totals.elapsed, Duration::from_millis(1500));
        assert_eq!(totals.errors, 3);
    }

    #[test]
    fn percentages_guard_against_empty_scan() {
        let totals = Totals::default();
        assert_eq!(totals.count_percent(5), 0.0);
        assert_eq!(totals.size_percent(5), 0.0);
    }

    #[test]
    fn percentages_of_observed_totals() {
        let mut totals = Totals::default();
        totals.observe(&file("/a", 75));
        totals.observe(&file("/b", 25));
        assert_eq!(totals.count_percent(1), 50.0);
        assert_eq!(totals.size_percent(75), 75.0);
    }
}
