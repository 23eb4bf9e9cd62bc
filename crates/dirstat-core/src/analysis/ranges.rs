/// File-size distribution across ten fixed byte ranges, from "under
/// 100 KB" up to "10 TB to 1 PB". Optionally captures the individual
/// file paths falling into user-selected ranges for verbose reporting.
use crate::scanner::ScanEvent;
use serde::Serialize;

const KB: u64 = 1 << 10;
const MB: u64 = KB << 10;
const GB: u64 = MB << 10;
const TB: u64 = GB << 10;
const PB: u64 = TB << 10;

/// Inclusive byte range. Adjacent ranges share a boundary value; the
/// first matching range wins during bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeRange {
    pub min: u64,
    pub max: u64,
}

impl SizeRange {
    #[inline]
    pub fn contains(&self, n: u64) -> bool {
        n >= self.min && n <= self.max
    }
}

/// The distribution buckets, smallest first.
pub const SIZE_RANGES: [SizeRange; 10] = [
    SizeRange { min: 0, max: 100 * KB },
    SizeRange { min: 100 * KB, max: MB },
    SizeRange { min: MB, max: 10 * MB },
    SizeRange { min: 10 * MB, max: 100 * MB },
    SizeRange { min: 100 * MB, max: GB },
    SizeRange { min: GB, max: 10 * GB },
    SizeRange { min: 10 * GB, max: 100 * GB },
    SizeRange { min: 100 * GB, max: TB },
    SizeRange { min: TB, max: 10 * TB },
    SizeRange { min: 10 * TB, max: PB },
];

/// Count and byte totals accumulated for one bucket.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct RangeStat {
    pub count: u64,
    pub size: u64,
}

/// Size-distribution collector.
pub struct SizeRanges {
    stats: [RangeStat; 10],
    /// 1-based bucket numbers whose individual files are kept.
    detailed: Vec<usize>,
    files: Vec<Vec<String>>,
}

impl SizeRanges {
    /// `detailed` selects buckets (1-based, matching the rendered range
    /// numbers) whose file paths are collected verbatim.
    pub fn new(detailed: Vec<usize>) -> Self {
        Self {
            stats: [RangeStat::default(); 10],
            detailed,
            files: vec![Vec::new(); SIZE_RANGES.len()],
        }
    }

    pub fn observe(&mut self, event: &ScanEvent) {
        let ScanEvent::File(f) = event else { return };
        let Some(i) = SIZE_RANGES.iter().position(|r| r.contains(f.size)) else {
            return;
        };
        self.stats[i].count += 1;
        self.stats[i].size += f.size;
        if self.detailed.contains(&(i + 1)) {
            self.files[i].push(f.path.clone());
        }
    }

    pub fn stats(&self) -> &[RangeStat; 10] {
        &self.stats
    }

    /// Whether the 1-based bucket collects individual files.
    pub fn is_detailed(&self, bucket: usize) -> bool {
        self.detailed.contains(&bucket)
    }

    /// Collected file paths for the 1-based bucket (empty unless the
    /// bucket was selected as detailed).
    pub fn files_in(&self, bucket: usize) -> &[String] {
        self.files
            .get(bucket.wrapping_sub(1))
            .map_or(&[], |v| v.as_slice())
    }
}
