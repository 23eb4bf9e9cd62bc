/// Per-extension aggregation: count and byte totals for every distinct
/// extension, reduced to top-N lists (by size and by count) once the
/// stream ends.
use crate::scanner::ScanEvent;
use crate::tree::{TopK, TotalOrder};
use compact_str::{format_compact, CompactString};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Count and byte totals for a single extension.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct CountSize {
    pub count: u64,
    pub size: u64,
}

/// One extension with its totals — the payload behind both ranking keys.
#[derive(Debug, Clone, Serialize)]
pub struct ExtStat {
    /// Extension with its leading dot (".rs"); empty when the file has
    /// none.
    pub ext: CompactString,
    pub count: u64,
    pub size: u64,
}

/// Orders extensions by total byte size; the name is payload.
#[derive(Debug, Clone)]
pub struct ExtSizeKey(pub ExtStat);

impl TotalOrder for ExtSizeKey {
    fn less_than(&self, other: &Self) -> bool {
        self.0.size < other.0.size
    }
    fn equal_to(&self, other: &Self) -> bool {
        self.0.size == other.0.size
    }
}

/// Orders extensions by file count; the name is payload.
#[derive(Debug, Clone)]
pub struct ExtCountKey(pub ExtStat);

impl TotalOrder for ExtCountKey {
    fn less_than(&self, other: &Self) -> bool {
        self.0.count < other.0.count
    }
    fn equal_to(&self, other: &Self) -> bool {
        self.0.count == other.0.count
    }
}

/// Extension statistics collector.
///
/// Aggregation happens per event in a hash map; the two selectors are
/// only fed at [`finish`](Self::finish), because an extension's totals
/// keep growing until the stream ends.
pub struct ExtensionStats {
    by_ext: HashMap<CompactString, CountSize>,
    by_size: TopK<ExtSizeKey>,
    by_count: TopK<ExtCountKey>,
}

impl ExtensionStats {
    pub fn new(top: usize) -> Self {
        Self {
            by_ext: HashMap::new(),
            by_size: TopK::new(top),
            by_count: TopK::new(top),
        }
    }

    pub fn observe(&mut self, event: &ScanEvent) {
        if let ScanEvent::File(f) = event {
            let agg = self.by_ext.entry(extension_of(&f.path)).or_default();
            agg.count += 1;
            agg.size += f.size;
        }
    }

    /// Number of distinct extensions seen so far.
    pub fn unique_count(&self) -> usize {
        self.by_ext.len()
    }

    /// Reduce the aggregate map to the two top-N selections.
    pub fn finish(&mut self) {
        for (ext, agg) in &self.by_ext {
            let stat = ExtStat {
                ext: ext.clone(),
                count: agg.count,
                size: agg.size,
            };
            self.by_size.insert(ExtSizeKey(stat.clone()));
            self.by_count.insert(ExtCountKey(stat));
        }
    }

    /// Visit the heaviest extensions, largest total size first.
    pub fn walk_by_size<F: FnMut(&ExtStat) -> bool>(&self, mut visit: F) {
        self.by_size.walk_descending(|k| visit(&k.0));
    }

    /// Visit the most frequent extensions, highest count first.
    pub fn walk_by_count<F: FnMut(&ExtStat) -> bool>(&self, mut visit: F) {
        self.by_count.walk_descending(|k| visit(&k.0));
    }
}

/// The extension of `path` as stored: with leading dot, empty for files
/// without one (Makefile, dotfiles).
fn extension_of(path: &str) -> CompactString {
    match Path::new(path).extension() {
        Some(ext) => format_compact!(".{}", ext.to_string_lossy()),
        None => CompactString::default(),
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

    fn collect_by_size(stats: &ExtensionStats) -> Vec<(String, u64)> {
        let mut out = Vec::new();
        stats.walk_by_size(|s| {
            out.push((s.ext.to_string(), s.size));
            true
        });
        out
    }

    #[test]
    fn aggregates_per_extension() {
        let mut stats = ExtensionStats::new(10);
        stats.observe(&file("/src/main.rs", 100));
        stats.observe(&file("/src/lib.rs", 150));
        stats.observe(&file("/logo.png", 900));
        assert_eq!(stats.unique_count(), 2);

        stats.finish();
        let by_size = collect_by_size(&stats);
        assert_eq!(by_size, vec![(".png".to_string(), 900), (".rs".to_string(), 250)]);
    }

    #[test]
    fn files_without_extension_share_one_bucket() {
        let mut stats = ExtensionStats::new(10);
        stats.observe(&file("/bin/Makefile", 10));
        stats.observe(&file("/bin/LICENSE", 20));
        assert_eq!(stats.unique_count(), 1);

        stats.finish();
        let by_size = collect_by_size(&stats);
        assert_eq!(by_size, vec![(String::new(), 30)]);
    }

    /// By-count and by-size selections rank independently: many small
    /// files win on count, one large file wins on size.
    #[test]
    fn count_and_size_rank_independently() {
        let mut stats = ExtensionStats::new(1);
        for i in 0..5 {
            stats.observe(&file(&format!("/t/{i}.txt"), 1));
        }
        stats.observe(&file("/t/video.mkv", 1_000_000));
        stats.finish();

        let mut top_count = None;
        stats.walk_by_count(|s| {
            top_count = Some(s.ext.to_string());
            false
        });
        let mut top_size = None;
        stats.walk_by_size(|s| {
            top_size = Some(s.ext.to_string());
            false
        });
        assert_eq!(top_count.as_deref(), Some(".txt"));
        assert_eq!(top_size.as_deref(), Some(".mkv"));
    }

    #[test]
    fn top_is_capped() {
        let mut stats = ExtensionStats::new(2);
        stats.observe(&file("/a.aa", 1));
        stats.observe(&file("/b.bb", 2));
        stats.observe(&file("/c.cc", 3));
        stats.finish();
        assert_eq!(collect_by_size(&stats).len(), 2);
        assert_eq!(stats.unique_count(), 3, "the map keeps the full population");
    }
}
