/// Machine-readable exports of a finished report: a JSON summary of every
/// section, and the top-files table as CSV.
use chrono::Local;
use dirstat_core::analysis::extensions::ExtStat;
use dirstat_core::analysis::ranges::SIZE_RANGES;
use dirstat_core::analysis::{totals::Totals, Stats};
use dirstat_core::model::{FileEntry, FolderEntry};
use serde::Serialize;
use std::io::Write;

/// Serializable snapshot of the whole report.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    pub generated_at: String,
    pub root: String,
    pub totals: Totals,
    pub top_files: Vec<FileEntry>,
    pub folders_by_size: Vec<FolderEntry>,
    pub folders_by_count: Vec<FolderEntry>,
    pub extensions_by_size: Vec<ExtStat>,
    pub extensions_by_count: Vec<ExtStat>,
    pub ranges: Vec<RangeRow>,
}

/// One size-range bucket with its accumulated totals.
#[derive(Debug, Serialize)]
pub struct RangeRow {
    pub min: u64,
    pub max: u64,
    pub count: u64,
    pub size: u64,
}

/// Snapshot `stats` into a serializable summary.
pub fn summary(stats: &Stats, root: &str) -> ReportSummary {
    let mut top_files = Vec::new();
    stats.top_files.walk_descending(|f| {
        top_files.push(f.clone());
        true
    });

    let mut folders_by_size = Vec::new();
    stats.folders.walk_top_by_size(|f| {
        folders_by_size.push(f.clone());
        true
    });
    let mut folders_by_count = Vec::new();
    stats.folders.walk_top_by_count(|f| {
        folders_by_count.push(f.clone());
        true
    });

    let mut extensions_by_size = Vec::new();
    stats.extensions.walk_by_size(|e| {
        extensions_by_size.push(e.clone());
        true
    });
    let mut extensions_by_count = Vec::new();
    stats.extensions.walk_by_count(|e| {
        extensions_by_count.push(e.clone());
        true
    });

    let ranges = SIZE_RANGES
        .iter()
        .zip(stats.ranges.stats())
        .map(|(range, stat)| RangeRow {
            min: range.min,
            max: range.max,
            count: stat.count,
            size: stat.size,
        })
        .collect();

    ReportSummary {
        generated_at: Local::now().to_rfc3339(),
        root: root.to_string(),
        totals: stats.totals.clone(),
        top_files,
        folders_by_size,
        folders_by_count,
        extensions_by_size,
        extensions_by_count,
        ranges,
    }
}

/// Write the JSON summary to `out`.
pub fn write_json<W: Write>(stats: &Stats, root: &str, out: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(out, &summary(stats, root))?;
    Ok(())
}

/// Write the top-files table as CSV to `out`: rank, path, size in bytes.
pub fn write_csv<W: Write>(stats: &Stats, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["rank", "path", "size_bytes"])?;

    let mut rank = 1u32;
    let mut failed = None;
    stats.top_files.walk_descending(|f| {
        let record = writer.write_record([
            rank.to_string().as_str(),
            f.path.as_str(),
            f.size.to_string().as_str(),
        ]);
        match record {
            Ok(()) => {
                rank += 1;
                true
            }
            Err(e) => {
                failed = Some(e);
                false
            }
        }
    });
    if let Some(e) = failed {
        return Err(e.into());
    }
    writer.flush()?;
    Ok(())
}
