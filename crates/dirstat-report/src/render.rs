/// Text rendering of a finished [`Stats`] — the tabulated report the CLI
/// prints to stdout.
///
/// Every "top N" section is produced by a descending walk over its
/// selector; the full report is a fixed sequence of sections so output
/// stays stable across runs of the same tree.
use dirstat_core::analysis::ranges::SIZE_RANGES;
use dirstat_core::analysis::Stats;
use dirstat_core::model::{format_count, format_size};
use std::io::{self, Write};

const STAT_COLUMNS: &str = "Files          %       Size          %";
const STAT_RULE: &str = "-----     ------       ----     ------";

/// Write the complete report.
pub fn render(stats: &Stats, out: &mut dyn Write) -> io::Result<()> {
    render_top_files(stats, out)?;
    render_folders(stats, out)?;
    render_extensions(stats, out)?;
    render_ranges(stats, out)?;
    render_totals(stats, out)?;
    Ok(())
}

/// One count/size row with percentages of the scan totals.
fn stat_line(
    stats: &Stats,
    out: &mut dyn Write,
    title: &str,
    count: u64,
    size: u64,
) -> io::Result<()> {
    writeln!(
        out,
        "{:<52} {:>9}    {:>6.2}% {:>10}    {:>6.2}%",
        title,
        format_count(count),
        stats.totals.count_percent(count),
        format_size(size),
        stats.totals.size_percent(size),
    )
}

fn render_top_files(stats: &Stats, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "\nTOP {} files by size:\n", stats.options.top)?;
    writeln!(out, "{:<60} {:>10}", "File", "Size")?;
    writeln!(out, "{:<60} {:>10}", "------", "----")?;

    let mut result = Ok(());
    let mut i = 1;
    stats.top_files.walk_descending(|f| {
        let line = writeln!(
            out,
            "{:<60} {:>10}",
            format!("{i:>2}. {}", f.path),
            format_size(f.size)
        );
        i += 1;
        match line {
            Ok(()) => true,
            Err(e) => {
                result = Err(e);
                false
            }
        }
    });
    result
}

fn render_folders(stats: &Stats, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "\nTOP {} folders by size:\n", stats.options.top)?;
    writeln!(out, "{:<52} {}", "Folder", STAT_COLUMNS)?;
    writeln!(out, "{:<52} {}", "------", STAT_RULE)?;

    let mut result = Ok(());
    let mut i = 1;
    stats.folders.walk_top_by_size(|f| {
        let line = stat_line(stats, out, &format!("{i:>2}. {}", f.path), f.count, f.size);
        i += 1;
        match line {
            Ok(()) => true,
            Err(e) => {
                result = Err(e);
                false
            }
        }
    });
    result?;

    writeln!(out, "\nTOP {} folders by count:\n", stats.options.top)?;
    writeln!(out, "{:<52} {}", "Folder", STAT_COLUMNS)?;
    writeln!(out, "{:<52} {}", "------", STAT_RULE)?;

    let mut result = Ok(());
    let mut i = 1;
    stats.folders.walk_top_by_count(|f| {
        let line = stat_line(stats, out, &format!("{i:>2}. {}", f.path), f.count, f.size);
        i += 1;
        match line {
            Ok(()) => true,
            Err(e) => {
                result = Err(e);
                false
            }
        }
    });
    result
}

fn render_extensions(stats: &Stats, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "\nTOP {} file extensions by size:\n", stats.options.top)?;
    writeln!(out, "{:<52} {}", "Extension", STAT_COLUMNS)?;
    writeln!(out, "{:<52} {}", "---------", STAT_RULE)?;

    let mut result = Ok(());
    stats.extensions.walk_by_size(|e| {
        let line = stat_line(stats, out, ext_label(&e.ext), e.count, e.size);
        match line {
            Ok(()) => true,
            Err(err) => {
                result = Err(err);
                false
            }
        }
    });
    result?;

    writeln!(out, "\nTOP {} file extensions by count:\n", stats.options.top)?;
    writeln!(out, "{:<52} {}", "Extension", STAT_COLUMNS)?;
    writeln!(out, "{:<52} {}", "---------", STAT_RULE)?;

    let mut result = Ok(());
    stats.extensions.walk_by_count(|e| {
        let line = stat_line(stats, out, ext_label(&e.ext), e.count, e.size);
        match line {
            Ok(()) => true,
            Err(err) => {
                result = Err(err);
                false
            }
        }
    });
    result
}

/// Display form of an extension key; files without one share a label.
fn ext_label(ext: &str) -> &str {
    if ext.is_empty() {
        "(no extension)"
    } else {
        ext
    }
}

fn render_ranges(stats: &Stats, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "\nFiles by size range:\n")?;
    writeln!(out, "{:<52} {}", "Range", STAT_COLUMNS)?;
    writeln!(out, "{:<52} {}", "-----", STAT_RULE)?;

    for (i, (range, stat)) in SIZE_RANGES.iter().zip(stats.ranges.stats()).enumerate() {
        let title = format!(
            "{:>2}. Between {} and {}",
            i + 1,
            format_size(range.min),
            format_size(range.max)
        );
        stat_line(stats, out, &title, stat.count, stat.size)?;
    }

    // Verbose listings for the ranges the user asked about.
    for bucket in 1..=SIZE_RANGES.len() {
        if !stats.ranges.is_detailed(bucket) {
            continue;
        }
        let files = stats.ranges.files_in(bucket);
        writeln!(out, "\nFiles in range {bucket} ({} shown):", files.len())?;
        for path in files {
            writeln!(out, "  {path}")?;
        }
    }
    Ok(())
}

fn render_totals(stats: &Stats, out: &mut dyn Write) -> io::Result<()> {
    let t = &stats.totals;
    writeln!(out)?;
    writeln!(
        out,
        "Total files:            {} ({})",
        format_count(t.files),
        format_size(t.total_size)
    )?;
    writeln!(out, "Total folders:          {}", format_count(t.folders))?;
    writeln!(out, "Total file extensions:  {}", t.extensions)?;
    if t.errors > 0 {
        writeln!(out, "Unreadable entries:     {}", format_count(t.errors))?;
    }
    writeln!(out)?;
    writeln!(out, "Read taken:    {:?}", t.elapsed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirstat_core::analysis::StatsOptions;
    use dirstat_core::model::{FileEntry, FolderEntry};
    use dirstat_core::scanner::ScanEvent;
    use std::time::Duration;

    fn sample_stats() -> Stats {
        let mut stats = Stats::new(&StatsOptions {
            top: 5,
            verbose_ranges: vec![1],
        });
        for (path, size) in [
            ("/data/big.iso", 4_000_000u64),
            ("/data/notes.txt", 500),
            ("/src/main.rs", 1_500),
        ] {
            stats.observe(&ScanEvent::File(FileEntry {
                path: path.to_string(),
                size,
            }));
        }
        stats.observe(&ScanEvent::Folder(FolderEntry {
            path: "/data".to_string(),
            size: 4_000_500,
            count: 2,
        }));
        stats.observe(&ScanEvent::Folder(FolderEntry {
            path: "/src".to_string(),
            size: 1_500,
            count: 1,
        }));
        stats.observe(&ScanEvent::Complete {
            duration: Duration::from_millis(42),
            error_count: 0,
        });
        stats.finish();
        stats
    }

    fn rendered() -> String {
        let mut buf = Vec::new();
        render(&sample_stats(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn report_contains_every_section() {
        let text = rendered();
        assert!(text.contains("TOP 5 files by size:"));
        assert!(text.contains("TOP 5 folders by size:"));
        assert!(text.contains("TOP 5 folders by count:"));
        assert!(text.contains("TOP 5 file extensions by size:"));
        assert!(text.contains("TOP 5 file extensions by count:"));
        assert!(text.contains("Files by size range:"));
        assert!(text.contains("Total files:            3"));
        assert!(text.contains("Total folders:          2"));
        assert!(text.contains("Total file extensions:  3"));
    }

    #[test]
    fn largest_file_is_listed_first() {
        let text = rendered();
        let iso = text.find("/data/big.iso").expect("largest file missing");
        let rs = text.find("/src/main.rs").expect("rust file missing");
        assert!(iso < rs, "largest file must be rendered before smaller ones");
    }

    #[test]
    fn verbose_range_lists_its_files() {
        let text = rendered();
        // All three sample files are under 100 KB... except big.iso (bucket 3).
        assert!(text.contains("Files in range 1 (2 shown):"));
        assert!(text.contains("  /data/notes.txt"));
        assert!(!text.contains("  /data/big.iso"));
    }

    #[test]
    fn empty_stats_render_without_panicking() {
        let mut stats = Stats::new(&StatsOptions::default());
        stats.finish();
        let mut buf = Vec::new();
        render(&stats, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Total files:            0"));
    }
}
