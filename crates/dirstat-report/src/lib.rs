/// dirstat Report — the presentation frontend.
///
/// Drives a scan from start to finish: spawns the walker, feeds every
/// event into the analysis collectors, renders the tabulated report to
/// stdout, and writes any requested machine-readable exports.
pub mod export;
pub mod render;

use anyhow::Context;
use dirstat_core::analysis::{Stats, StatsOptions};
use dirstat_core::scanner::{start_scan, ScanEvent};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// Everything one invocation needs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory to analyse.
    pub path: PathBuf,
    /// Entries per "top N" list.
    pub top: usize,
    /// 1-based size-range numbers whose files are listed verbosely.
    pub verbose_ranges: Vec<usize>,
    /// Optional JSON summary output path.
    pub json: Option<PathBuf>,
    /// Optional CSV (top files) output path.
    pub csv: Option<PathBuf>,
}

/// Scan, aggregate, render, export.
pub fn run(options: RunOptions) -> anyhow::Result<()> {
    let handle = start_scan(options.path.clone())
        .with_context(|| format!("starting scan of {}", options.path.display()))?;

    let mut stats = Stats::new(&StatsOptions {
        top: options.top,
        verbose_ranges: options.verbose_ranges.clone(),
    });

    // The stream ends with Complete or Cancelled; observe it too so the
    // totals pick up the duration and error count.
    for event in handle.events_rx.iter() {
        if let ScanEvent::Error { path, message } = &event {
            debug!("unreadable entry {path}: {message}");
        }
        let terminal = matches!(event, ScanEvent::Complete { .. } | ScanEvent::Cancelled);
        stats.observe(&event);
        if terminal {
            break;
        }
    }
    stats.finish();

    let stdout = io::stdout();
    render::render(&stats, &mut stdout.lock()).context("writing report")?;

    let root = options.path.display().to_string();
    if let Some(path) = &options.json {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        export::write_json(&stats, &root, file)
            .with_context(|| format!("writing JSON summary to {}", path.display()))?;
    }
    if let Some(path) = &options.csv {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        export::write_csv(&stats, file)
            .with_context(|| format!("writing CSV to {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write as _;
    use tempfile::TempDir;

    /// `run` against a real tempdir must succeed and produce the
    /// requested exports.
    #[test]
    fn run_produces_exports() {
        let tmp = TempDir::new().unwrap();
        let mut f = fs::File::create(tmp.path().join("data.bin")).unwrap();
        f.write_all(&[0u8; 256]).unwrap();

        let out_dir = TempDir::new().unwrap();
        let json = out_dir.path().join("report.json");
        let csv = out_dir.path().join("top.csv");

        run(RunOptions {
            path: tmp.path().to_path_buf(),
            top: 5,
            verbose_ranges: Vec::new(),
            json: Some(json.clone()),
            csv: Some(csv.clone()),
        })
        .unwrap();

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json).unwrap()).unwrap();
        assert_eq!(summary["totals"]["files"], 1);

        let csv_text = fs::read_to_string(&csv).unwrap();
        assert!(csv_text.starts_with("rank,path,size_bytes"));
        assert!(csv_text.contains("data.bin"));
    }
}
