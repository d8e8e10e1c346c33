// src/report.rs
// =============================================================================
// This module turns probe results into the two report artifacts:
//
// 1. A human-readable text block printed to stdout:
//    - a fixed-width header and timestamped title
//    - a "R/T URLs are responding" summary line
//    - one glyph-prefixed block per target, in input order
// 2. A machine-readable JSON document written to disk, carrying the same
//    data (summary counts, timestamp, per-target results).
//
// Both artifacts are rendered from the same result set, so they can never
// disagree. Rendering is deterministic: the same results and summary
// always produce identical output.
// =============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::probe::ProbeResult;

/// Column width for captions in the text report
const CAPTION_WIDTH: usize = 30;

/// Width of the ===== header rule
const RULE_WIDTH: usize = 80;

/// File name of the JSON report when --output is not given
pub const DEFAULT_REPORT_NAME: &str = "url_poll_results.json";

// Aggregate counts and timestamp for a full run
//
// Derived from the complete result set in one pass; never updated
// incrementally.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total: usize,
    pub responding: usize,
    pub timestamp: DateTime<Local>,
}

// The structured report serialized to the output file
//
// status_code and error inside each result serialize as JSON null when
// absent, so consumers always see the full field set.
#[derive(Debug, Serialize)]
pub struct PollReport {
    pub timestamp: DateTime<Local>,
    pub total: usize,
    pub responding: usize,
    pub results: Vec<ProbeResult>,
}

// Builds the Summary from an ordered result set
//
// Pure apart from reading the clock: total is the list length and
// responding counts the successes.
pub fn summarize(results: &[ProbeResult]) -> Summary {
    Summary {
        total: results.len(),
        responding: results.iter().filter(|r| r.success).count(),
        timestamp: Local::now(),
    }
}

// Assembles the structured report from the results and their summary
//
// Takes ownership of the results; by this point nothing else needs them.
// The per-target array keeps input order.
pub fn build_report(results: Vec<ProbeResult>, summary: &Summary) -> PollReport {
    PollReport {
        timestamp: summary.timestamp,
        total: summary.total,
        responding: summary.responding,
        results,
    }
}

// Renders the human-readable text report
//
// Layout (see the header comment for the overall shape):
//   ✅ Google                         | https://www.google.com
//      Status Code: 200
//      Response Time: 52.31ms
//
// A result with a status code shows the code and response time; a
// connection failure (no code available) shows the error message instead.
pub fn render_text(results: &[ProbeResult], summary: &Summary) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "URL POLLING RESULTS - {}\n",
        summary.timestamp.format("%Y-%m-%d %H:%M:%S")
    ));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "Summary: {}/{} URLs are responding\n\n",
        summary.responding, summary.total
    ));

    for result in results {
        let glyph = if result.success { "✅" } else { "❌" };
        out.push_str(&format!(
            "{} {:<width$} | {}\n",
            glyph,
            fit_caption(&result.caption),
            result.url,
            width = CAPTION_WIDTH
        ));

        if let Some(code) = result.status_code {
            out.push_str(&format!("   Status Code: {}\n", code));
            out.push_str(&format!("   Response Time: {:.2}ms\n", result.latency_ms));
        } else if let Some(error) = &result.error {
            out.push_str(&format!("   Error: {}\n", error));
        }

        out.push('\n');
    }

    out
}

// Truncates a caption that would overflow its column
//
// Counts characters rather than bytes so multi-byte captions can't make
// us slice mid-character. The column is measured in characters, not
// terminal display cells, so double-width glyphs (CJK, emoji) can still
// nudge the | separator; the JSON report is unaffected.
fn fit_caption(caption: &str) -> String {
    if caption.chars().count() <= CAPTION_WIDTH {
        caption.to_string()
    } else {
        let kept: String = caption.chars().take(CAPTION_WIDTH - 3).collect();
        format!("{}...", kept)
    }
}

// Computes the default output path: DEFAULT_REPORT_NAME next to the input
//
// A stable name means each run overwrites the previous report, so there
// is exactly one current report file per URL list.
pub fn default_output_path(input: &Path) -> PathBuf {
    match input.parent() {
        Some(dir) => dir.join(DEFAULT_REPORT_NAME),
        None => PathBuf::from(DEFAULT_REPORT_NAME),
    }
}

// Writes the structured report as pretty-printed JSON, overwriting any
// existing file
//
// This is the program's only persistent side effect. Callers print the
// text report BEFORE calling this, so a write failure never hides the
// results from the user.
pub fn write_report(report: &PollReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to '{}'", path.display()))?;

    Ok(())
}
