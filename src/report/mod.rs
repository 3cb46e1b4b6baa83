// src/report/mod.rs

use anyhow::Result;
use chrono::Utc;
use std::io::Write;

use crate::analysis::Analyzer;

const BANNER_WIDTH: usize = 80;
const LABEL_WIDTH: usize = 36;

fn banner(w: &mut impl Write, title: &str) -> Result<()> {
    writeln!(w, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(w, "{}", title)?;
    writeln!(w, "{}", "=".repeat(BANNER_WIDTH))?;
    writeln!(w)?;
    Ok(())
}

/// Write the full duplicate-analysis report: duplicates, verified-distinct
/// call-outs, summary counts, and the pairwise cross-section breakdown.
///
/// The layout is for humans; nothing downstream parses it.
pub fn write_report(w: &mut impl Write, analyzer: &Analyzer) -> Result<()> {
    banner(w, "DUPLICATE PARTICIPANT ANALYSIS")?;
    writeln!(w, "generated: {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(w)?;

    let duplicates = analyzer.find_duplicates();
    if duplicates.is_empty() {
        writeln!(w, "no duplicates found across participant sections")?;
        writeln!(w)?;
    } else {
        for dup in &duplicates {
            writeln!(w, "DUPLICATE: '{}'", dup.key)?;
            writeln!(w, "  appears in: {}", dup.sections.join(", "))?;
            writeln!(w)?;
        }
    }

    for entry in analyzer.verified_distinct() {
        writeln!(w, "VERIFIED DISTINCT: '{}'", entry.key)?;
        writeln!(
            w,
            "  appears in: {} (confirmed different individuals)",
            entry.sections.join(", ")
        )?;
        writeln!(w)?;
    }

    banner(w, "SUMMARY STATISTICS")?;
    let summary = analyzer.summary();
    for (label, count) in &summary.per_section {
        writeln!(w, "{:.<LABEL_WIDTH$} {:>4} participants", label, count)?;
    }
    writeln!(
        w,
        "{:.<LABEL_WIDTH$} {:>4} participants",
        "TOTAL (all sections):", summary.total_listed
    )?;
    writeln!(
        w,
        "{:.<LABEL_WIDTH$} {:>4} participants",
        "UNIQUE (after dedup):", summary.total_unique
    )?;
    writeln!(
        w,
        "{:.<LABEL_WIDTH$} {:>4} participants",
        "TRULY UNIQUE (verified distinct):", summary.truly_unique
    )?;
    writeln!(w)?;

    banner(w, "CROSS-SECTION ANALYSIS")?;
    let mut any_overlap = false;
    for (a, b, overlap) in analyzer.section_pairs() {
        if !overlap.duplicates.is_empty() {
            any_overlap = true;
            writeln!(w, "{} <-> {}: {} duplicate(s)", a, b, overlap.duplicates.len())?;
            for key in &overlap.duplicates {
                writeln!(w, "  - {}", key)?;
            }
            writeln!(w)?;
        }
        if !overlap.verified_distinct.is_empty() {
            writeln!(
                w,
                "{} <-> {}: {} verified distinct (same name, different people)",
                a,
                b,
                overlap.verified_distinct.len()
            )?;
            for key in &overlap.verified_distinct {
                writeln!(w, "  - {}", key)?;
            }
            writeln!(w)?;
        }
    }
    if !any_overlap {
        writeln!(
            w,
            "no overlaps between any sections (excluding verified distinct entries)"
        )?;
    }

    Ok(())
}
