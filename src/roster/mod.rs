// src/roster/mod.rs

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{info, warn};

use crate::analysis::Membership;
use crate::config::{ParseMode, SectionConfig};
use crate::normalize::normalize;

/// One row pulled from a roster file. `category` and `designation` are only
/// populated by headered files that carry those columns (the staff roster).
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub name: String,
    pub category: Option<String>,
    pub designation: Option<String>,
}

/// Read every usable record from one roster file.
///
/// Rows with an empty (post-trim) name are dropped. A malformed row is
/// logged and ends the file early, keeping the rows read before it; the
/// caller's other sections are unaffected.
pub fn load_section(path: &Path, mode: ParseMode) -> Result<Vec<RawRecord>> {
    match mode {
        ParseMode::Headered => load_headered(path),
        ParseMode::NameFirst => load_name_first(path),
    }
}

fn load_headered(path: &Path) -> Result<Vec<RawRecord>> {
    let file =
        File::open(path).with_context(|| format!("opening roster {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = rdr
        .headers()
        .with_context(|| format!("reading header row of {}", path.display()))?
        .clone();
    let column = |wanted: &str| headers.iter().position(|h| h.trim() == wanted);

    // Every headered roster must name its people; the role columns are only
    // present on the staff file.
    let name_idx = column("Name")
        .ok_or_else(|| anyhow!("no `Name` column in {}", path.display()))?;
    let category_idx = column("Category");
    let designation_idx = column("Designation");

    let mut records = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    file = %path.display(),
                    row,
                    error = %e,
                    "row read error, skipping rest of file"
                );
                break;
            }
        };

        let name = record.get(name_idx).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }

        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        records.push(RawRecord {
            name: name.to_string(),
            category: field(category_idx),
            designation: field(designation_idx),
        });
    }

    Ok(records)
}

fn load_name_first(path: &Path) -> Result<Vec<RawRecord>> {
    let file =
        File::open(path).with_context(|| format!("opening roster {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!(
                    file = %path.display(),
                    error = %e,
                    "line read error, skipping rest of file"
                );
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Only the first comma splits: the left side is the name, the rest
        // (a bio, a track, whatever the file carries) is ignored here.
        let name = line.split_once(',').map_or(line, |(n, _)| n).trim();
        if name.is_empty() {
            continue;
        }

        records.push(RawRecord {
            name: name.to_string(),
            category: None,
            designation: None,
        });
    }

    Ok(records)
}

/// Load every configured section into a single Membership mapping.
///
/// A section whose file does not exist is warned about and left empty; the
/// remaining sections still load. Anything else (unreadable file, a headered
/// roster without a `Name` column) is a config error and propagates.
pub fn load_rosters(sections: &[SectionConfig]) -> Result<Membership> {
    let mut membership = Membership::default();

    for section in sections {
        membership.register_section(&section.label);

        if !section.path.exists() {
            warn!(
                section = %section.label,
                path = %section.path.display(),
                "roster file not found, section left empty"
            );
            continue;
        }

        let records = load_section(&section.path, section.mode)?;
        info!(
            section = %section.label,
            records = records.len(),
            "loaded roster"
        );

        for record in &records {
            membership.insert(&section.label, &normalize(&record.name));
        }
    }

    Ok(membership)
}

// ----- Tests -----
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_file(content: &[u8]) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn headered_extracts_name_and_roles() {
        let f = write_file(
            b"Name,Category,Designation\n\
              Asha Rao , Research ,Fellow\n\
              ,Research,Fellow\n\
              Vikram Shah,,\n",
        );

        let records = load_section(f.path(), ParseMode::Headered).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Asha Rao");
        assert_eq!(records[0].category.as_deref(), Some("Research"));
        assert_eq!(records[0].designation.as_deref(), Some("Fellow"));
        assert_eq!(records[1].name, "Vikram Shah");
        assert_eq!(records[1].category, None);
    }

    #[test]
    fn headered_without_name_column_is_an_error() {
        let f = write_file(b"Email,Category\na@b.c,Research\n");
        assert!(load_section(f.path(), ParseMode::Headered).is_err());
    }

    #[test]
    fn headered_row_error_keeps_earlier_rows() {
        // Invalid UTF-8 in the second data row; the first survives.
        let f = write_file(b"Name,Bio\nAlice,ok\n\xff\xfe,broken\nBob,fine\n");
        let records = load_section(f.path(), ParseMode::Headered).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Alice");
    }

    #[test]
    fn name_first_skips_comments_and_blanks() {
        let f = write_file(b"# roster dump\nAsha Rao,long bio here\n\nVikram Shah,another bio\n");
        let records = load_section(f.path(), ParseMode::NameFirst).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Asha Rao");
        assert_eq!(records[1].name, "Vikram Shah");
    }

    #[test]
    fn name_first_splits_on_first_comma_only() {
        let f = write_file(b"Rao, Asha, PhD\n");
        let records = load_section(f.path(), ParseMode::NameFirst).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Rao");
    }

    #[test]
    fn missing_file_leaves_section_empty_and_loads_the_rest() {
        let good = write_file(b"Name\nAsha Rao\n");
        let sections = vec![
            SectionConfig {
                label: "Ghosts".into(),
                path: PathBuf::from("no/such/file.csv"),
                mode: ParseMode::Headered,
            },
            SectionConfig {
                label: "Fellows".into(),
                path: good.path().to_path_buf(),
                mode: ParseMode::Headered,
            },
        ];

        let membership = load_rosters(&sections).unwrap();
        assert_eq!(membership.section_keys("Ghosts").unwrap().len(), 0);
        assert_eq!(membership.section_keys("Fellows").unwrap().len(), 1);
    }

    #[test]
    fn within_section_repeats_collapse() {
        let f = write_file(b"Name\nAsha Rao\nASHA RAO \n");
        let sections = vec![SectionConfig {
            label: "Fellows".into(),
            path: f.path().to_path_buf(),
            mode: ParseMode::Headered,
        }];

        let membership = load_rosters(&sections).unwrap();
        let keys = membership.section_keys("Fellows").unwrap();
        assert_eq!(keys.len(), 1);
        assert!(keys.contains("asha rao"));
    }
}
