// Cross-reference the staff roster against every configured participant
// section, with role detail for each overlap and a per-category breakdown
// of the staff list.

use anyhow::{anyhow, Result};
use rostercheck::{
    config::{ParseMode, RosterConfig, SectionConfig},
    normalize::normalize,
    roster,
};
use std::collections::BTreeMap;
use std::{
    env, io,
    path::{Path, PathBuf},
};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const BANNER_WIDTH: usize = 100;

struct StaffRole {
    name: String,
    category: String,
    designation: String,
}

fn banner(title: &str) {
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("{title}");
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!();
}

/// The staff roster is usually also configured as a regular section for the
/// duplicate analysis; comparing it against itself would report every staff
/// member as an overlap.
fn is_staff_source(section: &SectionConfig, staff_path: &Path) -> bool {
    if section.path == staff_path {
        return true;
    }
    match (section.path.canonicalize(), staff_path.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let staff_path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: staff_compare <STAFF_CSV> [CONFIG_YAML]"))?;
    let config_path = env::args()
        .nth(2)
        .unwrap_or_else(|| "rosters.yaml".to_string());
    let config = RosterConfig::load(&config_path)?;

    // The staff roster is the headered variant that carries roles.
    let mut staff: BTreeMap<String, StaffRole> = BTreeMap::new();
    for record in roster::load_section(&staff_path, ParseMode::Headered)? {
        staff.insert(
            normalize(&record.name),
            StaffRole {
                name: record.name,
                category: record.category.unwrap_or_default(),
                designation: record.designation.unwrap_or_default(),
            },
        );
    }

    // Every other section, keeping the original display name per key.
    let mut sections: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for section in &config.sections {
        if is_staff_source(section, &staff_path) {
            info!(
                section = %section.label,
                "section points at the staff roster, excluded from comparison"
            );
            continue;
        }
        let members = sections.entry(section.label.clone()).or_default();
        if !section.path.exists() {
            warn!(
                section = %section.label,
                path = %section.path.display(),
                "roster file not found, section left empty"
            );
            continue;
        }
        for record in roster::load_section(&section.path, section.mode)? {
            members.insert(normalize(&record.name), record.name);
        }
    }

    banner("STAFF vs PARTICIPANT SECTIONS");

    let mut overlaps_found = false;
    for (label, members) in &sections {
        let shared: Vec<&String> = members
            .keys()
            .filter(|key| staff.contains_key(key.as_str()))
            .collect();
        if shared.is_empty() {
            continue;
        }
        overlaps_found = true;

        println!("{}", "=".repeat(BANNER_WIDTH));
        println!("STAFF <-> {}: {} overlap(s)", label.to_uppercase(), shared.len());
        println!("{}", "=".repeat(BANNER_WIDTH));
        for key in shared {
            let role = &staff[key];
            println!();
            println!("  {}", role.name);
            println!("    staff role:");
            println!("      - category: {}", role.category);
            println!("      - designation: {}", role.designation);
            println!("    also listed in: {label}");
            println!("      - name: {}", members[key]);
        }
        println!();
    }
    if !overlaps_found {
        println!("no overlaps between the staff roster and the participant sections");
        println!();
    }

    banner("SUMMARY STATISTICS");
    println!("{:.<36} {:>4}", "Staff members:", staff.len());
    for (label, members) in &sections {
        println!("{:.<36} {:>4}", label, members.len());
    }
    println!();

    banner("BREAKDOWN BY STAFF CATEGORY");
    let mut categories: BTreeMap<&str, Vec<&StaffRole>> = BTreeMap::new();
    for role in staff.values() {
        categories.entry(role.category.as_str()).or_default().push(role);
    }
    for (category, mut members) in categories {
        members.sort_by(|a, b| a.name.cmp(&b.name));
        println!("{}: {} members", category, members.len());
        for member in members {
            let key = normalize(&member.name);
            let also_in: Vec<&str> = sections
                .iter()
                .filter(|(_, m)| m.contains_key(&key))
                .map(|(label, _)| label.as_str())
                .collect();
            if also_in.is_empty() {
                println!("  - {} - {}", member.name, member.designation);
            } else {
                println!(
                    "  ! {} - {} [ALSO IN: {}]",
                    member.name,
                    member.designation,
                    also_in.join(", ")
                );
            }
        }
        println!();
    }

    Ok(())
}

// ----- Tests -----
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn section(label: &str, path: PathBuf, mode: ParseMode) -> SectionConfig {
        SectionConfig {
            label: label.into(),
            path,
            mode,
        }
    }

    #[test]
    fn the_staff_rosters_own_section_is_excluded() {
        let dir = tempdir().unwrap();
        let staff = dir.path().join("Takshashila_Team.csv");
        fs::write(&staff, "Name,Category,Designation\nAsha Rao,Research,Fellow\n").unwrap();

        let own = section("Takshashila Team", staff.clone(), ParseMode::Headered);
        assert!(is_staff_source(&own, &staff));
    }

    #[test]
    fn sections_with_other_files_are_kept() {
        let dir = tempdir().unwrap();
        let staff = dir.path().join("Takshashila_Team.csv");
        fs::write(&staff, "Name\nAsha Rao\n").unwrap();

        let other = section(
            "NASC Fellows",
            dir.path().join("nasc-fellows.csv"),
            ParseMode::NameFirst,
        );
        assert!(!is_staff_source(&other, &staff));
    }

    #[test]
    fn the_same_file_through_a_different_path_is_still_excluded() {
        let dir = tempdir().unwrap();
        let staff = dir.path().join("staff.csv");
        fs::write(&staff, "Name\nAsha Rao\n").unwrap();

        let dotted = section(
            "Takshashila Team",
            dir.path().join(".").join("staff.csv"),
            ParseMode::Headered,
        );
        assert!(is_staff_source(&dotted, &staff));
    }
}
