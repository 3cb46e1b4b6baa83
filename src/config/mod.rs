// src/config/mod.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fs::File, path::{Path, PathBuf}};

use crate::normalize::normalize;

/// How a section's source file is parsed.
///
/// The tag is supplied per section in the config file rather than sniffed
/// from the file name, so adding a roster never means teaching the loader a
/// new filename substring.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// CSV with a header row; the `Name` column is required, and
    /// `Category`/`Designation` are picked up when present.
    Headered,
    /// Header-less lines of `Name,<rest>`; `#` comments and blank lines
    /// are skipped, only the first comma splits.
    NameFirst,
}

/// One named roster section and where its data comes from.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SectionConfig {
    pub label: String,
    pub path: PathBuf,
    pub mode: ParseMode,
}

/// Full run configuration: the sections to cross-reference plus the curated
/// list of names that collide textually but are verified distinct people.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RosterConfig {
    pub sections: Vec<SectionConfig>,
    #[serde(default)]
    pub known_distinct: Vec<String>,
}

impl RosterConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("opening config file {}", path.display()))?;
        let config: RosterConfig = serde_yaml::from_reader(file)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    /// The known-distinct override list as a normalized key set, ready to
    /// hand to the analyzer.
    pub fn known_distinct_keys(&self) -> BTreeSet<String> {
        self.known_distinct.iter().map(|n| normalize(n)).collect()
    }
}

// ----- Tests -----
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn loads_yaml_config() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
sections:
  - label: "NASC Fellows"
    path: "bios/nasc-fellows.csv"
    mode: name-first
  - label: "Invitees"
    path: "bios/invitees.csv"
    mode: headered
known_distinct:
  - "Amit Kumar"
"#
        )
        .unwrap();

        let cfg = RosterConfig::load(f.path()).unwrap();
        assert_eq!(cfg.sections.len(), 2);
        assert_eq!(cfg.sections[0].mode, ParseMode::NameFirst);
        assert_eq!(cfg.sections[1].mode, ParseMode::Headered);
        assert!(cfg.known_distinct_keys().contains("amit kumar"));
    }

    #[test]
    fn known_distinct_defaults_to_empty() {
        let mut f = NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
sections:
  - label: "Invitees"
    path: "bios/invitees.csv"
    mode: headered
"#
        )
        .unwrap();

        let cfg = RosterConfig::load(f.path()).unwrap();
        assert!(cfg.known_distinct_keys().is_empty());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        assert!(RosterConfig::load("definitely/not/here.yaml").is_err());
    }
}
