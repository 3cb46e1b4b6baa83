// src/analysis/mod.rs
//
// Pure in-memory aggregation over the loaded rosters: which normalized name
// appears in which sections, and which of those collisions are real
// duplicates versus verified distinct people.

use std::collections::{BTreeMap, BTreeSet};

/// Which sections each normalized name was observed in, and the reverse.
///
/// Both directions use set semantics, so a name repeated inside one file
/// still contributes a single membership.
#[derive(Debug, Default, Clone)]
pub struct Membership {
    by_section: BTreeMap<String, BTreeSet<String>>,
    by_key: BTreeMap<String, BTreeSet<String>>,
}

impl Membership {
    /// Make a section visible even before (or without) any records, so
    /// empty rosters still show up in summaries.
    pub fn register_section(&mut self, section: &str) {
        self.by_section.entry(section.to_string()).or_default();
    }

    /// Record one observation of `key` in `section`.
    pub fn insert(&mut self, section: &str, key: &str) {
        self.by_section
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string());
        self.by_key
            .entry(key.to_string())
            .or_default()
            .insert(section.to_string());
    }

    /// Section labels in lexicographic order.
    pub fn section_labels(&self) -> Vec<&str> {
        self.by_section.keys().map(String::as_str).collect()
    }

    pub fn section_keys(&self, section: &str) -> Option<&BTreeSet<String>> {
        self.by_section.get(section)
    }

    /// Number of distinct normalized keys across all sections.
    pub fn unique_key_count(&self) -> usize {
        self.by_key.len()
    }
}

/// One name observed in more than one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub key: String,
    /// Lexicographically ordered.
    pub sections: Vec<String>,
}

/// The shared names between one pair of sections, split by whether the
/// override list vouches for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairwiseOverlap {
    pub duplicates: BTreeSet<String>,
    pub verified_distinct: BTreeSet<String>,
}

impl PairwiseOverlap {
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty() && self.verified_distinct.is_empty()
    }
}

/// Headline counts for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// (section label, unique names in that section), in label order.
    pub per_section: Vec<(String, usize)>,
    /// Sum of per-section unique counts (not deduplicated across sections).
    pub total_listed: usize,
    /// Distinct normalized keys across all sections.
    pub total_unique: usize,
    /// `total_unique` plus one per verified-distinct collision, since those
    /// collapsed entries are really two people.
    pub truly_unique: usize,
}

/// Cross-section duplicate analysis over a built [`Membership`].
///
/// The known-distinct set is handed in explicitly so callers (and tests) can
/// swap override lists without touching shared state.
pub struct Analyzer {
    membership: Membership,
    known_distinct: BTreeSet<String>,
}

impl Analyzer {
    pub fn new(membership: Membership, known_distinct: BTreeSet<String>) -> Self {
        Self {
            membership,
            known_distinct,
        }
    }

    /// Names seen in more than one section, excluding the verified-distinct
    /// overrides. Ordered by key.
    pub fn find_duplicates(&self) -> Vec<Overlap> {
        self.multi_section_entries(|key| !self.known_distinct.contains(key))
    }

    /// Names seen in more than one section that the override list vouches
    /// for. Reported separately from duplicates, never merged.
    pub fn verified_distinct(&self) -> Vec<Overlap> {
        self.multi_section_entries(|key| self.known_distinct.contains(key))
    }

    fn multi_section_entries(&self, keep: impl Fn(&str) -> bool) -> Vec<Overlap> {
        self.membership
            .by_key
            .iter()
            .filter(|(key, sections)| sections.len() > 1 && keep(key.as_str()))
            .map(|(key, sections)| Overlap {
                key: key.clone(),
                sections: sections.iter().cloned().collect(),
            })
            .collect()
    }

    /// Shared names between two sections, split into true duplicates and
    /// verified-distinct call-outs. Symmetric in its arguments.
    pub fn pairwise_overlap(&self, a: &str, b: &str) -> PairwiseOverlap {
        let empty = BTreeSet::new();
        let keys_a = self.membership.section_keys(a).unwrap_or(&empty);
        let keys_b = self.membership.section_keys(b).unwrap_or(&empty);

        let mut overlap = PairwiseOverlap::default();
        for key in keys_a.intersection(keys_b) {
            if self.known_distinct.contains(key) {
                overlap.verified_distinct.insert(key.clone());
            } else {
                overlap.duplicates.insert(key.clone());
            }
        }
        overlap
    }

    /// Every unordered pair of distinct sections exactly once, with its
    /// overlap. Pairs are emitted in lexicographic order.
    pub fn section_pairs(&self) -> Vec<(String, String, PairwiseOverlap)> {
        let labels = self.membership.section_labels();
        let mut pairs = Vec::new();
        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                pairs.push((a.to_string(), b.to_string(), self.pairwise_overlap(a, b)));
            }
        }
        pairs
    }

    pub fn summary(&self) -> Summary {
        let per_section: Vec<(String, usize)> = self
            .membership
            .by_section
            .iter()
            .map(|(label, keys)| (label.clone(), keys.len()))
            .collect();

        let total_listed = per_section.iter().map(|(_, n)| n).sum();
        let total_unique = self.membership.unique_key_count();
        let verified_collisions = self
            .known_distinct
            .iter()
            .filter(|key| {
                self.membership
                    .by_key
                    .get(*key)
                    .map_or(false, |sections| sections.len() > 1)
            })
            .count();

        Summary {
            per_section,
            total_listed,
            total_unique,
            truly_unique: total_unique + verified_collisions,
        }
    }
}
