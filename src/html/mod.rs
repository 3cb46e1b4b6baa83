// src/html/mod.rs
//
// Static HTML fragment for the "fellows" people grid, grouped by fellowship
// track. Reads one headered roster CSV directly; this never goes through the
// overlap analyzer.

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use once_cell::sync::Lazy;
use std::{collections::HashMap, fs::File, path::Path};

/// Display label and heading color for one fellowship track.
#[derive(Debug, Clone, Copy)]
pub struct TrackInfo {
    pub label: &'static str,
    pub color: &'static str,
}

/// Tracks in the order they appear on the page.
pub const TRACK_ORDER: &[&str] = &["NASC Fellow", "NASP Fellow", "NAST Fellow", "LEPF Fellow"];

static TRACK_MAP: Lazy<HashMap<&'static str, TrackInfo>> = Lazy::new(|| {
    HashMap::from([
        (
            "NASC Fellow",
            TrackInfo { label: "NASC - China Track", color: "#1d3557" },
        ),
        (
            "NASP Fellow",
            TrackInfo { label: "NASP - Pakistan Track", color: "#2d6a4f" },
        ),
        (
            "NAST Fellow",
            TrackInfo { label: "NAST - Tech Geopolitics", color: "#7b2d8b" },
        ),
        (
            "LEPF Fellow",
            TrackInfo { label: "LEPF - Law Enforcement", color: "#b5451b" },
        ),
    ])
});

/// Fellows who submitted a photo; everyone else renders name-only.
static PHOTO_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Aaratrica Kashyap", "Aaratrica Kashyap - Reea Kashyap.jpeg"),
        ("Anandana Kapur", "Anandana Kapur.png"),
        ("Arpit Tripathi", "arpit_tripathi_photo - Arpit.jpg"),
        ("Bhargavi PBA", "Bhargavi PBA_photo - Bhargavi PBA.png"),
        ("Chetna Anjali", "chetna.jpeg"),
        ("Debasri Mukherjee", "DEBASRI PASSPORT.jpg"),
        ("Jason Joseph", "Protrait - Jason Joseph.jpg"),
        ("Kashish Parpiani", "Kashish Parpiani - Kashish Parpiani.jpeg"),
        ("Manav Gudwani", "IMAGE. - Manav Gudwani.jpg"),
        ("Neeraj Gudipati", "Neeraj_Gudipati_NAST - Neeraj Gudipati.jpeg"),
        ("Nistha Kumari Singh", "Nistha Photo - Nistha.png"),
        ("Nrusingha Narayan Dey", "NRUSINGHA - Nrusingha narayan Dey.jpg"),
        ("Pranav Satyanath", "IMG - Pranav Satyanath.jpg"),
        ("Rajesh Gopal", "rajesh.jpeg"),
        ("Shubham Shukla", "20241018_190653(1) - Shubham Shukla.jpg"),
        ("Siddhant Chandra", "Siddhant Chandra - Reea Kashyap.jpeg"),
        ("Soumya Kanti Ghosh", "Soumya kanti Ghosh - Soumya kanti Ghosh.jpeg"),
        ("Yash Khandelwal", "Yash Khandelwal - Yash Khandelwal.jpg"),
    ])
});

/// Per-track and overall fellow counts, for the stderr summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FellowCounts {
    pub total: usize,
    /// (track key, count), in page order, tracks with no fellows omitted.
    pub per_track: Vec<(String, usize)>,
}

/// Read `(name, track)` pairs from a roster with `Name` and
/// `Fellowship Track` columns. Both columns are required; the data is
/// curated, so their absence is a config error.
pub fn load_fellows(path: &Path) -> Result<Vec<(String, String)>> {
    let file =
        File::open(path).with_context(|| format!("opening fellows roster {}", path.display()))?;
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(file);

    let headers = rdr
        .headers()
        .with_context(|| format!("reading header row of {}", path.display()))?
        .clone();
    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim() == wanted)
            .ok_or_else(|| anyhow!("no `{}` column in {}", wanted, path.display()))
    };
    let name_idx = column("Name")?;
    let track_idx = column("Fellowship Track")?;

    let mut fellows = Vec::new();
    for result in rdr.records() {
        let record =
            result.with_context(|| format!("reading row of {}", path.display()))?;
        let name = record.get(name_idx).unwrap_or("").trim();
        let track = record.get(track_idx).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }
        fellows.push((name.to_string(), track.to_string()));
    }

    Ok(fellows)
}

/// Render the self-contained fragment: one heading plus card grid per track,
/// tracks in fixed page order, names sorted within a track.
pub fn render_fellows_html(fellows: &[(String, String)]) -> (String, FellowCounts) {
    let mut by_track: HashMap<&str, Vec<&str>> = HashMap::new();
    for (name, track) in fellows {
        by_track.entry(track.as_str()).or_default().push(name);
    }

    let mut html = String::new();
    html.push_str("<div class=\"people-group\" id=\"people-fellows\">");

    let mut counts = FellowCounts { total: 0, per_track: Vec::new() };

    for &track_key in TRACK_ORDER {
        let Some(names) = by_track.get(track_key) else {
            continue;
        };
        if names.is_empty() {
            continue;
        }

        let mut names = names.clone();
        names.sort_unstable();

        let info = &TRACK_MAP[track_key];
        html.push_str(&format!(
            "<div class=\"people-track-section\"><div class=\"people-track-heading\" \
             style=\"background:{};\">{}</div><div class=\"people-grid\">",
            info.color, info.label
        ));

        for name in &names {
            counts.total += 1;
            match PHOTO_MAP.get(name) {
                Some(photo) => html.push_str(&format!(
                    "<div class=\"person-card\"><img src=\"images/nast-fellows/{photo}\" \
                     alt=\"{name}\" style=\"width:100%;height:120px;object-fit:cover;\
                     border-radius:4px;\" onerror=\"this.style.display='none'\">\
                     <div class=\"person-name\" style=\"margin-top:8px;\">{name}</div></div>"
                )),
                None => html.push_str(&format!(
                    "<div class=\"person-card\"><div class=\"person-name\" \
                     style=\"margin-top:8px;\">{name}</div></div>"
                )),
            }
        }

        html.push_str("</div></div>");
        counts.per_track.push((track_key.to_string(), names.len()));
    }

    html.push_str("</div>");
    (html, counts)
}

// ----- Tests -----
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fellows(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(n, t)| (n.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn loads_name_and_track_columns() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            "Name,Fellowship Track,Bio\nAsha Rao,NASC Fellow,bio\n ,NASC Fellow,bio\n"
        )
        .unwrap();

        let loaded = load_fellows(f.path()).unwrap();
        assert_eq!(loaded, fellows(&[("Asha Rao", "NASC Fellow")]));
    }

    #[test]
    fn missing_track_column_is_an_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "Name,Bio\nAsha Rao,bio\n").unwrap();
        assert!(load_fellows(f.path()).is_err());
    }

    #[test]
    fn groups_by_track_in_page_order_with_sorted_names() {
        let data = fellows(&[
            ("Zoya Khan", "NASP Fellow"),
            ("Asha Rao", "NASP Fellow"),
            ("Ben Thomas", "NASC Fellow"),
        ]);
        let (html, counts) = render_fellows_html(&data);

        // NASC section precedes NASP regardless of input order.
        let nasc = html.find("NASC - China Track").unwrap();
        let nasp = html.find("NASP - Pakistan Track").unwrap();
        assert!(nasc < nasp);

        // Names sorted within a track.
        let asha = html.find("Asha Rao").unwrap();
        let zoya = html.find("Zoya Khan").unwrap();
        assert!(asha < zoya);

        assert_eq!(counts.total, 3);
        assert_eq!(
            counts.per_track,
            vec![("NASC Fellow".to_string(), 1), ("NASP Fellow".to_string(), 2)]
        );
    }

    #[test]
    fn unknown_tracks_are_skipped() {
        let data = fellows(&[("Asha Rao", "Mystery Track")]);
        let (html, counts) = render_fellows_html(&data);
        assert_eq!(counts.total, 0);
        assert!(!html.contains("Asha Rao"));
    }

    #[test]
    fn known_photo_gets_an_img_tag() {
        let data = fellows(&[
            ("Anandana Kapur", "NASC Fellow"),
            ("No Photo Person", "NASC Fellow"),
        ]);
        let (html, _) = render_fellows_html(&data);
        assert!(html.contains("Anandana Kapur.png"));
        assert!(html.contains("No Photo Person"));
    }
}
