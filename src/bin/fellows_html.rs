// Emit the fellows people-grid HTML fragment for one roster CSV.
// Fragment goes to stdout so it can be pasted straight into the page;
// the count summary goes to stderr.

use anyhow::{anyhow, Result};
use rostercheck::html;
use std::{env, io, path::PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let path: PathBuf = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: fellows_html <FELLOWS_CSV>"))?;

    let fellows = html::load_fellows(&path)?;
    let (fragment, counts) = html::render_fellows_html(&fellows);
    println!("{fragment}");

    eprintln!("\n=== COUNT ===");
    eprintln!("Total fellows: {}", counts.total);
    for (track, count) in &counts.per_track {
        eprintln!("{track}: {count}");
    }

    Ok(())
}
