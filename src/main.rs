use anyhow::Result;
use rostercheck::{analysis::Analyzer, config::RosterConfig, report, roster};
use std::{env, io};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    // ─── 2) load configuration ───────────────────────────────────────
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "rosters.yaml".to_string());
    let config = RosterConfig::load(&config_path)?;
    info!(
        config = %config_path,
        sections = config.sections.len(),
        known_distinct = config.known_distinct.len(),
        "configuration loaded"
    );

    // ─── 3) load rosters (missing files warn, run continues) ─────────
    let membership = roster::load_rosters(&config.sections)?;

    // ─── 4) analyze + print report ───────────────────────────────────
    let analyzer = Analyzer::new(membership, config.known_distinct_keys());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &analyzer)?;

    Ok(())
}
