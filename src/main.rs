use anyhow::Context;
use chrono::Utc;
use craps_engine::domain::LineSide;
use craps_engine::engine::RebetProposal;
use craps_engine::{
    config::Config, BetSpot, JsonFileSessionStore, Placement, SaveMode, Table,
};
use std::io::{self, BufRead, Write};

/// Default opening line wager when no rebet amount is configured.
const OPENING_BET: u64 = 10;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        eprintln!("Replay failed: {:#}", e);
        std::process::exit(1);
    }
}

/// Replays `d1 d2` lines from stdin through one table, printing each
/// resolution and the final session record as JSON.
fn run(config: Config) -> anyhow::Result<()> {
    let session_path = config.session_path.clone();
    let opening = if config.rebet.amount > 0 {
        config.rebet.amount
    } else {
        OPENING_BET
    };

    let mut table = Table::new(config, Utc::now());
    place_opening(&mut table, opening);

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    for (lineno, line) in stdin.lock().lines().enumerate() {
        let line = line.context("reading stdin")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (d1, d2) = parse_dice(line)
            .with_context(|| format!("line {}: expected two die values, got {:?}", lineno + 1, line))?;
        let resolution = table
            .roll(d1, d2)
            .with_context(|| format!("line {}", lineno + 1))?;
        serde_json::to_writer(&mut out, &resolution)?;
        writeln!(out)?;

        // Winning line stakes come back to hand before the next hand starts.
        if resolution.event.resolves_hand() {
            for side in [LineSide::Pass, LineSide::DontPass] {
                table.collect_stake(side.into());
            }
        }
        if let Some(proposal) = resolution.rebet.or_else(|| table.rebet_proposal()) {
            apply(&mut table, proposal);
        }
    }

    let record = table
        .finalize(Utc::now())
        .cloned()
        .context("no session in progress")?;

    if let Some(path) = session_path {
        let mut store = JsonFileSessionStore::new(path);
        table
            .save(&mut store, SaveMode::Force)
            .context("saving session")?;
        tracing::info!(path = %store.path().display(), "Session written");
    }

    serde_json::to_writer_pretty(&mut out, &record)?;
    writeln!(out)?;
    Ok(())
}

fn place_opening(table: &mut Table, amount: u64) {
    if let Placement::Rejected(reason) = table.place_bet(BetSpot::PassLine, amount) {
        tracing::warn!(reason = %reason, "Opening wager rejected");
    }
}

fn apply(table: &mut Table, proposal: RebetProposal) {
    if let Placement::Rejected(reason) = table.apply_rebet(proposal) {
        tracing::warn!(reason = %reason, "Rebet rejected");
    }
}

fn parse_dice(line: &str) -> Option<(u8, u8)> {
    let mut parts = line.split(|c: char| c.is_whitespace() || c == ',' || c == '-');
    let mut next = || parts.find(|p| !p.is_empty())?.parse::<u8>().ok();
    let d1 = next()?;
    let d2 = next()?;
    Some((d1, d2))
}
