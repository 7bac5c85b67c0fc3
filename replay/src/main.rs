use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use brawl_core::{run_replay, Archetype, MatchConfig, MatchSummary, ReplayInput};
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "brawl-replay")]
#[command(about = "Run a recorded two-player match headlessly and print its summary")]
struct Args {
    /// Replay JSON to run (reads stdin when omitted)
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// Override player 1's archetype
    #[arg(long, value_parser = parse_archetype)]
    p1: Option<Archetype>,

    /// Override player 2's archetype
    #[arg(long, value_parser = parse_archetype)]
    p2: Option<Archetype>,

    /// Override the frame cap from the replay's config
    #[arg(long)]
    max_frames: Option<u32>,

    /// Write the final game state as JSON
    #[arg(long)]
    dump_state: Option<PathBuf>,

    /// Log hits, KOs and the match result
    #[arg(short, long)]
    verbose: bool,
}

fn parse_archetype(name: &str) -> std::result::Result<Archetype, String> {
    Archetype::from_name(name).ok_or_else(|| {
        let known: Vec<&str> = Archetype::ALL.iter().map(|a| a.name()).collect();
        format!("unknown archetype '{name}', expected one of: {}", known.join(", "))
    })
}

fn load_input(path: Option<&Path>) -> Result<ReplayInput> {
    let json_str = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read replay: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read replay from stdin")?;
            buf
        }
    };
    let input: ReplayInput =
        serde_json::from_str(&json_str).context("failed to parse replay JSON")?;
    validate_config(&input.config).context("invalid match config in replay")?;
    Ok(input)
}

/// Reject configs the simulation cannot start from.
fn validate_config(config: &MatchConfig) -> Result<()> {
    let stage = &config.stage;
    if !(stage.width.is_finite() && stage.width > 0.0)
        || !(stage.height.is_finite() && stage.height > 0.0)
    {
        bail!("arena must have a positive size, got {}x{}", stage.width, stage.height);
    }
    if stage.platforms.is_empty() {
        bail!("stage has no platforms");
    }
    if stage.spawn_points.len() < 2 {
        bail!(
            "stage needs a spawn point per player, got {}",
            stage.spawn_points.len()
        );
    }
    if config.initial_stock == 0 {
        bail!("initial stock must be at least 1");
    }
    Ok(())
}

fn apply_overrides(input: &mut ReplayInput, args: &Args) {
    if let Some(a) = args.p1 {
        input.archetypes[0] = a;
    }
    if let Some(a) = args.p2 {
        input.archetypes[1] = a;
    }
    if let Some(max_frames) = args.max_frames {
        input.config.max_frames = max_frames;
    }
}

fn summary_json(input: &ReplayInput, summary: &MatchSummary) -> serde_json::Value {
    serde_json::json!({
        "seed": input.config.seed,
        "archetypes": input.archetypes,
        "frames": summary.frames,
        "match_over": summary.match_over,
        "winner": summary.winner,
        "stocks": summary.stocks,
        "damage": summary.damage,
        "transcript_hash": hex::encode(summary.transcript_hash),
        "state_hash": hex::encode(summary.state_hash),
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut input = load_input(args.transcript.as_deref())?;
    apply_overrides(&mut input, &args);
    info!(
        frames = input.transcript.len(),
        seed = input.config.seed,
        p1 = input.archetypes[0].name(),
        p2 = input.archetypes[1].name(),
        "replay loaded"
    );

    let (state, summary) = run_replay(&input);
    info!(frames = summary.frames, winner = ?summary.winner, "replay finished");

    let json = serde_json::to_string_pretty(&summary_json(&input, &summary))
        .context("failed to serialize summary")?;
    println!("{json}");

    if let Some(path) = &args.dump_state {
        let state_json =
            serde_json::to_vec_pretty(&state).context("failed to serialize final state")?;
        fs::write(path, state_json)
            .with_context(|| format!("failed writing state: {}", path.display()))?;
        info!(path = %path.display(), "final state written");
    }

    Ok(())
}
