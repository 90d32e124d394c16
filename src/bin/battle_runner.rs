//! Headless Battle Runner
//!
//! Loads a roster file, splits it into two teams and fights them with the
//! chosen strategies. Prints a text or JSON report.

use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use skirmish::battle::{BattleOrchestrator, BattleReport, RoundSummary, StrategyKind};
use skirmish::combat::ActionRecord;
use skirmish::core::config::{config, set_config, SkirmishConfig};
use skirmish::core::error::Result;
use skirmish::core::BattleSetupError;
use skirmish::persist::FileCharacterStore;
use skirmish::roster::Roster;
use skirmish::team::TeamNode;

/// Headless Battle Runner - strategy vs strategy team battles
#[derive(Parser, Debug)]
#[command(name = "battle_runner")]
#[command(about = "Run a seeded team battle from a roster file")]
struct Args {
    /// Roster file, one `name;strength;agility;intelligence` per line
    #[arg(long, default_value = "data/roster.txt")]
    roster: PathBuf,

    /// Settings file with [limits] and [battle] tables
    #[arg(long, default_value = "data/settings.toml")]
    settings: PathBuf,

    /// Comma-separated member names for side A (default: odd roster entries)
    #[arg(long, value_delimiter = ',')]
    team_a: Vec<String>,

    /// Comma-separated member names for side B (default: even roster entries)
    #[arg(long, value_delimiter = ',')]
    team_b: Vec<String>,

    /// Strategy for side A: aggressive, defensive or balanced
    #[arg(long, default_value = "balanced")]
    strategy_a: StrategyKind,

    /// Strategy for side B
    #[arg(long, default_value = "balanced")]
    strategy_b: StrategyKind,

    /// Override the round cap from the settings file
    #[arg(long)]
    max_rounds: Option<u32>,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Ask on stdin whether to continue at every poll interval
    #[arg(long)]
    interactive: bool,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Include the action history in the output
    #[arg(long)]
    history: bool,

    /// Enable debug logging (every resolved action)
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    seed: u64,
    strategy_a: String,
    strategy_b: String,
    report: BattleReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<ActionRecord>>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "skirmish=debug"
    } else {
        "skirmish=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    let loaded = if args.settings.exists() {
        SkirmishConfig::load(&args.settings)?
    } else {
        tracing::warn!(
            path = %args.settings.display(),
            "Settings file not found - using defaults"
        );
        SkirmishConfig::default()
    };
    if set_config(loaded).is_err() {
        tracing::warn!("Settings already initialised");
    }
    let settings = config();

    let mut battle_config = settings.battle.clone();
    if let Some(max_rounds) = args.max_rounds {
        battle_config.max_rounds = max_rounds;
        battle_config.validate()?;
    }

    let mut roster = Roster::new(settings.limits.clone());
    let imported = roster.import_from(&FileCharacterStore::new(&args.roster))?;
    tracing::info!(imported, path = %args.roster.display(), "Roster loaded");

    let (side_a, side_b) = build_sides(&roster, &args)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut orchestrator = BattleOrchestrator::with_seed(battle_config, seed);
    let strategy_a = args.strategy_a.build();
    let strategy_b = args.strategy_b.build();

    let interactive = args.interactive;
    let report = orchestrator.start_battle(
        &side_a,
        &side_b,
        strategy_a.as_ref(),
        strategy_b.as_ref(),
        |summary| !interactive || ask_to_continue(summary),
    )?;

    let history: Option<Vec<ActionRecord>> = args
        .history
        .then(|| orchestrator.history().records().cloned().collect());

    let result = RunResult {
        seed,
        strategy_a: strategy_a.name().to_string(),
        strategy_b: strategy_b.name().to_string(),
        report,
        history,
    };

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        "text" => print_text(&result, &side_a, &side_b),
        _ => {
            eprintln!("Unknown format '{}', defaulting to text", args.format);
            print_text(&result, &side_a, &side_b);
        }
    }

    Ok(())
}

/// Explicit member lists, or alternate roster entries between the sides
fn build_sides(roster: &Roster, args: &Args) -> Result<(TeamNode, TeamNode)> {
    let names = roster.names();
    let (a, b): (Vec<String>, Vec<String>) = if args.team_a.is_empty() && args.team_b.is_empty() {
        let (a, b): (Vec<_>, Vec<_>) = names.into_iter().enumerate().partition(|(i, _)| i % 2 == 0);
        (
            a.into_iter().map(|(_, n)| n).collect(),
            b.into_iter().map(|(_, n)| n).collect(),
        )
    } else {
        (args.team_a.clone(), args.team_b.clone())
    };

    if a.is_empty() {
        return Err(BattleSetupError::EmptySide("Side A".into()).into());
    }
    if b.is_empty() {
        return Err(BattleSetupError::EmptySide("Side B".into()).into());
    }

    let a_refs: Vec<&str> = a.iter().map(String::as_str).collect();
    let b_refs: Vec<&str> = b.iter().map(String::as_str).collect();
    Ok((roster.team("Side A", &a_refs)?, roster.team("Side B", &b_refs)?))
}

fn ask_to_continue(summary: &RoundSummary) -> bool {
    eprint!(
        "Round {} done ({} vs {} standing). Continue? [Y/n] ",
        summary.round, summary.side_a_alive, summary.side_b_alive
    );
    if io::stderr().flush().is_err() {
        return true;
    }
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => true,
        Ok(_) => !matches!(line.trim().to_lowercase().as_str(), "n" | "no"),
    }
}

fn print_text(result: &RunResult, side_a: &TeamNode, side_b: &TeamNode) {
    let report = &result.report;

    println!("Battle Result");
    println!("=============");
    for line in side_a.outline().iter().chain(side_b.outline().iter()) {
        println!("{}", line);
    }
    println!();
    println!("Outcome: {}", report.outcome);
    println!("Rounds: {}", report.rounds);
    println!("Side A survivors: {}", report.side_a_survivors.join(", "));
    println!("Side B survivors: {}", report.side_b_survivors.join(", "));
    println!("Knockouts: {}", report.stats.knockouts.join(", "));
    println!();
    for actor in &report.stats.actors {
        println!(
            "  {:<12} actions {:>3} ({:>5.1}%)  damage {:>5}  crits {:>2}",
            actor.name,
            actor.actions,
            actor.action_share_percent,
            actor.damage_dealt,
            actor.critical_hits
        );
    }
    if let Some(history) = &result.history {
        println!();
        for record in history {
            println!("{}", record);
        }
    }
    println!();
    println!("Strategies: {} vs {}", result.strategy_a, result.strategy_b);
    println!("Seed: {}", result.seed);
}
