//! # dipl CLI entry point
//!
//! Parses command-line arguments, initializes logging, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dipl_cli::context::{RunContext, DEFAULT_STATE_DIR};
use dipl_cli::generate::{run_generate, GenerateArgs};
use dipl_cli::query::{run_list, run_rank, run_show, ListArgs, RankArgs, ShowArgs};
use dipl_cli::resolve::{run_resolve, run_sweep, ResolveArgs, SweepArgs};
use dipl_core::Timestamp;

/// Diplomacy engine CLI.
///
/// Generates diplomatic scenarios between countries, ranks them by
/// relevance, and drives them through their lifecycle. State is kept as
/// JSON files in a local directory.
#[derive(Parser, Debug)]
#[command(name = "dipl", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to the factory configuration YAML.
    #[arg(long, env = "DIPL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Path to a YAML list of tracked relationships.
    #[arg(long, env = "DIPL_RELATIONSHIPS", global = true)]
    relationships: Option<PathBuf>,

    /// Directory holding scenario state files.
    #[arg(long, env = "DIPL_STATE_DIR", default_value = DEFAULT_STATE_DIR, global = true)]
    state_dir: PathBuf,

    /// Pin the clock to an RFC 3339 UTC instant (e.g. 2026-05-01T09:00:00Z).
    #[arg(long, global = true)]
    now: Option<String>,

    /// Seed the random source for reproducible generation.
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a scenario between two countries.
    Generate(GenerateArgs),

    /// List stored scenarios.
    List(ListArgs),

    /// Show one scenario in detail.
    Show(ShowArgs),

    /// Pick the most relevant open scenario for a country.
    Rank(RankArgs),

    /// Record a country's choice on an open scenario (→ COMPLETED).
    Resolve(ResolveArgs),

    /// Expire every open scenario whose deadline has passed (→ EXPIRED).
    Sweep(SweepArgs),
}

impl Cli {
    fn context(&self) -> anyhow::Result<RunContext> {
        let now = self
            .now
            .as_deref()
            .map(Timestamp::parse)
            .transpose()
            .context("invalid --now")?;
        Ok(RunContext {
            state_dir: self.state_dir.clone(),
            config: self.config.clone(),
            relationships: self.relationships.clone(),
            now,
            seed: self.seed,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let result = cli.context().and_then(|ctx| {
        tracing::debug!(state_dir = %ctx.state_dir.display(), "dipl starting");
        match &cli.command {
            Commands::Generate(args) => run_generate(args, &ctx),
            Commands::List(args) => run_list(args, &ctx),
            Commands::Show(args) => run_show(args, &ctx),
            Commands::Rank(args) => run_rank(args, &ctx),
            Commands::Resolve(args) => run_resolve(args, &ctx),
            Commands::Sweep(args) => run_sweep(args, &ctx),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_generate() {
        let cli = Cli::try_parse_from([
            "dipl",
            "generate",
            "--country1",
            "urcea",
            "--country2",
            "caphiria",
            "--type",
            "border_dispute",
            "--time-frame",
            "urgent",
        ])
        .unwrap();
        if let Commands::Generate(args) = cli.command {
            assert_eq!(args.country1, "urcea");
            assert_eq!(args.scenario_type, Some(dipl_core::ScenarioType::BorderDispute));
            assert_eq!(args.time_frame, Some(dipl_core::TimeFrame::Urgent));
            assert!(args.difficulty.is_none());
        } else {
            panic!("expected generate");
        }
    }

    #[test]
    fn cli_parse_rejects_unknown_type() {
        let result = Cli::try_parse_from([
            "dipl",
            "generate",
            "--country1",
            "urcea",
            "--country2",
            "caphiria",
            "--type",
            "alien_invasion",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parse_global_options() {
        let cli = Cli::try_parse_from([
            "dipl",
            "-vv",
            "--state-dir",
            "/tmp/dipl",
            "--now",
            "2026-05-01T09:00:00Z",
            "--seed",
            "42",
            "sweep",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.state_dir, PathBuf::from("/tmp/dipl"));
        let ctx = cli.context().unwrap();
        assert_eq!(ctx.seed, Some(42));
        assert_eq!(ctx.now, Some(Timestamp::parse("2026-05-01T09:00:00Z").unwrap()));
        assert!(matches!(cli.command, Commands::Sweep(_)));
    }

    #[test]
    fn cli_invalid_now_is_an_error() {
        let cli = Cli::try_parse_from(["dipl", "--now", "yesterday", "sweep"]).unwrap();
        assert!(cli.context().is_err());
    }

    #[test]
    fn cli_parse_resolve() {
        let cli = Cli::try_parse_from([
            "dipl",
            "resolve",
            "5b0c2f7e-2d7a-4c39-9d8c-2f6f4ad0b1a3",
            "--choice",
            "diplomatic",
            "--country",
            "urcea",
            "--json",
        ])
        .unwrap();
        if let Commands::Resolve(args) = cli.command {
            assert_eq!(args.choice, "diplomatic");
            assert!(args.json);
        } else {
            panic!("expected resolve");
        }
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["dipl"]).is_err());
    }
}
