//! # dipl-cli — CLI Tool for the Diplomacy Engine
//!
//! Provides the `dipl` command-line interface over a local state
//! directory of scenario JSON files.
//!
//! ## Subcommands
//!
//! - `dipl generate`: Create a scenario between two countries.
//! - `dipl list`: List stored scenarios.
//! - `dipl show`: Show one scenario with its options and transitions.
//! - `dipl rank`: Pick the most relevant open scenario for a country.
//! - `dipl resolve`: Record a country's choice on a scenario.
//! - `dipl sweep`: Expire every scenario past its deadline.
//!
//! ```bash
//! dipl --seed 7 generate --country1 urcea --country2 caphiria --type border_dispute
//! dipl --now 2026-05-01T09:00:00Z rank --country urcea
//! dipl resolve 5b0c... --choice border_dispute_diplomatic --country urcea
//! dipl resolve 5b0c... --choice diplomatic --country urcea
//! ```
//!
//! `--choice` takes a full option id as printed by `dipl show`, or just its
//! suffix, which is qualified with the scenario's type.
//!
//! Each handler returns `anyhow::Result<u8>`; the binary maps `Ok(code)` to
//! the process exit code and any error to exit code 1.

pub mod context;
pub mod generate;
pub mod query;
pub mod resolve;
pub mod state;

pub use context::RunContext;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
