//! # Transition Subcommands
//!
//! `resolve` records a country's choice (ACTIVE/PENDING → COMPLETED) and
//! `sweep` expires scenarios whose deadline has been reached
//! (ACTIVE/PENDING → EXPIRED).

use anyhow::{Context, Result};
use clap::Args;

use dipl_core::ChoiceId;
use dipl_scenario::Scenario;

use crate::context::RunContext;
use crate::query::{parse_country, parse_scenario_id};

/// Arguments for the `dipl resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Scenario identifier.
    pub id: String,
    /// Option to choose: the full id (e.g. `border_dispute_diplomatic`) or
    /// its suffix (`diplomatic`).
    #[arg(long)]
    pub choice: String,
    /// Country recording the choice.
    #[arg(long)]
    pub country: String,
    /// Print the resolution receipt as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `dipl sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {}

/// Execute the resolve subcommand.
pub fn run_resolve(args: &ResolveArgs, ctx: &RunContext) -> Result<u8> {
    let id = parse_scenario_id(&args.id)?;
    let country = parse_country(&args.country)?;
    let service = ctx.service()?;
    let choice = qualify_choice(&service.scenario(&id)?, &args.choice)?;

    let receipt = service.resolve(&id, &choice, &country)?;

    if args.json {
        crate::print_json(&receipt)?;
    } else {
        let e = &receipt.effects;
        println!(
            "OK: scenario {id} resolved by {country} with {choice} → {}",
            receipt.scenario.status
        );
        println!(
            "  Effects: relationship {:+} / economic {:+} / reputation {:+}",
            e.relationship_change, e.economic_impact, e.reputation_change
        );
        println!(
            "  Reward: {} IxCredits{}",
            receipt.reward.credits,
            if receipt.reward.high_stakes { " (high stakes)" } else { "" }
        );
    }
    Ok(0)
}

/// Option ids are namespaced by scenario type. A bare suffix such as
/// `diplomatic` is expanded when the scenario offers the namespaced option;
/// anything else is passed through and rejected by the engine if unknown.
fn qualify_choice(scenario: &Scenario, raw: &str) -> Result<ChoiceId> {
    let choice = ChoiceId::parse(raw).with_context(|| format!("invalid choice id: {raw:?}"))?;
    if scenario.find_choice(&choice).is_some() {
        return Ok(choice);
    }
    match ChoiceId::namespaced(scenario.scenario_type.as_str(), raw) {
        Ok(qualified) if scenario.find_choice(&qualified).is_some() => {
            tracing::debug!(choice = %qualified, "qualified bare option suffix");
            Ok(qualified)
        }
        _ => Ok(choice),
    }
}

/// Execute the sweep subcommand.
pub fn run_sweep(_args: &SweepArgs, ctx: &RunContext) -> Result<u8> {
    let expired = ctx.service()?.expire_due()?;
    println!("OK: expired {expired} scenario(s)");
    Ok(0)
}
