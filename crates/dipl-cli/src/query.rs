//! # Query Subcommands
//!
//! Read-only views over the state directory: `list`, `show`, and `rank`.

use anyhow::{Context, Result};
use clap::Args;

use dipl_core::{CountryId, ScenarioId, ScenarioType};
use dipl_scenario::{Scenario, ScenarioStatus};
use dipl_service::CandidateFilter;

use crate::context::RunContext;

/// Arguments for the `dipl list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only scenarios involving this country.
    #[arg(long)]
    pub country: Option<String>,
    /// Only active and pending scenarios.
    #[arg(long)]
    pub open: bool,
    /// Print the scenarios as a JSON array.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `dipl show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Scenario identifier.
    pub id: String,
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `dipl rank` subcommand.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Country to rank open scenarios for.
    #[arg(long)]
    pub country: String,
    /// Scenario type the country prefers.
    #[arg(long)]
    pub prefer: Option<ScenarioType>,
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn parse_country(raw: &str) -> Result<CountryId> {
    CountryId::new(raw).with_context(|| format!("invalid country id: {raw:?}"))
}

pub(crate) fn parse_scenario_id(raw: &str) -> Result<ScenarioId> {
    ScenarioId::parse(raw).with_context(|| format!("invalid scenario id: {raw:?}"))
}

/// Execute the list subcommand.
pub fn run_list(args: &ListArgs, ctx: &RunContext) -> Result<u8> {
    let filter = CandidateFilter {
        statuses: if args.open {
            vec![ScenarioStatus::Active, ScenarioStatus::Pending]
        } else {
            Vec::new()
        },
        country: args.country.as_deref().map(parse_country).transpose()?,
        ..CandidateFilter::default()
    };
    let scenarios = ctx
        .service()?
        .repository()
        .find_candidates(&filter)
        .context("failed to list scenarios")?;

    if args.json {
        crate::print_json(&scenarios)?;
        return Ok(0);
    }
    if scenarios.is_empty() {
        println!("No scenarios found.");
        return Ok(0);
    }
    for s in &scenarios {
        println!(
            "{}  {:<9}  {:<25}  {} / {}  expires {}",
            s.id,
            s.status.as_str(),
            s.scenario_type.as_str(),
            s.country1_id,
            s.country2_id,
            s.expires_at
        );
    }
    println!("{} scenario(s)", scenarios.len());
    Ok(0)
}

/// Execute the show subcommand.
pub fn run_show(args: &ShowArgs, ctx: &RunContext) -> Result<u8> {
    let id = parse_scenario_id(&args.id)?;
    let scenario = ctx.service()?.scenario(&id)?;
    if args.json {
        crate::print_json(&scenario)?;
    } else {
        print_scenario(&scenario);
    }
    Ok(0)
}

fn print_scenario(s: &Scenario) {
    println!("Scenario: {}", s.id);
    println!("  Title: {}", s.title);
    println!("  Type: {}", s.scenario_type);
    println!("  Status: {}", s.status);
    println!(
        "  Countries: {} ({}) / {} ({})",
        s.country1_name, s.country1_id, s.country2_name, s.country2_id
    );
    println!(
        "  Relationship: {} ({})",
        s.relationship_state, s.relationship_strength
    );
    println!(
        "  Impact: cultural {} / diplomatic risk {} / economic cost {}",
        s.cultural_impact, s.diplomatic_risk, s.economic_cost
    );
    println!("  Tags: {}", s.tags.labels(s.scenario_type).join(", "));
    println!("  Created: {}", s.created_at);
    println!("  Expires: {}", s.expires_at);
    if let Some(at) = s.resolved_at {
        println!("  Resolved: {at}");
    }
    println!();
    println!("  {}", s.narrative);
    println!();
    println!("  Options:");
    for c in &s.response_options {
        let marker = if s.chosen_option.as_ref() == Some(&c.id) { "*" } else { " " };
        println!(
            "   {marker} {:<12} {} [{} {} / risk {}]",
            c.id.as_str(),
            c.label,
            c.skill_required,
            c.skill_level,
            c.risk_level
        );
    }
    if !s.transitions.is_empty() {
        println!("  Transitions:");
        for (i, t) in s.transitions.iter().enumerate() {
            let actor = t.actor.as_ref().map_or("-".to_string(), |a| a.to_string());
            println!(
                "    [{i}] {} → {} at {} by {actor}",
                t.from_state, t.to_state, t.timestamp
            );
        }
    }
}

/// Execute the rank subcommand.
pub fn run_rank(args: &RankArgs, ctx: &RunContext) -> Result<u8> {
    let country = parse_country(&args.country)?;
    let best = ctx.service()?.most_relevant_for(&country, args.prefer)?;

    match (&best, args.json) {
        (_, true) => crate::print_json(&best)?,
        (Some(ranked), false) => println!(
            "{}  score {}  {} ({})",
            ranked.scenario.id,
            ranked.relevance_score,
            ranked.scenario.title,
            ranked.scenario.scenario_type
        ),
        (None, false) => println!("No open scenarios for {country}."),
    }
    Ok(0)
}
