//! # Generate Subcommand
//!
//! Creates a scenario between two countries and stores it in the state
//! directory. The relationship snapshot comes from the command line when
//! given, otherwise from the relationships file, otherwise neutral / 50.

use anyhow::{Context, Result};
use clap::Args;

use dipl_core::{CountryId, Difficulty, RelationshipState, ScenarioType, TimeFrame};
use dipl_scenario::{CountryRef, RelationshipContext, ScenarioRequest};

use crate::context::RunContext;

/// Arguments for the `dipl generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// First country identifier.
    #[arg(long)]
    pub country1: String,
    /// First country display name (defaults to the identifier).
    #[arg(long)]
    pub country1_name: Option<String>,
    /// Second country identifier.
    #[arg(long)]
    pub country2: String,
    /// Second country display name (defaults to the identifier).
    #[arg(long)]
    pub country2_name: Option<String>,
    /// Scenario type (e.g. `border_dispute`). Drawn at random when omitted.
    #[arg(long = "type")]
    pub scenario_type: Option<ScenarioType>,
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
    #[arg(long)]
    pub time_frame: Option<TimeFrame>,
    /// Relationship state snapshot, overriding any tracked relationship.
    #[arg(long)]
    pub relationship: Option<RelationshipState>,
    /// Relationship strength 0–100, overriding any tracked relationship.
    #[arg(long)]
    pub strength: Option<u8>,
    /// Print the stored scenario as JSON.
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    fn to_request(&self) -> Result<ScenarioRequest> {
        let country = |id: &str, name: &Option<String>| -> Result<CountryRef> {
            let id = CountryId::new(id).with_context(|| format!("invalid country id: {id:?}"))?;
            let name = name.clone().unwrap_or_else(|| id.to_string());
            Ok(CountryRef::new(id, name))
        };
        let mut request = ScenarioRequest::between(
            country(&self.country1, &self.country1_name)?,
            country(&self.country2, &self.country2_name)?,
        );
        if self.relationship.is_some() || self.strength.is_some() {
            let neutral = RelationshipContext::neutral();
            request = request.with_relationship(RelationshipContext {
                state: self.relationship.unwrap_or(neutral.state),
                strength: self.strength.unwrap_or(neutral.strength),
            });
        }
        if let Some(t) = self.scenario_type {
            request = request.with_type(t);
        }
        if let Some(d) = self.difficulty {
            request = request.with_difficulty(d);
        }
        if let Some(tf) = self.time_frame {
            request = request.with_time_frame(tf);
        }
        Ok(request)
    }
}

/// Execute the generate subcommand.
pub fn run_generate(args: &GenerateArgs, ctx: &RunContext) -> Result<u8> {
    let service = ctx.service()?;
    let scenario = service
        .create_scenario(args.to_request()?)
        .context("failed to generate scenario")?;

    if args.json {
        crate::print_json(&scenario)?;
    } else {
        println!(
            "OK: created scenario {} ({}) between {} and {}, expires {}",
            scenario.id,
            scenario.scenario_type,
            scenario.country1_name,
            scenario.country2_name,
            scenario.expires_at
        );
    }
    Ok(0)
}
