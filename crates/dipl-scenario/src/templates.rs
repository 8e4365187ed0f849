//! Static text and effect tables used by the factory.
//!
//! Placeholders `{country1}` and `{country2}` are substituted with display
//! names. Types without an entry fall back to [`GENERIC`].

use dipl_core::{RiskLevel, ScenarioType};

pub(crate) struct NarrativeTemplate {
    pub title: &'static str,
    pub narrative: &'static str,
}

pub(crate) const GENERIC: NarrativeTemplate = NarrativeTemplate {
    title: "Diplomatic Situation: {country1} and {country2}",
    narrative: "A developing situation between {country1} and {country2} requires a \
                considered diplomatic response before it escalates further.",
};

pub(crate) fn narrative_for(scenario_type: ScenarioType) -> Option<&'static NarrativeTemplate> {
    const BORDER: NarrativeTemplate = NarrativeTemplate {
        title: "Border Tensions with {country2}",
        narrative: "Patrols from {country1} and {country2} have reported repeated incursions \
                    along the shared frontier. Local commanders are requesting guidance before \
                    the standoff hardens into a crisis.",
    };
    const TRADE: NarrativeTemplate = NarrativeTemplate {
        title: "Trade Agreement Renegotiation with {country2}",
        narrative: "{country2} has formally requested to reopen the terms of its trade \
                    arrangement with {country1}, citing shifting tariffs and market access.",
    };
    const CULTURAL: NarrativeTemplate = NarrativeTemplate {
        title: "Cultural Incident Involving {country2}",
        narrative: "Remarks made during a cultural exchange between {country1} and {country2} \
                    have been widely reported as offensive, and public opinion in both \
                    countries is hardening.",
    };
    const INTELLIGENCE: NarrativeTemplate = NarrativeTemplate {
        title: "Intelligence Breach Exposed: {country2}",
        narrative: "Documents indicating that {country1} gathered intelligence on {country2} \
                    have surfaced in the press. {country2} is demanding an explanation.",
    };
    const HUMANITARIAN: NarrativeTemplate = NarrativeTemplate {
        title: "Humanitarian Appeal from {country2}",
        narrative: "A disaster in {country2} has displaced thousands. Its government has \
                    appealed directly to {country1} for assistance.",
    };
    const ALLIANCE: NarrativeTemplate = NarrativeTemplate {
        title: "Alliance Proposal from {country2}",
        narrative: "{country2} has proposed formalizing its ties with {country1} into a \
                    standing alliance with mutual commitments.",
    };
    const SANCTIONS: NarrativeTemplate = NarrativeTemplate {
        title: "Sanctions Pressure on {country2}",
        narrative: "Partners of {country1} are pressing it to join sanctions against \
                    {country2}, which warns of consequences for bilateral relations.",
    };
    const TECHNOLOGY: NarrativeTemplate = NarrativeTemplate {
        title: "Technology Transfer Talks with {country2}",
        narrative: "{country2} is seeking access to technology developed in {country1}, \
                    offering investment and cooperation in return.",
    };

    match scenario_type {
        ScenarioType::BorderDispute => Some(&BORDER),
        ScenarioType::TradeRenegotiation => Some(&TRADE),
        ScenarioType::CulturalMisunderstanding => Some(&CULTURAL),
        ScenarioType::IntelligenceBreach => Some(&INTELLIGENCE),
        ScenarioType::HumanitarianCrisis => Some(&HUMANITARIAN),
        ScenarioType::AllianceRequest => Some(&ALLIANCE),
        ScenarioType::SanctionsPressure => Some(&SANCTIONS),
        ScenarioType::TechnologyTransfer => Some(&TECHNOLOGY),
        ScenarioType::TerritorialClaim
        | ScenarioType::RefugeeCrisis
        | ScenarioType::EnvironmentalAccord
        | ScenarioType::EspionageAccusation => None,
    }
}

/// Substitutes `{country1}` and `{country2}` in one pass; inserted names are
/// never rescanned.
pub(crate) fn render(template: &str, country1: &str, country2: &str) -> String {
    let placeholders = [("{country1}", country1), ("{country2}", country2)];

    let mut out = String::with_capacity(template.len() + country1.len() + country2.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        match placeholders.iter().find(|(p, _)| rest.starts_with(*p)) {
            Some((p, name)) => {
                out.push_str(name);
                rest = &rest[p.len()..];
            }
            None => {
                out.push('{');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// A response option before it is namespaced with the scenario type.
pub(crate) struct OptionTemplate {
    pub suffix: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub skill_required: &'static str,
    pub skill_level: u8,
    pub risk_level: RiskLevel,
    pub relationship_change: i32,
    pub economic_impact: i32,
    pub reputation_change: i32,
    pub cultural_impact: i32,
    pub outcomes: [&'static str; 3],
}

pub(crate) const BASE_OPTIONS: [OptionTemplate; 3] = [
    OptionTemplate {
        suffix: "aggressive",
        label: "Take a Hard Line",
        description: "Make clear to {country2} that {country1} will not yield, backing words with visible pressure.",
        skill_required: "military",
        skill_level: 7,
        risk_level: RiskLevel::High,
        relationship_change: -15,
        economic_impact: -5,
        reputation_change: 5,
        cultural_impact: -10,
        outcomes: [
            "Domestic audiences rally behind a firm stance",
            "{country2} hardens its position and seeks partners",
            "Lasting distrust between the two governments",
        ],
    },
    OptionTemplate {
        suffix: "diplomatic",
        label: "Pursue Diplomatic Dialogue",
        description: "Open formal talks with {country2} through senior envoys.",
        skill_required: "negotiation",
        skill_level: 5,
        risk_level: RiskLevel::Low,
        relationship_change: 10,
        economic_impact: 0,
        reputation_change: 10,
        cultural_impact: 5,
        outcomes: [
            "Tensions ease as talks begin",
            "A framework for cooperation takes shape",
            "Channels of communication stay open",
        ],
    },
    OptionTemplate {
        suffix: "compromise",
        label: "Seek a Compromise",
        description: "Offer {country2} concessions in exchange for matching commitments.",
        skill_required: "economics",
        skill_level: 6,
        risk_level: RiskLevel::Medium,
        relationship_change: 5,
        economic_impact: -3,
        reputation_change: 5,
        cultural_impact: 3,
        outcomes: [
            "Both sides claim a partial win",
            "Concessions strain some domestic sectors",
            "A precedent for negotiated settlements",
        ],
    },
];

pub(crate) const FRIENDLY_OPTION: OptionTemplate = OptionTemplate {
    suffix: "friendly",
    label: "Lean on the Partnership",
    description: "Resolve the matter informally, trusting the strong ties between {country1} and {country2}.",
    skill_required: "diplomacy",
    skill_level: 3,
    risk_level: RiskLevel::Low,
    relationship_change: 20,
    economic_impact: 10,
    reputation_change: 15,
    cultural_impact: 10,
    outcomes: [
        "Goodwill deepens immediately",
        "Joint initiatives follow the resolution",
        "The partnership becomes a regional anchor",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_both_names() {
        assert_eq!(
            render(GENERIC.title, "Urcea", "Caphiria"),
            "Diplomatic Situation: Urcea and Caphiria"
        );
    }

    #[test]
    fn test_render_does_not_rescan_inserted_names() {
        assert_eq!(
            render("{country1} vs {country2}", "{country2}", "Caphiria"),
            "{country2} vs Caphiria"
        );
        assert_eq!(
            render("{country2}: {country1}", "Urcea", "{country1}"),
            "{country1}: Urcea"
        );
        assert_eq!(render("{country3} {", "Urcea", "Caphiria"), "{country3} {");
    }

    #[test]
    fn test_every_type_renders_without_placeholders() {
        for t in ScenarioType::all() {
            let template = narrative_for(*t).unwrap_or(&GENERIC);
            let title = render(template.title, "A", "B");
            let narrative = render(template.narrative, "A", "B");
            assert!(!title.contains('{'), "{t}: {title}");
            assert!(!narrative.contains('{'), "{t}: {narrative}");
        }
    }

    #[test]
    fn test_friendly_outweighs_base_options() {
        for base in &BASE_OPTIONS {
            assert!(FRIENDLY_OPTION.relationship_change > base.relationship_change);
        }
    }
}
