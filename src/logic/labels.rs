//! Display names for bracket rounds.

use crate::models::{BracketType, Match};
use serde::Serialize;
use std::collections::BTreeMap;

/// Human label for `round` of a bracket section.
///
/// Without `total_rounds` the finals and semis cannot be told apart, so every
/// winners/losers round gets the plain `R{n}` form.
pub fn round_label(bracket_type: BracketType, round: u32, total_rounds: Option<u32>) -> String {
    match bracket_type {
        BracketType::Winners => match total_rounds {
            Some(total) if round == total => "Winners Finals".to_string(),
            Some(total) if round + 1 == total => "Winners Semis".to_string(),
            _ => format!("Winners R{round}"),
        },
        BracketType::Losers => match total_rounds {
            Some(total) if round == total => "Losers Finals".to_string(),
            _ => format!("Losers R{round}"),
        },
        BracketType::GrandFinals => "Grand Finals".to_string(),
    }
}

/// One labelled round of a bracket (for column headers).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundLabel {
    pub bracket_type: BracketType,
    pub round: u32,
    pub label: String,
}

/// Labels for every (section, round) present in `matches`, winners first, then losers, then grand finals.
pub fn round_labels(matches: &[Match]) -> Vec<RoundLabel> {
    let mut totals: BTreeMap<BracketType, u32> = BTreeMap::new();
    for m in matches {
        let total = totals.entry(m.bracket_type).or_default();
        *total = (*total).max(m.round);
    }
    totals
        .into_iter()
        .flat_map(|(bracket_type, total)| {
            (1..=total).map(move |round| RoundLabel {
                bracket_type,
                round,
                label: round_label(bracket_type, round, Some(total)),
            })
        })
        .collect()
}
