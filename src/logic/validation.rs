//! Structural checks on a match list before it is accepted (e.g. after a client edited it).

use crate::models::{BracketError, BracketType, Match, MatchStatus};
use std::collections::{HashMap, HashSet};

/// Check that ids are unique, every edge resolves, no edge points backwards, no two
/// edges feed the same slot, and each result agrees with the match status.
///
/// Within a section an edge must go to a later round. Across sections only
/// winners -> losers, winners -> grand finals and losers -> grand finals are allowed.
pub fn validate_matches(matches: &[Match]) -> Result<(), BracketError> {
    let mut by_id: HashMap<&str, &Match> = HashMap::with_capacity(matches.len());
    for m in matches {
        if by_id.insert(m.id.as_str(), m).is_some() {
            return Err(BracketError::DuplicateMatchId(m.id.clone()));
        }
    }

    let mut fed = HashSet::new();
    for m in matches {
        check_result(m)?;
        let edges = [
            (m.next_match_id.as_deref(), m.next_match_slot),
            (m.loser_next_match_id.as_deref(), m.loser_next_match_slot),
        ];
        for (target_id, slot) in edges {
            let Some(target_id) = target_id else {
                continue;
            };
            let invalid = || BracketError::InvalidEdge {
                from: m.id.clone(),
                to: target_id.to_string(),
            };
            let Some(slot) = slot else {
                return Err(invalid());
            };
            let target = by_id.get(target_id).ok_or_else(|| BracketError::DanglingEdge {
                from: m.id.clone(),
                to: target_id.to_string(),
            })?;
            if !edge_moves_forward(m, target) {
                return Err(invalid());
            }
            // Two feeders into one slot would collide once both are played.
            if !fed.insert((target_id, slot)) {
                return Err(invalid());
            }
        }
        // A slot without a target.
        if (m.next_match_id.is_none() && m.next_match_slot.is_some())
            || (m.loser_next_match_id.is_none() && m.loser_next_match_slot.is_some())
        {
            return Err(BracketError::InvalidEdge {
                from: m.id.clone(),
                to: String::new(),
            });
        }
    }
    Ok(())
}

/// `completed` iff a winner is set, and the winner slot holds a team.
fn check_result(m: &Match) -> Result<(), BracketError> {
    let consistent = match (m.status, m.winner) {
        (MatchStatus::Pending, None) => true,
        (MatchStatus::Completed, Some(winner)) => m.team_in(winner).is_some(),
        _ => false,
    };
    if consistent {
        Ok(())
    } else {
        Err(BracketError::InconsistentResult(m.id.clone()))
    }
}

fn edge_moves_forward(from: &Match, to: &Match) -> bool {
    use BracketType::*;
    match (from.bracket_type, to.bracket_type) {
        (a, b) if a == b => to.round > from.round,
        (Winners, Losers) | (Winners, GrandFinals) | (Losers, GrandFinals) => true,
        _ => false,
    }
}
