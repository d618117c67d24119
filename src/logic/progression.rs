//! Seeding teams into a generated bracket and advancing winners/losers as results come in.

use crate::models::{BracketError, BracketType, Match, MatchSlot, MatchStatus, Team, TeamId};
use std::collections::HashSet;

/// Place `teams` (in seeding order) into the first winners round: team i goes to
/// match `i / 2`, slot A for even i and slot B for odd i.
///
/// Slots past the last team stay empty; those are the implicit byes.
pub fn seed_teams(matches: &mut [Match], teams: &[Team]) -> Result<(), BracketError> {
    let mut first_round: Vec<&mut Match> = matches
        .iter_mut()
        .filter(|m| m.bracket_type == BracketType::Winners && m.round == 1)
        .collect();
    first_round.sort_by_key(|m| m.position);

    let capacity = first_round.len() * 2;
    if teams.len() > capacity {
        return Err(BracketError::TooManyTeams {
            count: teams.len(),
            capacity,
        });
    }

    for m in first_round.iter_mut() {
        m.radiant_team_id = None;
        m.dire_team_id = None;
    }
    for (index, team) in teams.iter().enumerate() {
        let slot = MatchSlot::for_position(index as u32);
        first_round[index / 2].set_team(slot, team.id);
    }
    Ok(())
}

/// A team placement caused by a result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Placement {
    target: usize,
    slot: MatchSlot,
    team: TeamId,
}

/// Record that `winner` won match `match_id`, moving the winner along `nextMatchId` and
/// the loser (if there was one) along `loserNextMatchId`.
///
/// Every check runs before anything is written, so on error `matches` is unchanged.
pub fn record_result(matches: &mut [Match], match_id: &str, winner: MatchSlot) -> Result<(), BracketError> {
    let index = matches
        .iter()
        .position(|m| m.id == match_id)
        .ok_or_else(|| BracketError::MatchNotFound(match_id.to_string()))?;
    let decided = &matches[index];
    if decided.is_completed() {
        return Err(BracketError::MatchAlreadyDecided(decided.id.clone()));
    }
    let winning_team = decided
        .team_in(winner)
        .ok_or_else(|| BracketError::MatchNotReady(decided.id.clone()))?;
    let losing_team = decided.team_in(winner.opponent());
    // A walkover is only allowed once nothing can still arrive in the empty slot.
    if losing_team.is_none() && slot_still_fed(matches, &decided.id, winner.opponent(), &mut HashSet::new()) {
        return Err(BracketError::MatchNotReady(decided.id.clone()));
    }

    let mut placements = Vec::with_capacity(2);
    if let Some((target_id, slot)) = decided.next_edge() {
        placements.push(plan_placement(matches, &decided.id, target_id, slot, winning_team)?);
    }
    if let (Some((target_id, slot)), Some(team)) = (decided.loser_edge(), losing_team) {
        placements.push(plan_placement(matches, &decided.id, target_id, slot, team)?);
    }

    let decided = &mut matches[index];
    decided.status = MatchStatus::Completed;
    decided.winner = Some(winner);
    log::info!("Match {} decided: {:?} wins", decided.id, winner);
    for p in placements {
        matches[p.target].set_team(p.slot, p.team);
    }
    Ok(())
}

fn plan_placement(
    matches: &[Match],
    from: &str,
    target_id: &str,
    slot: MatchSlot,
    team: TeamId,
) -> Result<Placement, BracketError> {
    let target = matches
        .iter()
        .position(|m| m.id == target_id)
        .ok_or_else(|| BracketError::DanglingEdge {
            from: from.to_string(),
            to: target_id.to_string(),
        })?;
    if matches[target].is_completed() {
        return Err(BracketError::MatchAlreadyDecided(target_id.to_string()));
    }
    match matches[target].team_in(slot) {
        Some(existing) if existing != team => Err(BracketError::SlotOccupied {
            match_id: target_id.to_string(),
            slot,
        }),
        _ => Ok(Placement { target, slot, team }),
    }
}

/// Whether a match that has not been played yet can still put a team into `(target, slot)`.
///
/// Byes make this recursive: a pending feeder with no teams and no live feeders of its own
/// will never produce anyone. `visiting` breaks cycles in hand-edited lists.
fn slot_still_fed<'a>(matches: &'a [Match], target: &str, slot: MatchSlot, visiting: &mut HashSet<&'a str>) -> bool {
    matches.iter().filter(|f| !f.is_completed()).any(|feeder| {
        let teams_needed = if feeder.next_edge() == Some((target, slot)) {
            1
        } else if feeder.loser_edge() == Some((target, slot)) {
            2
        } else {
            return false;
        };
        if !visiting.insert(feeder.id.as_str()) {
            return false;
        }
        let live_slots = [MatchSlot::Radiant, MatchSlot::Dire]
            .into_iter()
            .filter(|&s| feeder.team_in(s).is_some() || slot_still_fed(matches, &feeder.id, s, visiting))
            .count();
        visiting.remove(feeder.id.as_str());
        live_slots >= teams_needed
    })
}

/// Winner of the grand finals, once it has been played.
pub fn champion(matches: &[Match]) -> Option<TeamId> {
    matches
        .iter()
        .filter(|m| m.bracket_type == BracketType::GrandFinals && m.is_completed())
        .find_map(|m| m.team_in(m.winner?))
}
