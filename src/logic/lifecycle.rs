//! Operations on a stored bracket: create, regenerate, replace matches, submit results.
//!
//! Each operation builds the new match list completely before swapping it in, so a
//! bracket is never observed half-wired.

use crate::logic::generator::generate_double_elimination;
use crate::logic::import::shuffle_teams;
use crate::logic::progression::{record_result, seed_teams};
use crate::logic::validation::validate_matches;
use crate::models::{Bracket, BracketError, Match, MatchSlot, Team};

/// Generate, seed and wrap a new bracket. With `shuffle` the seeding order is randomised first.
pub fn create_bracket(name: impl Into<String>, mut teams: Vec<Team>, shuffle: bool) -> Result<Bracket, BracketError> {
    if shuffle {
        shuffle_teams(&mut teams);
    }
    let matches = seeded_matches(&teams)?;
    let bracket = Bracket::new(name, teams, matches);
    log::info!(
        "Created bracket {} ({} teams, {} matches)",
        bracket.id,
        bracket.teams.len(),
        bracket.matches.len()
    );
    Ok(bracket)
}

/// Throw away all results and rebuild the match graph from the stored teams.
pub fn regenerate_bracket(bracket: &mut Bracket, shuffle: bool) -> Result<(), BracketError> {
    let mut teams = bracket.teams.clone();
    if shuffle {
        shuffle_teams(&mut teams);
    }
    let matches = seeded_matches(&teams)?;
    bracket.teams = teams;
    bracket.matches = matches;
    bracket.touch();
    log::info!("Regenerated bracket {}", bracket.id);
    Ok(())
}

/// Replace the match list with an edited one, if it passes validation.
pub fn replace_matches(bracket: &mut Bracket, matches: Vec<Match>) -> Result<(), BracketError> {
    validate_matches(&matches)?;
    bracket.matches = matches;
    bracket.touch();
    Ok(())
}

/// Record a result on a stored bracket.
pub fn submit_match_result(bracket: &mut Bracket, match_id: &str, winner: MatchSlot) -> Result<(), BracketError> {
    record_result(&mut bracket.matches, match_id, winner)?;
    bracket.touch();
    Ok(())
}

fn seeded_matches(teams: &[Team]) -> Result<Vec<Match>, BracketError> {
    let mut matches = generate_double_elimination(teams)?;
    seed_teams(&mut matches, teams)?;
    Ok(matches)
}
