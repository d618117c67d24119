//! Double-elimination bracket generation: winners bracket, losers bracket, loser paths, grand finals.
//!
//! Byes are implicit. A team count that is not a power of two is padded to the next power of two;
//! the empty first-round slots are left for seeding to deal with.

use crate::models::{BracketError, BracketType, Match, MatchSlot};

/// Matches of one bracket section, grouped by round (index 0 is round 1).
type Rounds = Vec<Vec<Match>>;

/// Running match number shared by all sections so ids never collide.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct IdCounter {
    next: u32,
}

impl IdCounter {
    fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    fn take(&mut self, bracket_type: BracketType) -> String {
        let id = format!("{}-{}", bracket_type.id_prefix(), self.next);
        self.next += 1;
        id
    }
}

/// Teams padded up to the next power of two.
pub fn bracket_size(team_count: usize) -> u32 {
    team_count.max(1).next_power_of_two() as u32
}

/// `ceil(log2(n))` rounds in the winners bracket.
pub fn winners_round_count(team_count: usize) -> u32 {
    bracket_size(team_count).trailing_zeros()
}

/// `2 * (winners rounds - 1)` rounds in the losers bracket.
pub fn losers_round_count(team_count: usize) -> u32 {
    2 * winners_round_count(team_count).saturating_sub(1)
}

/// Matches in losers round `round` (1-based) of a bracket of `size`.
fn losers_matches_in_round(size: u32, round: u32) -> u32 {
    size >> (round.div_ceil(2) + 1)
}

/// Generate the full double-elimination match graph for `teams`.
///
/// Only the number of teams and their order matter. Output order is winners bracket
/// (round-major), then losers bracket, then grand finals.
pub fn generate_double_elimination<T>(teams: &[T]) -> Result<Vec<Match>, BracketError> {
    if teams.len() < 2 {
        return Err(BracketError::NotEnoughTeams { count: teams.len() });
    }

    let size = bracket_size(teams.len());
    let winners_rounds = winners_round_count(teams.len());
    let losers_rounds = losers_round_count(teams.len());
    let mut ids = IdCounter::starting_at(1);

    let mut winners = build_winners_bracket(size, winners_rounds, &mut ids);
    let mut losers = build_losers_bracket(size, losers_rounds, &mut ids);
    wire_loser_paths(&mut winners, &losers);
    let grand_finals = build_grand_finals(&mut winners, &mut losers, &mut ids);

    let matches: Vec<Match> = winners
        .into_iter()
        .flatten()
        .chain(losers.into_iter().flatten())
        .chain(std::iter::once(grand_finals))
        .collect();

    log::debug!(
        "Generated double elimination bracket: {} teams, size {}, {} winners rounds, {} losers rounds, {} matches",
        teams.len(),
        size,
        winners_rounds,
        losers_rounds,
        matches.len()
    );
    Ok(matches)
}

/// `size - 1` matches in `rounds` rounds; round r holds `size / 2^r` matches.
fn build_winners_bracket(size: u32, rounds: u32, ids: &mut IdCounter) -> Rounds {
    let mut bracket: Rounds = (1..=rounds)
        .map(|round| {
            (0..size >> round)
                .map(|position| Match::new(ids.take(BracketType::Winners), round, position, BracketType::Winners))
                .collect()
        })
        .collect();
    wire_forward(&mut bracket);
    bracket
}

/// Losers round r holds `size / 2^(ceil(r/2)+1)` matches: each count appears twice,
/// once for a minor round (fresh drop-ins) and once for the following major round.
fn build_losers_bracket(size: u32, rounds: u32, ids: &mut IdCounter) -> Rounds {
    let mut bracket: Rounds = (1..=rounds)
        .map(|round| {
            (0..losers_matches_in_round(size, round))
                .map(|position| Match::new(ids.take(BracketType::Losers), round, position, BracketType::Losers))
                .collect()
        })
        .collect();
    wire_forward(&mut bracket);
    bracket
}

/// Winner edges from each round into the next one.
///
/// A round that halves merges sibling pairs (`p -> p/2`, slot by parity). A round of equal size
/// is a losers-bracket minor round: the incumbent keeps its position on slot A and slot B is left
/// for the team dropping in from the winners bracket.
fn wire_forward(rounds: &mut Rounds) {
    for next in 1..rounds.len() {
        let (done, rest) = rounds.split_at_mut(next);
        let (from, to) = (&mut done[next - 1], &rest[0]);
        let same_size = from.len() == to.len();
        for m in from.iter_mut() {
            let (target, slot) = if same_size {
                (&to[m.position as usize], MatchSlot::Radiant)
            } else {
                (&to[(m.position / 2) as usize], MatchSlot::for_position(m.position))
            };
            m.next_match_id = Some(target.id.clone());
            m.next_match_slot = Some(slot);
        }
    }
}

/// Loser edges from the winners bracket into the losers bracket.
///
/// - round 1: pairs of matches drop into losers round 1 (`p -> p/2`, slot by parity)
/// - rounds 2..R-1: losers drop into losers round `2(r-1)` at the same position, slot B
/// - round R: the winners final drops into the losers final, slot B
///
/// With no losers bracket (two teams) the winners final is left alone here and routed
/// straight into grand finals instead.
fn wire_loser_paths(winners: &mut Rounds, losers: &Rounds) {
    let Some(losers_final) = losers.last().and_then(|round| round.first()) else {
        return;
    };
    let final_round = winners.len();
    for (index, round) in winners.iter_mut().enumerate() {
        let round_number = index + 1;
        for m in round.iter_mut() {
            let (target, slot) = if round_number == final_round {
                (losers_final, MatchSlot::Dire)
            } else if round_number == 1 {
                (&losers[0][(m.position / 2) as usize], MatchSlot::for_position(m.position))
            } else {
                (&losers[2 * (round_number - 1) - 1][m.position as usize], MatchSlot::Dire)
            };
            m.loser_next_match_id = Some(target.id.clone());
            m.loser_next_match_slot = Some(slot);
        }
    }
}

/// Single grand-finals match fed by both bracket finalists. No reset match is generated.
fn build_grand_finals(winners: &mut Rounds, losers: &mut Rounds, ids: &mut IdCounter) -> Match {
    let grand_finals = Match::new(ids.take(BracketType::GrandFinals), 1, 0, BracketType::GrandFinals);

    if let Some(winners_final) = winners.last_mut().and_then(|round| round.last_mut()) {
        winners_final.next_match_id = Some(grand_finals.id.clone());
        winners_final.next_match_slot = Some(MatchSlot::Radiant);

        match losers.last_mut().and_then(|round| round.last_mut()) {
            Some(losers_final) => {
                losers_final.next_match_id = Some(grand_finals.id.clone());
                losers_final.next_match_slot = Some(MatchSlot::Dire);
            }
            // Two teams: the winners-final loser is the losers-bracket champion.
            None => {
                winners_final.loser_next_match_id = Some(grand_finals.id.clone());
                winners_final.loser_next_match_slot = Some(MatchSlot::Dire);
            }
        }
    }

    grand_finals
}
