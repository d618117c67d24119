//! Data structures for double-elimination brackets: matches, teams, stored brackets.

mod bracket;
mod matches;
mod team;

pub use bracket::{Bracket, BracketError, BracketId};
pub use matches::{BracketType, EliminationType, Match, MatchId, MatchSlot, MatchStatus};
pub use team::{Team, TeamId};
