//! Dota 2 bracket web app: library with models and double-elimination bracket logic.

pub mod logic;
pub mod models;

pub use logic::{
    bracket_size, champion, create_bracket, generate_double_elimination, losers_round_count,
    parse_teams_csv, record_result, regenerate_bracket, replace_matches, round_label, round_labels,
    seed_teams, shuffle_teams, submit_match_result, teams_from_names, validate_matches,
    winners_round_count, RoundLabel,
};
pub use models::{
    Bracket, BracketError, BracketId, BracketType, EliminationType, Match, MatchId, MatchSlot,
    MatchStatus, Team, TeamId,
};
