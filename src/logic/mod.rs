//! Bracket business logic: generation, labels, seeding/progression, validation, team import.

mod generator;
mod import;
mod labels;
mod lifecycle;
mod progression;
mod validation;

pub use generator::{
    bracket_size, generate_double_elimination, losers_round_count, winners_round_count,
};
pub use import::{parse_teams_csv, shuffle_teams, teams_from_names};
pub use labels::{round_label, round_labels, RoundLabel};
pub use lifecycle::{create_bracket, regenerate_bracket, replace_matches, submit_match_result};
pub use progression::{champion, record_result, seed_teams};
pub use validation::validate_matches;
