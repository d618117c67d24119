//! Building team lists: from names, from CSV, and random seeding.

use crate::models::{BracketError, Team};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::io::Read;

/// Turn names into teams, trimming whitespace and skipping blanks.
/// Names must be unique (case-insensitive).
pub fn teams_from_names<I, S>(names: I) -> Result<Vec<Team>, BracketError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut teams = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() {
            continue;
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(BracketError::DuplicateTeamName(name.to_string()));
        }
        teams.push(Team::new(name));
    }
    Ok(teams)
}

/// Read teams from CSV with a `name` header column. Other columns are ignored.
pub fn parse_teams_csv<R: Read>(reader: R) -> Result<Vec<Team>, BracketError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| BracketError::InvalidCsv(e.to_string()))?;
    let name_column = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("name"))
        .ok_or_else(|| BracketError::InvalidCsv("missing `name` column".to_string()))?;

    let mut names = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| BracketError::InvalidCsv(e.to_string()))?;
        names.push(record.get(name_column).unwrap_or_default().to_string());
    }
    teams_from_names(names)
}

/// Random seeding order.
pub fn shuffle_teams(teams: &mut [Team]) {
    teams.shuffle(&mut rand::thread_rng());
}
