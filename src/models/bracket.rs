//! Stored bracket and BracketError.

use crate::models::matches::{Match, MatchId, MatchSlot};
use crate::models::team::Team;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while generating, editing or advancing a bracket.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BracketError {
    /// Fewer than two teams; no bracket is produced at all.
    #[error("Need at least 2 teams to generate a bracket (got {count})")]
    NotEnoughTeams { count: usize },
    /// More teams than first-round slots in the given match list.
    #[error("Bracket has room for {capacity} teams, got {count}")]
    TooManyTeams { count: usize, capacity: usize },
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    #[error("Match {0} already has a result")]
    MatchAlreadyDecided(MatchId),
    /// The chosen winner slot has no team in it yet.
    #[error("Match {0} has no team in the winning slot")]
    MatchNotReady(MatchId),
    #[error("Slot {slot:?} of match {match_id} already holds another team")]
    SlotOccupied { match_id: MatchId, slot: MatchSlot },
    /// Status, winner and occupied slots of a match disagree.
    #[error("Match {0} has an inconsistent result")]
    InconsistentResult(MatchId),
    #[error("Match id {0} is used more than once")]
    DuplicateMatchId(MatchId),
    #[error("Match {from} points to unknown match {to}")]
    DanglingEdge { from: MatchId, to: MatchId },
    #[error("Match {from} has an invalid edge to {to}")]
    InvalidEdge { from: MatchId, to: MatchId },
    #[error("A team named {0:?} already exists")]
    DuplicateTeamName(String),
    #[error("Invalid CSV: {0}")]
    InvalidCsv(String),
}

/// Unique identifier for a stored bracket.
pub type BracketId = Uuid;

/// A generated bracket: the seeded teams and the full match graph.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    pub id: BracketId,
    pub name: String,
    /// Teams in seeding order.
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bracket {
    /// Wrap an already generated match list.
    pub fn new(name: impl Into<String>, teams: Vec<Team>, matches: Vec<Match>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            teams,
            matches,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn get_match(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Mark the bracket as modified.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
