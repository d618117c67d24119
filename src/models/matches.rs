//! Match node of a bracket graph, plus the small enums it is tagged with.

use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};

/// Match identifier, namespaced by bracket section (`w-3`, `l-9`, `gf-14`).
pub type MatchId = String;

/// One of the two participant positions in a match (slot A / slot B).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSlot {
    Radiant,
    Dire,
}

impl MatchSlot {
    /// Slot a match at `position` feeds when two sibling matches merge into one.
    pub fn for_position(position: u32) -> Self {
        if position % 2 == 0 {
            MatchSlot::Radiant
        } else {
            MatchSlot::Dire
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            MatchSlot::Radiant => MatchSlot::Dire,
            MatchSlot::Dire => MatchSlot::Radiant,
        }
    }
}

/// Section of the bracket a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketType {
    Winners,
    Losers,
    GrandFinals,
}

impl BracketType {
    /// Id prefix used for matches of this section.
    pub fn id_prefix(self) -> &'static str {
        match self {
            BracketType::Winners => "w",
            BracketType::Losers => "l",
            BracketType::GrandFinals => "gf",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EliminationType {
    #[default]
    Double,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single bracket node with its outgoing winner and loser edges.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    /// 1-based round within the match's section.
    pub round: u32,
    /// 0-based slot within the round.
    pub position: u32,
    pub bracket_type: BracketType,
    #[serde(default)]
    pub elimination_type: EliminationType,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_match_id: Option<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_match_slot: Option<MatchSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser_next_match_id: Option<MatchId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser_next_match_slot: Option<MatchSlot>,
    /// Team placed in slot A, once seeded or advanced into this match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radiant_team_id: Option<TeamId>,
    /// Team placed in slot B.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dire_team_id: Option<TeamId>,
    /// Winning slot. Set together with `status = completed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<MatchSlot>,
}

impl Match {
    /// New pending match with no edges and no teams.
    pub fn new(id: impl Into<MatchId>, round: u32, position: u32, bracket_type: BracketType) -> Self {
        Self {
            id: id.into(),
            round,
            position,
            bracket_type,
            elimination_type: EliminationType::Double,
            status: MatchStatus::Pending,
            next_match_id: None,
            next_match_slot: None,
            loser_next_match_id: None,
            loser_next_match_slot: None,
            radiant_team_id: None,
            dire_team_id: None,
            winner: None,
        }
    }

    /// Team currently in `slot`, if any.
    pub fn team_in(&self, slot: MatchSlot) -> Option<TeamId> {
        match slot {
            MatchSlot::Radiant => self.radiant_team_id,
            MatchSlot::Dire => self.dire_team_id,
        }
    }

    pub fn set_team(&mut self, slot: MatchSlot, team: TeamId) {
        match slot {
            MatchSlot::Radiant => self.radiant_team_id = Some(team),
            MatchSlot::Dire => self.dire_team_id = Some(team),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Winner edge as an (id, slot) pair. Both halves must be present.
    pub fn next_edge(&self) -> Option<(&str, MatchSlot)> {
        Some((self.next_match_id.as_deref()?, self.next_match_slot?))
    }

    /// Loser edge as an (id, slot) pair.
    pub fn loser_edge(&self) -> Option<(&str, MatchSlot)> {
        Some((self.loser_next_match_id.as_deref()?, self.loser_next_match_slot?))
    }
}
