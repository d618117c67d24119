//! Team records supplied by the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (stable primary key).
pub type TeamId = Uuid;

/// A competing team. The generator only looks at how many there are and their order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    /// Create a team with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
