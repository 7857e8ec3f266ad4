//! Actor entity - anything that occupies a place and can move
//!
//! Characters, vehicle instances and mob instances are stored separately but
//! move by the same rules, so the engine treats the kind as a dispatch key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::{ActorId, PlaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Character,
    Vehicle,
    Mob,
}

impl ActorKind {
    pub const ALL: [ActorKind; 3] = [ActorKind::Character, ActorKind::Vehicle, ActorKind::Mob];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Vehicle => "vehicle",
            Self::Mob => "mob",
        }
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "character" => Ok(Self::Character),
            "vehicle" => Ok(Self::Vehicle),
            "mob" => Ok(Self::Mob),
            _ => Err(DomainError::parse(format!("Invalid actor kind: {}", s))),
        }
    }
}

/// An actor and where it currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub name: String,
    pub current_place_id: PlaceId,
}

impl Actor {
    pub fn new(
        id: ActorId,
        kind: ActorKind,
        name: impl Into<String>,
        current_place_id: PlaceId,
    ) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            current_place_id,
        }
    }

    pub fn character(id: ActorId, name: impl Into<String>, place_id: PlaceId) -> Self {
        Self::new(id, ActorKind::Character, name, place_id)
    }

    pub fn vehicle(id: ActorId, name: impl Into<String>, place_id: PlaceId) -> Self {
        Self::new(id, ActorKind::Vehicle, name, place_id)
    }

    pub fn mob(id: ActorId, name: impl Into<String>, place_id: PlaceId) -> Self {
        Self::new(id, ActorKind::Mob, name, place_id)
    }
}
