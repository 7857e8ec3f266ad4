//! Place entity - a node in the world graph
//!
//! Places nest through `region_id`: a place whose `region_id` points at
//! another place is contained in that region. The hierarchy is maintained by
//! world-building tooling and assumed acyclic here.

use serde::{Deserialize, Serialize};

use crate::{Exit, PlaceId, UniverseId};

/// A location in a universe.
///
/// Simple data struct with public fields: nothing here is mutated by the
/// engine, so there are no invariants to protect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub universe_id: UniverseId,
    pub name: String,
    /// Parent place acting as this place's region
    pub region_id: Option<PlaceId>,
}

impl Place {
    pub fn new(id: PlaceId, universe_id: UniverseId, name: impl Into<String>) -> Self {
        Self {
            id,
            universe_id,
            name: name.into(),
            region_id: None,
        }
    }

    pub fn with_region(mut self, region_id: PlaceId) -> Self {
        self.region_id = Some(region_id);
        self
    }
}

/// A place together with every exit leaving it, hidden and hierarchy exits
/// included. Produced by bulk loads for the map export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceWithExits {
    pub place: Place,
    pub exits: Vec<Exit>,
}

impl PlaceWithExits {
    pub fn new(place: Place, exits: Vec<Exit>) -> Self {
        Self { place, exits }
    }
}
