//! Exit entity - a directed passage out of a place

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::{Direction, ExitDirection, PlaceId};

/// Whether an exit shows up for players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExitVisibility {
    #[default]
    Normal,
    /// Secret passage: kept in the graph, invisible to movement and listings
    Hidden,
}

impl ExitVisibility {
    /// Get the string representation for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Hidden => "hidden",
        }
    }
}

impl fmt::Display for ExitVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExitVisibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "" => Ok(Self::Normal),
            "hidden" => Ok(Self::Hidden),
            _ => Err(DomainError::parse(format!("Invalid exit visibility: {}", s))),
        }
    }
}

/// A passage from `place_id` to `destination_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exit {
    pub place_id: PlaceId,
    pub direction: ExitDirection,
    pub destination_id: PlaceId,
    pub visibility: ExitVisibility,
}

impl Exit {
    pub fn new(
        place_id: PlaceId,
        direction: impl Into<ExitDirection>,
        destination_id: PlaceId,
    ) -> Self {
        Self {
            place_id,
            direction: direction.into(),
            destination_id,
            visibility: ExitVisibility::Normal,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visibility = ExitVisibility::Hidden;
        self
    }

    /// Whether an actor may travel through this exit.
    pub fn is_navigable(&self) -> bool {
        self.visibility == ExitVisibility::Normal && !self.direction.is_hierarchy()
    }

    /// The travel direction, if this exit is navigable.
    pub fn travel_direction(&self) -> Option<Direction> {
        if self.is_navigable() {
            self.direction.navigable()
        } else {
            None
        }
    }
}

/// Canonical exit order: direction, then destination.
pub fn sort_exits(exits: &mut [Exit]) {
    exits.sort_by_key(|exit| (exit.direction, exit.destination_id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_and_hierarchy_exits_are_not_navigable() {
        let a = PlaceId::new(1);
        let b = PlaceId::new(2);

        assert!(Exit::new(a, Direction::North, b).is_navigable());
        assert!(!Exit::new(a, Direction::North, b).hidden().is_navigable());
        assert!(!Exit::new(a, ExitDirection::Ascend, b).is_navigable());
        assert_eq!(
            Exit::new(a, Direction::North, b).hidden().travel_direction(),
            None
        );
    }

    #[test]
    fn canonical_order_is_direction_then_destination() {
        let a = PlaceId::new(1);
        let mut exits = vec![
            Exit::new(a, ExitDirection::Ascend, PlaceId::new(4)),
            Exit::new(a, Direction::Out, PlaceId::new(2)),
            Exit::new(a, Direction::North, PlaceId::new(9)),
            Exit::new(a, Direction::North, PlaceId::new(3)),
        ];
        sort_exits(&mut exits);

        let order: Vec<(&str, i64)> = exits
            .iter()
            .map(|e| (e.direction.as_str(), e.destination_id.get()))
            .collect();
        assert_eq!(
            order,
            vec![("north", 3), ("north", 9), ("out", 2), ("ascend", 4)]
        );
    }
}
