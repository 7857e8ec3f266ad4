//! Export use case: universe → graph description.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rpgworld_domain::{sort_exits, Exit, ExitDirection, PlaceId, UniverseId};

use crate::infrastructure::ports::{RepoError, WorldRepo};

use super::graph::{GraphCluster, GraphDescription, GraphEdge, GraphNode, UniverseHeader};

/// Builds the navigation graph of a universe from a single bulk load.
///
/// Places become nodes in ascending id order. A place with a region gets an
/// `ascend` edge to it and is placed in that region's cluster. Every other
/// exit, hidden ones included, becomes an edge labeled with its direction.
pub struct ExportUniverseMap {
    world: Arc<dyn WorldRepo>,
}

impl ExportUniverseMap {
    pub fn new(world: Arc<dyn WorldRepo>) -> Self {
        Self { world }
    }

    pub async fn execute(&self, universe_id: UniverseId) -> Result<GraphDescription, MapError> {
        let universe = self
            .world
            .get_universe(universe_id)
            .await?
            .ok_or(MapError::UniverseNotFound(universe_id))?;

        let places = self.world.list_places_with_exits(universe_id).await?;
        let names: HashMap<PlaceId, &str> = places
            .iter()
            .map(|entry| (entry.place.id, entry.place.name.as_str()))
            .collect();

        let mut nodes = Vec::with_capacity(places.len());
        let mut clusters = Vec::new();
        let mut edges = EdgeSet::default();
        let mut seen_nodes = HashSet::new();
        let mut seen_clusters = HashSet::new();

        for entry in &places {
            let place = &entry.place;
            if !seen_nodes.insert(place.id) {
                continue;
            }

            nodes.push(GraphNode {
                id: place.id,
                label: place.name.clone(),
                cluster_id: place.region_id,
            });

            if let Some(region_id) = place.region_id {
                let region_name =
                    names
                        .get(&region_id)
                        .ok_or_else(|| MapError::BrokenExitReference {
                            place_id: place.id,
                            label: ExitDirection::Ascend.to_string(),
                            missing_id: region_id,
                        })?;
                if seen_clusters.insert(region_id) {
                    clusters.push(GraphCluster {
                        id: region_id,
                        label: (*region_name).to_string(),
                    });
                }
                edges.push(place.id, region_id, ExitDirection::Ascend.as_str());
            }

            let mut exits: Vec<Exit> = entry
                .exits
                .iter()
                .copied()
                .filter(|exit| !exit.direction.is_hierarchy())
                .collect();
            sort_exits(&mut exits);

            for exit in exits {
                if !names.contains_key(&exit.destination_id) {
                    tracing::error!(
                        universe_id = %universe_id,
                        place_id = %place.id,
                        direction = %exit.direction,
                        missing_id = %exit.destination_id,
                        "Exit points outside the universe"
                    );
                    return Err(MapError::BrokenExitReference {
                        place_id: place.id,
                        label: exit.direction.to_string(),
                        missing_id: exit.destination_id,
                    });
                }
                edges.push(place.id, exit.destination_id, exit.direction.as_str());
            }
        }

        let edges = edges.into_vec();
        tracing::info!(
            universe_id = %universe_id,
            nodes = nodes.len(),
            clusters = clusters.len(),
            edges = edges.len(),
            "Exported universe map"
        );

        Ok(GraphDescription {
            universe: UniverseHeader {
                id: universe.id,
                title: universe.title,
            },
            nodes,
            clusters,
            edges,
        })
    }
}

/// Insertion-ordered edges, unique by `(from, to, label)`.
#[derive(Default)]
struct EdgeSet {
    seen: HashSet<(PlaceId, PlaceId, String)>,
    edges: Vec<GraphEdge>,
}

impl EdgeSet {
    fn push(&mut self, from: PlaceId, to: PlaceId, label: &str) {
        if self.seen.insert((from, to, label.to_string())) {
            self.edges.push(GraphEdge {
                from,
                to,
                label: label.to_string(),
            });
        }
    }

    fn into_vec(self) -> Vec<GraphEdge> {
        self.edges
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Universe not found: {0}")]
    UniverseNotFound(UniverseId),
    #[error("Place {place_id} has a {label} link to missing place {missing_id}")]
    BrokenExitReference {
        place_id: PlaceId,
        label: String,
        missing_id: PlaceId,
    },
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
