//! Universe map export.

mod export_map;
mod graph;

pub use export_map::{ExportUniverseMap, MapError};
pub use graph::{GraphCluster, GraphDescription, GraphEdge, GraphNode, UniverseHeader};
