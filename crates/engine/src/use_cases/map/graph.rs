//! Serializable universe graph and its DOT rendering.

use std::fmt::Write as _;

use rpgworld_domain::{PlaceId, UniverseId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseHeader {
    pub id: UniverseId,
    pub title: String,
}

/// One place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: PlaceId,
    pub label: String,
    /// Region the place belongs to; absent means the universe-level group
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<PlaceId>,
}

/// A region, keyed by the id of the place acting as region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphCluster {
    pub id: PlaceId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: PlaceId,
    pub to: PlaceId,
    pub label: String,
}

/// Renderer-neutral map of a universe.
///
/// Element order is part of the value: the exporter builds it deterministically
/// and both renderings emit elements in that order, so an unchanged universe
/// always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub universe: UniverseHeader,
    pub nodes: Vec<GraphNode>,
    pub clusters: Vec<GraphCluster>,
    pub edges: Vec<GraphEdge>,
}

impl GraphDescription {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Graphviz source: one `cluster_<id>` subgraph per region, top-level
    /// places grouped under the universe title.
    pub fn to_dot(&self) -> String {
        let title = escape(&self.universe.title);
        let mut out = String::new();

        // Writing into a String cannot fail.
        let _ = writeln!(out, "digraph \"{title}\" {{");
        let _ = writeln!(out, "  rankdir=LR;");

        for cluster in &self.clusters {
            let _ = writeln!(out, "  subgraph \"cluster_{}\" {{", cluster.id);
            let _ = writeln!(out, "    label=\"{}\";", escape(&cluster.label));
            for node in self
                .nodes
                .iter()
                .filter(|node| node.cluster_id == Some(cluster.id))
            {
                let _ = writeln!(
                    out,
                    "    \"{}\" [label=\"{}\"];",
                    node.id,
                    escape(&node.label)
                );
            }
            let _ = writeln!(out, "  }}");
        }

        for node in self.nodes.iter().filter(|node| node.cluster_id.is_none()) {
            let _ = writeln!(
                out,
                "  \"{}\" [label=\"{}\", group=\"{title}\"];",
                node.id,
                escape(&node.label)
            );
        }

        for edge in &self.edges {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                edge.from,
                edge.to,
                escape(&edge.label)
            );
        }

        out.push_str("}\n");
        out
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GraphDescription {
        GraphDescription {
            universe: UniverseHeader {
                id: UniverseId::new(3),
                title: "The \"Deep\" Wood".to_string(),
            },
            nodes: vec![
                GraphNode {
                    id: PlaceId::new(1),
                    label: "Glade".to_string(),
                    cluster_id: None,
                },
                GraphNode {
                    id: PlaceId::new(2),
                    label: "Old Oak".to_string(),
                    cluster_id: Some(PlaceId::new(1)),
                },
            ],
            clusters: vec![GraphCluster {
                id: PlaceId::new(1),
                label: "Glade".to_string(),
            }],
            edges: vec![GraphEdge {
                from: PlaceId::new(2),
                to: PlaceId::new(1),
                label: "ascend".to_string(),
            }],
        }
    }

    #[test]
    fn dot_output_is_escaped_and_ordered() {
        let expected = "digraph \"The \\\"Deep\\\" Wood\" {\n\
            \x20 rankdir=LR;\n\
            \x20 subgraph \"cluster_1\" {\n\
            \x20   label=\"Glade\";\n\
            \x20   \"2\" [label=\"Old Oak\"];\n\
            \x20 }\n\
            \x20 \"1\" [label=\"Glade\", group=\"The \\\"Deep\\\" Wood\"];\n\
            \x20 \"2\" -> \"1\" [label=\"ascend\"];\n\
            }\n";
        assert_eq!(sample().to_dot(), expected);
    }

    #[test]
    fn json_omits_absent_cluster() {
        let json = sample().to_json().expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).expect("parse");

        assert_eq!(value["universe"]["id"], 3);
        assert!(value["nodes"][0].get("cluster_id").is_none());
        assert_eq!(value["nodes"][1]["cluster_id"], 1);
        assert_eq!(value["edges"][0]["label"], "ascend");
    }

    #[test]
    fn escape_handles_backslashes_and_newlines() {
        assert_eq!(escape("a\\b\nc\r"), "a\\\\b\\nc");
    }
}
