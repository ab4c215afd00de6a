//! JSON export implementation.
//!
//! Exports graph analysis results in JSON format for machine-readable output.

use super::{AnalysisReport, Exporter};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable vertex with its outgoing edges.
#[derive(Serialize)]
struct JsonVertex {
    label: String,
    edges: Vec<String>,
}

/// Serializable spanning-tree vertex.
#[derive(Serialize)]
struct JsonTreeNode {
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<String>,
    depth: usize,
}

/// Serializable spanning tree, vertices in discovery order.
#[derive(Serialize)]
struct JsonTree {
    root: String,
    nodes: Vec<JsonTreeNode>,
}

/// Serializable classified arc.
#[derive(Serialize)]
struct JsonArc {
    source: String,
    target: String,
    kind: String,
}

/// Serializable strongly connected component.
#[derive(Serialize)]
struct JsonComponent {
    members: Vec<String>,
    cyclic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    cycle_path: Option<String>,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    vertices: usize,
    edges: usize,
    trees: usize,
    components: usize,
    cyclic_components: usize,
    tree_arcs: usize,
    back_arcs: usize,
    forward_arcs: usize,
    cross_arcs: usize,
    loop_arcs: usize,
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport {
    summary: JsonSummary,
    vertices: Vec<JsonVertex>,
    forest: Vec<JsonTree>,
    arcs: Vec<JsonArc>,
    components: Vec<JsonComponent>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
        let forest = &report.forest;

        let vertices: Vec<JsonVertex> = report
            .adjacency
            .iter()
            .map(|(label, edges)| JsonVertex {
                label: label.clone(),
                edges: edges.clone(),
            })
            .collect();

        let trees: Vec<JsonTree> = forest
            .trees()
            .iter()
            .map(|tree| JsonTree {
                root: tree.root().label().to_string(),
                nodes: tree
                    .labels()
                    .map(|label| JsonTreeNode {
                        label: label.to_string(),
                        parent: tree.parent_of(label).map(str::to_string),
                        depth: tree.depth_of(label).unwrap_or_default(),
                    })
                    .collect(),
            })
            .collect();

        let arcs: Vec<JsonArc> = forest
            .arcs()
            .iter()
            .map(|arc| JsonArc {
                source: arc.source.clone(),
                target: arc.target.clone(),
                kind: arc.kind.to_string(),
            })
            .collect();

        let components: Vec<JsonComponent> = forest
            .components()
            .iter()
            .map(|c| JsonComponent {
                members: c.members.clone(),
                cyclic: c.is_cyclic(),
                cycle_path: c.is_cyclic().then(|| c.cycle_path()),
            })
            .collect();

        let export = JsonExport {
            summary: JsonSummary {
                vertices: report.vertex_count(),
                edges: report.edge_count,
                trees: forest.trees().len(),
                components: forest.components().len(),
                cyclic_components: report.cyclic_components().len(),
                tree_arcs: forest.tree_arcs().len(),
                back_arcs: forest.back_arcs().len(),
                forward_arcs: forest.forward_arcs().len(),
                cross_arcs: forest.cross_arcs().len(),
                loop_arcs: forest.loop_arcs().len(),
            },
            vertices,
            forest: trees,
            arcs,
            components,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Digraph;

    fn create_test_report() -> AnalysisReport {
        let mut graph: Digraph = Digraph::new();
        for label in ["a", "b", "c", "d"] {
            graph.create_node(label, ()).unwrap();
        }
        graph.connect_node("a", "b");
        graph.connect_node("b", "a");
        graph.connect_node("b", "c");
        graph.connect_node("d", "d");

        AnalysisReport::new(&graph)
    }

    fn export_value(report: &AnalysisReport) -> serde_json::Value {
        let mut output = Vec::new();
        JsonExporter.export(report, &mut output).unwrap();
        let json_str = String::from_utf8(output).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn test_json_export_summary() {
        let parsed = export_value(&create_test_report());

        assert_eq!(parsed["summary"]["vertices"], 4);
        assert_eq!(parsed["summary"]["edges"], 4);
        assert_eq!(parsed["summary"]["trees"], 2);
        assert_eq!(parsed["summary"]["components"], 3);
        assert_eq!(parsed["summary"]["cyclic_components"], 2);
        assert_eq!(parsed["summary"]["tree_arcs"], 2);
        assert_eq!(parsed["summary"]["back_arcs"], 1);
        assert_eq!(parsed["summary"]["loop_arcs"], 1);
    }

    #[test]
    fn test_json_export_vertices_and_arcs() {
        let parsed = export_value(&create_test_report());

        let vertices = parsed["vertices"].as_array().unwrap();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[1]["label"], "b");
        assert_eq!(vertices[1]["edges"][0], "a");
        assert_eq!(vertices[1]["edges"][1], "c");

        let arcs = parsed["arcs"].as_array().unwrap();
        assert_eq!(arcs[0]["source"], "a");
        assert_eq!(arcs[0]["target"], "b");
        assert_eq!(arcs[0]["kind"], "tree");
        assert_eq!(arcs[1]["kind"], "back");
    }

    #[test]
    fn test_json_export_forest_paths() {
        let parsed = export_value(&create_test_report());

        let forest = parsed["forest"].as_array().unwrap();
        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0]["root"], "a");
        assert_eq!(
            forest[0]["nodes"][2],
            serde_json::json!({"label": "c", "parent": "b", "depth": 2})
        );
        assert!(forest[0]["nodes"][0].get("parent").is_none());
        assert_eq!(forest[1]["root"], "d");
    }

    #[test]
    fn test_json_export_long_chain_stays_linear() {
        let n = 20_000;
        let mut graph: Digraph = Digraph::with_capacity(n);
        for i in 0..n {
            graph.create_node(format!("v{}", i), ()).unwrap();
        }
        for i in 1..n {
            graph.connect_node(&format!("v{}", i - 1), &format!("v{}", i));
        }

        let mut output = Vec::new();
        JsonExporter
            .export(&AnalysisReport::new(&graph), &mut output)
            .unwrap();
        // A handful of short lines per vertex, not one path per vertex
        assert!(output.len() < n * 1_000);

        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let last = &parsed["forest"][0]["nodes"][n - 1];
        assert_eq!(last["parent"], format!("v{}", n - 2));
        assert_eq!(last["depth"], n - 1);
    }

    #[test]
    fn test_json_export_components() {
        let parsed = export_value(&create_test_report());

        let components = parsed["components"].as_array().unwrap();
        assert_eq!(components[0]["members"], serde_json::json!(["c"]));
        assert_eq!(components[0]["cyclic"], false);
        assert!(components[0].get("cycle_path").is_none());

        assert_eq!(components[1]["members"], serde_json::json!(["b", "a"]));
        assert_eq!(components[1]["cycle_path"], "a -> b -> a");

        assert_eq!(components[2]["cycle_path"], "d -> d");
    }

    #[test]
    fn test_json_is_valid_for_empty_graph() {
        let graph: Digraph = Digraph::new();
        let parsed = export_value(&AnalysisReport::new(&graph));
        assert_eq!(parsed["summary"]["vertices"], 0);
        assert!(parsed["components"].as_array().unwrap().is_empty());
    }
}
