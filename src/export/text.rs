//! Plain text export implementation.
//!
//! Renders the adjacency dump, each spanning tree, the classified arcs and
//! the components as indented text for terminals and logs.

use super::{AnalysisReport, Exporter};
use std::io::{self, Write};

/// Text exporter implementation.
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()> {
        let forest = &report.forest;

        writeln!(
            writer,
            "Graph: {} vertices, {} edges",
            report.vertex_count(),
            report.edge_count
        )?;
        for (label, targets) in &report.adjacency {
            writeln!(writer, "  {} : {{{}}}", label, targets.join(", "))?;
        }
        writeln!(writer)?;

        writeln!(writer, "Depth-first forest ({} trees)", forest.trees().len())?;
        for tree in forest.trees() {
            for line in tree.describe().lines() {
                writeln!(writer, "  {}", line)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "Arcs")?;
        for (kind, count) in report.arc_counts() {
            if count == 0 {
                continue;
            }
            let arcs: Vec<String> = forest
                .arcs_of(kind)
                .iter()
                .map(|arc| arc.to_string())
                .collect();
            writeln!(writer, "  {:<8} {}", kind.to_string(), arcs.join(", "))?;
        }
        writeln!(writer)?;

        writeln!(
            writer,
            "Strongly connected components ({}, {} cyclic)",
            forest.components().len(),
            report.cyclic_components().len()
        )?;
        for (i, component) in forest.components().iter().enumerate() {
            if component.is_cyclic() {
                writeln!(
                    writer,
                    "  {:>3}. {{{}}}  cycle: {}",
                    i + 1,
                    component,
                    component.cycle_path()
                )?;
            } else {
                writeln!(writer, "  {:>3}. {{{}}}", i + 1, component)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Digraph;

    fn render(graph: &Digraph) -> String {
        let mut output = Vec::new();
        TextExporter
            .export(&AnalysisReport::new(graph), &mut output)
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_text_export_sections() {
        let mut graph: Digraph = Digraph::new();
        for label in ["A", "B", "C", "D"] {
            graph.create_node(label, ()).unwrap();
        }
        graph.connect_node("A", "B");
        graph.connect_node("B", "C");
        graph.connect_node("C", "A");
        graph.connect_node("D", "A");

        let text = render(&graph);

        assert!(text.starts_with("Graph: 4 vertices, 4 edges\n"));
        assert!(text.contains("  A : {B}\n"));
        assert!(text.contains("Depth-first forest (2 trees)"));
        assert!(text.contains("  Root: A\n"));
        assert!(text.contains("  tree     A -> B, B -> C\n"));
        assert!(text.contains("  back     C -> A\n"));
        assert!(text.contains("  cross    D -> A\n"));
        assert!(!text.contains("forward"));
        assert!(text.contains("Strongly connected components (2, 1 cyclic)"));
        assert!(text.contains("    1. {C, B, A}  cycle: A -> B -> C -> A\n"));
        assert!(text.contains("    2. {D}\n"));
    }

    #[test]
    fn test_text_export_empty_graph() {
        let graph: Digraph = Digraph::new();
        let text = render(&graph);

        assert!(text.starts_with("Graph: 0 vertices, 0 edges\n"));
        assert!(text.contains("Strongly connected components (0, 0 cyclic)"));
    }
}
