//! Export functionality for graph analysis results.
//!
//! This module renders the outcome of a depth-first forest traversal either
//! as human-readable text or as JSON.

pub mod json;
pub mod text;

use crate::graph::{ArcKind, Component, DepthFirstForest, Digraph};
use crate::observer::Observer;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain text - adjacency dump, forest and components
    #[default]
    Text,
    /// JSON format - machine-readable, full data
    Json,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Text => write!(f, "text"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

/// Data container for export operations.
///
/// Captures the graph's adjacency at the time of the analysis together with
/// the traversal result, so the report stays valid if the graph changes
/// afterwards.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// `(label, targets)` per vertex in insertion order
    pub adjacency: Vec<(String, Vec<String>)>,
    /// Total number of edges
    pub edge_count: usize,
    /// Spanning forest, classified arcs and components
    pub forest: DepthFirstForest,
}

impl AnalysisReport {
    /// Analyzes `graph` and collects the results.
    pub fn new<T>(graph: &Digraph<T>) -> Self {
        Self::from_forest(graph, graph.depth_first_forest())
    }

    /// Analyzes `graph`, reporting traversal steps to `observer`.
    pub fn with_observer<T, O>(graph: &Digraph<T>, observer: &mut O) -> Self
    where
        O: Observer + ?Sized,
    {
        Self::from_forest(graph, graph.depth_first_forest_with(observer))
    }

    fn from_forest<T>(graph: &Digraph<T>, forest: DepthFirstForest) -> Self {
        let adjacency = graph
            .vertices()
            .map(|vertex| {
                let targets = vertex
                    .adjacency()
                    .iter()
                    .map(|edge| edge.label.clone())
                    .collect();
                (vertex.label().to_string(), targets)
            })
            .collect();

        Self {
            adjacency,
            edge_count: graph.degree_sum(),
            forest,
        }
    }

    /// Number of vertices analyzed
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Components that contain a cycle
    pub fn cyclic_components(&self) -> Vec<&Component> {
        self.forest
            .components()
            .iter()
            .filter(|c| c.is_cyclic())
            .collect()
    }

    /// Number of arcs of each kind, in [`ArcKind::ALL`] order
    pub fn arc_counts(&self) -> Vec<(ArcKind, usize)> {
        ArcKind::ALL
            .iter()
            .map(|&kind| (kind, self.forest.arcs_of(kind).len()))
            .collect()
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the report to the given writer.
    fn export<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> io::Result<()>;
}

/// Export a report in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    report: &AnalysisReport,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Text => text::TextExporter.export(report, writer),
        ExportFormat::Json => json::JsonExporter.export(report, writer),
    }
}

/// Export a report to a string.
pub fn export_to_string(format: ExportFormat, report: &AnalysisReport) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, report, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
