use std::io::{self, Write};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use sccscope::export::{self, AnalysisReport, ExportFormat};
use sccscope::graph::{Digraph, RootedTree, SearchMethod};
use sccscope::observer::WriterObserver;

#[derive(Parser)]
#[command(name = "sccscope")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version = "0.1.0")]
#[command(about = "Depth-first forests, arc classification and strongly connected components", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the built-in fifteen-vertex sample graph
    Demo {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// Trace every traversal step to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Analyze a graph given as a list of edges
    Scc {
        /// Edge as HEAD:TAIL (repeatable); endpoints are created on first use
        #[arg(short, long = "edge", value_parser = parse_edge)]
        edges: Vec<(String, String)>,

        /// Isolated vertex (repeatable)
        #[arg(short, long = "node")]
        nodes: Vec<String>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// Trace every traversal step to stderr
        #[arg(short, long)]
        verbose: bool,
    },
    /// Find the path from the root of a tree to one of its vertices
    Path {
        /// Root label of the tree
        #[arg(short, long)]
        root: String,

        /// Tree edge as PARENT:CHILD (repeatable, applied in order)
        #[arg(short, long = "edge", value_parser = parse_edge)]
        edges: Vec<(String, String)>,

        /// Destination label
        #[arg(short, long)]
        to: String,

        /// Search method (dfs, bfs)
        #[arg(short, long, default_value = "dfs")]
        method: SearchMethod,
    },
    /// Show version information
    Version,
}

const SAMPLE_NODES: [&str; 15] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O",
];

const SAMPLE_EDGES: [(&str, &str); 23] = [
    ("A", "M"),
    ("C", "F"),
    ("D", "M"),
    ("E", "I"),
    ("F", "C"),
    ("F", "L"),
    ("G", "K"),
    ("H", "G"),
    ("H", "C"),
    ("I", "I"),
    ("J", "L"),
    ("J", "B"),
    ("K", "H"),
    ("K", "N"),
    ("L", "J"),
    ("L", "E"),
    ("M", "A"),
    ("M", "D"),
    ("M", "O"),
    ("N", "J"),
    ("O", "N"),
    ("O", "B"),
    ("O", "F"),
];

/// Parses `HEAD:TAIL` into a label pair.
fn parse_edge(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((head, tail)) if !head.is_empty() && !tail.is_empty() => {
            Ok((head.to_string(), tail.to_string()))
        }
        _ => Err(format!("Invalid edge '{}'. Expected HEAD:TAIL", s)),
    }
}

fn sample_graph() -> anyhow::Result<Digraph> {
    let mut graph = Digraph::with_capacity(SAMPLE_NODES.len());
    for label in SAMPLE_NODES {
        graph.create_node(label, ())?;
    }
    for (head, tail) in SAMPLE_EDGES {
        graph.connect_node(head, tail);
    }
    Ok(graph)
}

fn graph_from_args(nodes: &[String], edges: &[(String, String)]) -> anyhow::Result<Digraph> {
    let mut graph = Digraph::new();
    for label in nodes {
        graph
            .create_node(label.as_str(), ())
            .with_context(|| format!("Invalid node '{}'", label))?;
    }
    for (head, tail) in edges {
        graph
            .create_node(head.as_str(), ())
            .and_then(|_| graph.create_node(tail.as_str(), ()))
            .with_context(|| format!("Invalid edge '{}:{}'", head, tail))?;
        graph.connect_node(head, tail);
    }
    Ok(graph)
}

fn analyze(graph: &Digraph, format: ExportFormat, verbose: bool) -> anyhow::Result<()> {
    let report = if verbose {
        let mut observer = WriterObserver::new(io::stderr());
        AnalysisReport::with_observer(graph, &mut observer)
    } else {
        AnalysisReport::new(graph)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    export::export(format, &report, &mut out).context("Failed to write report")?;
    out.flush().context("Failed to write report")
}

fn tree_path(
    root: &str,
    edges: &[(String, String)],
    to: &str,
    method: SearchMethod,
) -> anyhow::Result<Vec<String>> {
    let mut tree = RootedTree::new(root, ()).context("Invalid tree root")?;
    for (parent, child) in edges {
        if !tree.append_node(parent, child, ())? {
            eprintln!("Skipped edge {}:{} (unknown parent or duplicate child)", parent, child);
        }
    }

    let path = tree.path(to, method);
    if path.is_empty() {
        bail!("'{}' is not in the tree rooted at '{}'", to, root);
    }
    Ok(path)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Demo { format, verbose }) => {
            let graph = sample_graph()?;
            analyze(&graph, *format, *verbose)?;
        }
        Some(Commands::Scc {
            edges,
            nodes,
            format,
            verbose,
        }) => {
            let graph = graph_from_args(nodes, edges)?;
            analyze(&graph, *format, *verbose)?;
        }
        Some(Commands::Path {
            root,
            edges,
            to,
            method,
        }) => {
            let path = tree_path(root, edges, to, *method)?;
            println!("{}", path.join(" -> "));
        }
        Some(Commands::Version) => {
            println!("sccscope v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("SccScope - Strongly Connected Component Explorer");
            println!("Run 'sccscope demo' to analyze the sample graph");
            println!("Run 'sccscope --help' for more information");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge() {
        assert_eq!(
            parse_edge("A:B").unwrap(),
            ("A".to_string(), "B".to_string())
        );
        assert!(parse_edge("AB").is_err());
        assert!(parse_edge(":B").is_err());
        assert!(parse_edge("A:").is_err());
    }

    #[test]
    fn test_sample_graph() {
        let graph = sample_graph().unwrap();
        assert_eq!(graph.size(), 15);
        assert_eq!(graph.degree_sum(), 23);
        assert_eq!(graph.strongly_connected_components().len(), 9);
    }

    #[test]
    fn test_graph_from_args() {
        let edges = vec![
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "a".to_string()),
        ];
        let graph = graph_from_args(&["z".to_string()], &edges).unwrap();

        let labels: Vec<&str> = graph.labels().collect();
        assert_eq!(labels, vec!["z", "a", "b"]);
        assert_eq!(graph.strongly_connected_components().len(), 2);
    }

    #[test]
    fn test_graph_from_args_rejects_empty_node() {
        assert!(graph_from_args(&[String::new()], &[]).is_err());
    }

    #[test]
    fn test_tree_path() {
        let edges = vec![
            ("O".to_string(), "N".to_string()),
            ("N".to_string(), "J".to_string()),
        ];
        let path = tree_path("O", &edges, "J", SearchMethod::BreadthFirst).unwrap();
        assert_eq!(path, vec!["O", "N", "J"]);

        assert!(tree_path("O", &edges, "Q", SearchMethod::DepthFirst).is_err());
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "sccscope", "scc", "-e", "a:b", "--edge", "b:a", "-f", "json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Scc { edges, format, .. }) => {
                assert_eq!(edges.len(), 2);
                assert_eq!(format, ExportFormat::Json);
            }
            _ => panic!("expected scc subcommand"),
        }

        let cli =
            Cli::try_parse_from(["sccscope", "path", "-r", "A", "-t", "B", "-m", "bfs"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Path {
                method: SearchMethod::BreadthFirst,
                ..
            })
        ));

        assert!(Cli::try_parse_from(["sccscope", "scc", "-e", "ab"]).is_err());
    }
}
