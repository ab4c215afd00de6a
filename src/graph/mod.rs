//! Graph module: vertices, rooted trees, digraphs and the SCC engine.
//!
//! [`Digraph`] owns a general directed graph and decomposes it into
//! strongly connected components through a depth-first spanning forest.
//! The spanning trees are [`RootedTree`] instances, which also work as a
//! standalone tree type with path and ancestry queries.
//!
//! # Example
//!
//! ```rust
//! use sccscope::graph::{ArcKind, Digraph};
//!
//! let mut graph: Digraph = Digraph::new();
//! for label in ["A", "B", "C"] {
//!     graph.create_node(label, ()).unwrap();
//! }
//! graph.connect_node("A", "B");
//! graph.connect_node("B", "A");
//! graph.connect_node("B", "C");
//!
//! let forest = graph.depth_first_forest();
//! assert_eq!(forest.components().len(), 2);
//! assert_eq!(forest.arcs_of(ArcKind::Back).len(), 1);
//! assert_eq!(graph.degree_sum(), 3);
//! ```

mod digraph;
mod error;
mod forest;
mod tree;
mod vertex;

pub use digraph::Digraph;
pub use error::{GraphError, GraphResult};
pub use forest::{ArcKind, ClassifiedArc, Component, DepthFirstForest};
pub use tree::{RootedTree, SearchMethod};
pub use vertex::{Vertex, VertexId, VertexRef};
