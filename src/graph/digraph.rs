//! General directed graph over uniquely labeled, owned vertices.
//!
//! Vertices live in an arena owned by the [`Digraph`]; adjacency entries are
//! non-owning [`VertexRef`] handles into that arena. Arena slots are never
//! reused, so iterating the arena visits vertices in insertion order, which
//! keeps every traversal deterministic.

use std::collections::HashMap;

use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};

use super::error::{validate_label, GraphResult};
use super::forest::{build_forest, Component, DepthFirstForest, Snapshot};
use super::vertex::{Vertex, VertexId, VertexRef};
use crate::observer::{NoopObserver, Observer};

/// A directed graph that owns all of its vertices.
///
/// Labels are unique. Every lookup by label is total: unknown labels produce
/// `false`, `None`, zero or a no-op, never an error.
///
/// # Example
///
/// ```rust
/// use sccscope::graph::Digraph;
///
/// let mut graph: Digraph = Digraph::new();
/// for label in ["A", "B", "C", "D"] {
///     graph.create_node(label, ()).unwrap();
/// }
/// graph.connect_node("A", "B");
/// graph.connect_node("B", "C");
/// graph.connect_node("C", "A");
/// graph.connect_node("D", "A");
///
/// let components = graph.strongly_connected_components();
/// assert_eq!(components.len(), 2);
/// assert_eq!(components[0].len(), 3);
/// assert_eq!(components[1].members, vec!["D"]);
/// ```
#[derive(Debug, Clone)]
pub struct Digraph<T = ()> {
    /// Vertex arena; removed vertices leave an empty slot behind
    slots: Vec<Option<Vertex<T>>>,
    /// Maps labels to their arena slot for O(1) lookup
    node_indices: HashMap<String, VertexId>,
}

impl<T> Default for Digraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Digraph<T> {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            node_indices: HashMap::new(),
        }
    }

    /// Creates an empty graph with room for `nodes` vertices.
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            slots: Vec::with_capacity(nodes),
            node_indices: HashMap::with_capacity(nodes),
        }
    }

    /// Adds a vertex at the end of the insertion order.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the vertex was created, `Ok(false)` if the label was
    /// already taken (the existing vertex is left untouched).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyLabel`](super::GraphError::EmptyLabel) if
    /// `label` is empty.
    pub fn create_node(&mut self, label: impl Into<String>, data: T) -> GraphResult<bool> {
        let label = label.into();
        validate_label(&label, "Digraph::create_node")?;
        if self.node_indices.contains_key(&label) {
            return Ok(false);
        }

        let id = VertexId::new(self.slots.len());
        self.node_indices.insert(label.clone(), id);
        self.slots.push(Some(Vertex::with_valid_label(id, label, data)));
        Ok(true)
    }

    /// Removes a vertex together with every edge pointing at it.
    ///
    /// # Returns
    ///
    /// `true` if the vertex existed.
    pub fn remove_node(&mut self, label: &str) -> bool {
        let Some(id) = self.node_indices.remove(label) else {
            return false;
        };
        self.slots[id.index()] = None;

        for vertex in self.slots.iter_mut().flatten() {
            vertex.disconnect_label(label);
        }
        true
    }

    /// Adds the edge `head -> tail`.
    ///
    /// # Returns
    ///
    /// `true` if a new edge was added, `false` if either vertex is missing or
    /// the edge already exists.
    pub fn connect_node(&mut self, head: &str, tail: &str) -> bool {
        let Some(tail_ref) = self.get_node(tail).map(Vertex::handle) else {
            return false;
        };
        match self.vertex_mut(head) {
            Some(vertex) => vertex.connect(&tail_ref),
            None => false,
        }
    }

    /// Removes the edge `head -> tail`.
    ///
    /// # Returns
    ///
    /// `true` if an edge was removed.
    pub fn disconnect_node(&mut self, head: &str, tail: &str) -> bool {
        match self.vertex_mut(head) {
            Some(vertex) => vertex.disconnect_label(tail),
            None => false,
        }
    }

    /// Checks whether the edge `head -> tail` exists.
    pub fn is_connected(&self, head: &str, tail: &str) -> bool {
        match (self.get_node(head), self.get_node(tail)) {
            (Some(head), Some(tail)) => head.is_connected(&tail.handle()),
            _ => false,
        }
    }

    /// Returns the number of vertices.
    pub fn size(&self) -> usize {
        self.node_indices.len()
    }

    /// Checks if the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.node_indices.is_empty()
    }

    /// Checks if a vertex exists.
    pub fn contains(&self, label: &str) -> bool {
        self.node_indices.contains_key(label)
    }

    /// Gets a vertex by label.
    pub fn get_node(&self, label: &str) -> Option<&Vertex<T>> {
        let id = self.node_indices.get(label)?;
        self.slots[id.index()].as_ref()
    }

    /// Gets a mutable reference to the payload of `label`.
    ///
    /// Adjacency is only changed through the graph, so edges always point at
    /// vertices it owns.
    pub fn data_mut(&mut self, label: &str) -> Option<&mut T> {
        self.vertex_mut(label).map(Vertex::data_mut)
    }

    fn vertex_mut(&mut self, label: &str) -> Option<&mut Vertex<T>> {
        let id = self.node_indices.get(label)?;
        self.slots[id.index()].as_mut()
    }

    /// Iterates over the vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex<T>> {
        self.slots.iter().flatten()
    }

    /// Iterates over the labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.vertices().map(Vertex::label)
    }

    /// Returns the out-degree of `label`, or zero if it is unknown.
    pub fn degree(&self, label: &str) -> usize {
        self.get_node(label).map_or(0, Vertex::degree)
    }

    /// Returns the total number of edges.
    pub fn degree_sum(&self) -> usize {
        self.vertices().map(Vertex::degree).sum()
    }

    /// Renders one `label : {targets}` line per vertex.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for vertex in self.vertices() {
            out.push_str(&vertex.describe());
            out.push('\n');
        }
        out
    }

    /// Builds the depth-first spanning forest, classifies every arc and
    /// computes the strongly connected components.
    ///
    /// Roots are tried in insertion order and arcs are followed in adjacency
    /// order, so the result is deterministic.
    pub fn depth_first_forest(&self) -> DepthFirstForest {
        self.depth_first_forest_with(&mut NoopObserver)
    }

    /// Same as [`depth_first_forest`](Self::depth_first_forest), reporting
    /// each traversal step to `observer`.
    pub fn depth_first_forest_with<O>(&self, observer: &mut O) -> DepthFirstForest
    where
        O: Observer + ?Sized,
    {
        build_forest(&self.snapshot(), observer)
    }

    /// Returns the strongly connected components in reverse topological
    /// order of the condensation graph.
    pub fn strongly_connected_components(&self) -> Vec<Component> {
        self.depth_first_forest().into_components()
    }

    /// Returns the components that contain a directed cycle.
    pub fn cycles(&self) -> Vec<Component> {
        self.strongly_connected_components()
            .into_iter()
            .filter(Component::is_cyclic)
            .collect()
    }

    /// Checks if the graph contains a directed cycle, self-loops included.
    pub fn has_cycles(&self) -> bool {
        !self.cycles().is_empty()
    }

    /// Checks whether `to` is reachable from `from` over any number of edges.
    ///
    /// Unlike the tree-scoped ancestry queries used during forest
    /// construction, this looks at the whole graph. A vertex always reaches
    /// itself.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sccscope::graph::Digraph;
    ///
    /// let mut graph: Digraph = Digraph::new();
    /// for label in ["a", "b", "c"] {
    ///     graph.create_node(label, ()).unwrap();
    /// }
    /// graph.connect_node("a", "b");
    /// graph.connect_node("b", "c");
    ///
    /// assert!(graph.is_reachable("a", "c"));
    /// assert!(!graph.is_reachable("c", "a"));
    /// ```
    pub fn is_reachable(&self, from: &str, to: &str) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }

        let graph = self.to_petgraph();
        let index_of = |label: &str| {
            graph
                .node_indices()
                .find(|&idx| graph[idx] == label)
        };
        match (index_of(from), index_of(to)) {
            (Some(a), Some(b)) => has_path_connecting(&graph, a, b, None),
            _ => false,
        }
    }

    /// Copies the graph structure into a petgraph `DiGraph` whose node
    /// weights are the labels.
    ///
    /// Nodes are added in insertion order and edges in adjacency order.
    pub fn to_petgraph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::with_capacity(self.size(), self.degree_sum());
        let mut indices: HashMap<VertexId, NodeIndex> = HashMap::with_capacity(self.size());

        for vertex in self.vertices() {
            let idx = graph.add_node(vertex.label().to_string());
            indices.insert(vertex.id(), idx);
        }
        for vertex in self.vertices() {
            for edge in vertex.adjacency() {
                if let (Some(&a), Some(&b)) = (indices.get(&vertex.id()), indices.get(&edge.id)) {
                    graph.add_edge(a, b, ());
                }
            }
        }

        graph
    }

    /// Dense view of the graph for traversal.
    fn snapshot(&self) -> Snapshot<'_> {
        let mut position: Vec<Option<usize>> = vec![None; self.slots.len()];
        let mut labels = Vec::with_capacity(self.size());

        for vertex in self.vertices() {
            position[vertex.id().index()] = Some(labels.len());
            labels.push(vertex.label());
        }

        let edges: Vec<Vec<usize>> = self
            .vertices()
            .map(|vertex| {
                vertex
                    .adjacency()
                    .iter()
                    .filter_map(|edge: &VertexRef| position.get(edge.id.index()).copied().flatten())
                    .collect()
            })
            .collect();

        Snapshot { labels, edges }
    }
}

impl<T> std::fmt::Display for Digraph<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}
