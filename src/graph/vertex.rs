//! Labeled vertices with ordered, non-owning adjacency.
//!
//! A [`Vertex`] never owns the vertices it points at. Its adjacency holds
//! [`VertexRef`] handles (arena id plus label) into the container that owns
//! every vertex, either a [`Digraph`](super::Digraph) or a
//! [`RootedTree`](super::RootedTree).

use super::error::{validate_label, GraphResult};

/// Index of a vertex inside its owning container's arena.
///
/// Ids are handed out by the container and are never reused while the
/// container is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(usize);

impl VertexId {
    /// Creates an id from a raw arena slot.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the arena slot this id refers to.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A non-owning reference to a vertex.
///
/// Carries the label alongside the id so that adjacency entries can be
/// matched by label without going back to the owning container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexRef {
    /// Arena id of the referenced vertex
    pub id: VertexId,
    /// Label of the referenced vertex
    pub label: String,
}

impl std::fmt::Display for VertexRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// A labeled unit of data with an ordered adjacency list.
///
/// # Example
///
/// ```rust
/// use sccscope::graph::{Vertex, VertexId};
///
/// let mut a = Vertex::new(VertexId::new(0), "a", 1).unwrap();
/// let b = Vertex::new(VertexId::new(1), "b", 2).unwrap();
///
/// assert!(a.connect(&b.handle()));
/// assert!(!a.connect(&b.handle())); // duplicate, ignored
/// assert_eq!(a.degree(), 1);
/// assert!(a.is_connected(&b.handle()));
/// ```
#[derive(Debug, Clone)]
pub struct Vertex<T> {
    id: VertexId,
    label: String,
    data: T,
    adjacency: Vec<VertexRef>,
}

impl<T> Vertex<T> {
    /// Creates a vertex with no outgoing edges.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyLabel`](super::GraphError::EmptyLabel) if
    /// `label` is empty.
    pub fn new(id: VertexId, label: impl Into<String>, data: T) -> GraphResult<Self> {
        let label = label.into();
        validate_label(&label, "Vertex::new")?;
        Ok(Self::with_valid_label(id, label, data))
    }

    /// Builds a vertex from a label its container has already validated.
    pub(crate) fn with_valid_label(id: VertexId, label: String, data: T) -> Self {
        Self {
            id,
            label,
            data,
            adjacency: Vec::new(),
        }
    }

    /// Returns the arena id of this vertex.
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// Returns the label of this vertex.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the payload stored in this vertex.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns a mutable reference to the payload.
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Returns a non-owning reference to this vertex.
    pub fn handle(&self) -> VertexRef {
        VertexRef {
            id: self.id,
            label: self.label.clone(),
        }
    }

    /// Returns the outgoing edges in insertion order.
    pub fn adjacency(&self) -> &[VertexRef] {
        &self.adjacency
    }

    /// Appends an edge to `other`.
    ///
    /// Self-references are allowed. Connecting an already connected vertex
    /// leaves the adjacency unchanged.
    ///
    /// # Returns
    ///
    /// `true` if a new edge was added.
    pub fn connect(&mut self, other: &VertexRef) -> bool {
        if self.is_connected(other) {
            return false;
        }
        self.adjacency.push(other.clone());
        true
    }

    /// Removes the edge to `other`, if any.
    ///
    /// # Returns
    ///
    /// `true` if an edge was removed.
    pub fn disconnect(&mut self, other: &VertexRef) -> bool {
        let before = self.adjacency.len();
        self.adjacency.retain(|edge| edge.id != other.id);
        self.adjacency.len() != before
    }

    /// Removes every edge whose target carries `label`.
    ///
    /// Matching is by label value, so the result does not depend on the
    /// order in which edges were added.
    ///
    /// # Returns
    ///
    /// `true` if an edge was removed.
    pub fn disconnect_label(&mut self, label: &str) -> bool {
        let before = self.adjacency.len();
        self.adjacency.retain(|edge| edge.label != label);
        self.adjacency.len() != before
    }

    /// Returns the number of outgoing edges.
    pub fn degree(&self) -> usize {
        self.adjacency.len()
    }

    /// Checks whether an edge to `other` exists.
    pub fn is_connected(&self, other: &VertexRef) -> bool {
        self.adjacency.iter().any(|edge| edge.id == other.id)
    }

    /// Renders the vertex as `label : {a, b, c}`.
    pub fn describe(&self) -> String {
        let targets: Vec<&str> = self.adjacency.iter().map(|e| e.label.as_str()).collect();
        format!("{} : {{{}}}", self.label, targets.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;

    fn vertex<T>(id: usize, label: &str, data: T) -> Vertex<T> {
        Vertex::new(VertexId::new(id), label, data).unwrap()
    }

    #[test]
    fn test_new_vertex() {
        let a = vertex(0, "a", 0);
        assert_eq!(a.label(), "a");
        assert_eq!(*a.data(), 0);
        assert_eq!(a.degree(), 0);
        assert_eq!(a.id(), VertexId::new(0));
    }

    #[test]
    fn test_empty_label_rejected() {
        let err = Vertex::new(VertexId::new(0), "", ()).unwrap_err();
        assert_eq!(
            err,
            GraphError::EmptyLabel {
                context: "Vertex::new"
            }
        );
    }

    #[test]
    fn test_connection_disconnection() {
        let mut a = vertex(0, "a", 0);
        let b = vertex(1, "b", 0);
        let c = vertex(2, "c", 0);

        // Self-connection counts as one edge
        let a_ref = a.handle();
        assert!(a.connect(&a_ref));
        assert_eq!(a.degree(), 1);

        a.connect(&b.handle());
        assert_eq!(a.degree(), 2);

        // Duplicate connection is rejected
        assert!(!a.connect(&b.handle()));
        assert_eq!(a.degree(), 2);

        // Disconnecting an absent edge is a no-op
        assert!(!a.disconnect(&c.handle()));
        assert_eq!(a.degree(), 2);

        a.connect(&c.handle());
        assert_eq!(a.degree(), 3);

        assert!(a.disconnect_label("a"));
        assert_eq!(a.degree(), 2);

        assert!(a.disconnect_label("b"));
        assert_eq!(a.degree(), 1);
        assert!(a.is_connected(&c.handle()));
    }

    #[test]
    fn test_string_payload() {
        let mut a = vertex(0, "a", "AAA".to_string());
        let b = vertex(1, "b", "Bbb".to_string());
        assert_eq!(a.data(), "AAA");
        assert_eq!(b.data(), "Bbb");

        a.data_mut().push('A');
        assert_eq!(a.data(), "AAAA");
    }

    #[test]
    fn test_disconnect_label_order_independent() {
        let b = vertex(1, "b", ());
        let c = vertex(2, "c", ());
        let d = vertex(3, "d", ());

        let mut first = vertex(0, "a", ());
        first.connect(&b.handle());
        first.connect(&c.handle());
        first.connect(&d.handle());

        let mut second = vertex(0, "a", ());
        second.connect(&d.handle());
        second.connect(&b.handle());
        second.connect(&c.handle());

        first.disconnect_label("c");
        second.disconnect_label("c");

        assert_eq!(first.degree(), second.degree());
        assert!(!first.is_connected(&c.handle()));
        assert!(!second.is_connected(&c.handle()));
        assert!(first.is_connected(&b.handle()) && second.is_connected(&b.handle()));
        assert!(first.is_connected(&d.handle()) && second.is_connected(&d.handle()));
    }

    #[test]
    fn test_adjacency_preserves_insertion_order() {
        let mut a = vertex(0, "a", ());
        for (i, label) in ["z", "m", "b"].iter().enumerate() {
            a.connect(&vertex(i + 1, label, ()).handle());
        }
        let labels: Vec<&str> = a.adjacency().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["z", "m", "b"]);
    }

    #[test]
    fn test_describe() {
        let mut a = vertex(0, "a", ());
        assert_eq!(a.describe(), "a : {}");

        a.connect(&vertex(1, "b", ()).handle());
        a.connect(&vertex(2, "c", ()).handle());
        assert_eq!(a.describe(), "a : {b, c}");
    }
}
