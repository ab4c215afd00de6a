//! Rooted trees over owned vertices.
//!
//! A [`RootedTree`] owns every vertex it contains and grows only by
//! appending a child under an existing parent. Because a label may appear
//! only once, each non-root vertex is reachable from the root along exactly
//! one path.

use std::collections::{HashMap, VecDeque};

use super::error::{validate_label, GraphResult};
use super::vertex::{Vertex, VertexId};
use crate::observer::{NoopObserver, Observer, TraversalEvent};

/// Strategy used by [`RootedTree::path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchMethod {
    /// Pre-order search with an explicit stack
    #[default]
    DepthFirst,
    /// Level-order search with parent back-references
    BreadthFirst,
}

impl std::str::FromStr for SearchMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dfs" | "depth" | "depth-first" => Ok(SearchMethod::DepthFirst),
            "bfs" | "breadth" | "breadth-first" => Ok(SearchMethod::BreadthFirst),
            _ => Err(format!(
                "Unknown search method: '{}'. Valid methods: dfs, bfs",
                s
            )),
        }
    }
}

impl std::fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMethod::DepthFirst => write!(f, "depth-first"),
            SearchMethod::BreadthFirst => write!(f, "breadth-first"),
        }
    }
}

/// A tree that owns its vertices and answers path and ancestry queries.
///
/// The root is fixed at construction. Vertices are stored in append order
/// and edges always point from parent to child.
///
/// # Example
///
/// ```rust
/// use sccscope::graph::{RootedTree, SearchMethod};
///
/// let mut tree = RootedTree::new("A", ()).unwrap();
/// tree.append_node("A", "B", ()).unwrap();
/// tree.append_node("B", "F", ()).unwrap();
/// tree.append_node("F", "K", ()).unwrap();
///
/// assert_eq!(tree.path("K", SearchMethod::DepthFirst), vec!["A", "B", "F", "K"]);
/// assert_eq!(tree.path("K", SearchMethod::BreadthFirst), vec!["A", "B", "F", "K"]);
/// assert!(tree.is_ancestor_of("B", "K"));
/// ```
#[derive(Debug, Clone)]
pub struct RootedTree<T> {
    /// Owned vertices; slot 0 is the root
    nodes: Vec<Vertex<T>>,
    /// Maps labels to their arena slot
    node_indices: HashMap<String, VertexId>,
    /// Parent slot per vertex; `None` for the root
    parents: Vec<Option<VertexId>>,
    /// Edge count from the root per vertex
    depths: Vec<usize>,
}

impl<T> RootedTree<T> {
    /// Creates a tree containing only its root.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyLabel`](super::GraphError::EmptyLabel) if
    /// `root_label` is empty.
    pub fn new(root_label: impl Into<String>, data: T) -> GraphResult<Self> {
        let root_label = root_label.into();
        validate_label(&root_label, "RootedTree::new")?;
        Ok(Self::with_valid_root(root_label, data))
    }

    /// Builds a tree from a label already known to be non-empty.
    pub(crate) fn with_valid_root(root_label: String, data: T) -> Self {
        let id = VertexId::new(0);
        let mut node_indices = HashMap::new();
        node_indices.insert(root_label.clone(), id);
        Self {
            nodes: vec![Vertex::with_valid_label(id, root_label, data)],
            node_indices,
            parents: vec![None],
            depths: vec![0],
        }
    }

    /// Returns the number of vertices, root included.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the root vertex.
    pub fn root(&self) -> &Vertex<T> {
        &self.nodes[0]
    }

    /// Checks whether a vertex with `label` exists anywhere in the tree.
    pub fn contains(&self, label: &str) -> bool {
        self.node_indices.contains_key(label)
    }

    /// Gets a vertex by label.
    pub fn get_node(&self, label: &str) -> Option<&Vertex<T>> {
        self.find(label).map(|id| &self.nodes[id.index()])
    }

    /// Returns all labels in append order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.label())
    }

    /// Appends a new vertex `label` under `parent_label`.
    ///
    /// Nothing happens if `label` already exists in the tree or if
    /// `parent_label` is unknown.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if the vertex was added, `Ok(false)` for a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyLabel`](super::GraphError::EmptyLabel) if
    /// `label` is empty.
    pub fn append_node(&mut self, parent_label: &str, label: &str, data: T) -> GraphResult<bool> {
        self.append_node_with(parent_label, label, data, &mut NoopObserver)
    }

    /// Same as [`append_node`](Self::append_node), reporting the new edge to
    /// `observer`.
    pub fn append_node_with<O>(
        &mut self,
        parent_label: &str,
        label: &str,
        data: T,
        observer: &mut O,
    ) -> GraphResult<bool>
    where
        O: Observer + ?Sized,
    {
        validate_label(label, "RootedTree::append_node")?;
        Ok(self.append_valid(parent_label, label, data, observer))
    }

    pub(crate) fn append_valid<O>(
        &mut self,
        parent_label: &str,
        label: &str,
        data: T,
        observer: &mut O,
    ) -> bool
    where
        O: Observer + ?Sized,
    {
        if self.contains(label) {
            return false;
        }
        let Some(parent) = self.find(parent_label) else {
            return false;
        };

        let id = VertexId::new(self.nodes.len());
        let child = Vertex::with_valid_label(id, label.to_string(), data);
        let child_ref = child.handle();
        self.nodes.push(child);
        self.node_indices.insert(label.to_string(), id);
        self.parents.push(Some(parent));
        self.depths.push(self.depths[parent.index()] + 1);
        self.nodes[parent.index()].connect(&child_ref);

        observer.notify(&TraversalEvent::NodeAppended {
            parent: parent_label,
            child: label,
        });
        true
    }

    /// Returns the labels on the path from the root to `dst_label`, both
    /// inclusive.
    ///
    /// Both search methods return the same path since every vertex has a
    /// single parent. An unknown destination yields an empty vector.
    pub fn path(&self, dst_label: &str, method: SearchMethod) -> Vec<String> {
        let Some(dst) = self.find(dst_label) else {
            return Vec::new();
        };

        let ids = match method {
            SearchMethod::DepthFirst => self.depth_first_path(VertexId::new(0), dst),
            SearchMethod::BreadthFirst => self.breadth_first_path(dst),
        };

        ids.into_iter()
            .map(|id| self.nodes[id.index()].label().to_string())
            .collect()
    }

    /// Checks whether `ancestor` reaches `descendant` along tree edges.
    ///
    /// Only the edges appended so far are considered. A vertex counts as its
    /// own ancestor. Runs in time proportional to the depth difference.
    pub fn is_ancestor_of(&self, ancestor: &str, descendant: &str) -> bool {
        let (Some(ancestor), Some(mut current)) = (self.find(ancestor), self.find(descendant))
        else {
            return false;
        };

        let target_depth = self.depths[ancestor.index()];
        while self.depths[current.index()] > target_depth {
            match self.parents[current.index()] {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        current == ancestor
    }

    /// Checks whether `descendant` lies below `ancestor` along tree edges.
    ///
    /// Mirror of [`is_ancestor_of`](Self::is_ancestor_of) with the arguments
    /// swapped.
    pub fn is_descendent_of(&self, descendant: &str, ancestor: &str) -> bool {
        self.is_ancestor_of(ancestor, descendant)
    }

    /// Returns the label of the parent of `label`, or `None` for the root and
    /// unknown labels.
    pub fn parent_of(&self, label: &str) -> Option<&str> {
        let parent = self.parents[self.find(label)?.index()]?;
        Some(self.nodes[parent.index()].label())
    }

    /// Returns the number of edges between the root and `label`.
    pub fn depth_of(&self, label: &str) -> Option<usize> {
        self.find(label).map(|id| self.depths[id.index()])
    }

    /// Renders the vertex count, the root and every vertex's children in
    /// pre-order.
    pub fn describe(&self) -> String {
        let mut out = format!("# nodes: {}\nRoot: {}\n", self.size(), self.root().label());

        let mut stack = vec![VertexId::new(0)];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.index()];
            out.push_str(&node.describe());
            out.push('\n');
            stack.extend(node.adjacency().iter().rev().map(|edge| edge.id));
        }

        out
    }

    fn find(&self, label: &str) -> Option<VertexId> {
        self.node_indices.get(label).copied()
    }

    /// Explicit-stack pre-order search from `from`. Returns the active stack
    /// at the moment `to` is matched, or an empty vector.
    fn depth_first_path(&self, from: VertexId, to: VertexId) -> Vec<VertexId> {
        if from == to {
            return vec![from];
        }

        // (vertex, index of the next child to visit)
        let mut stack: Vec<(VertexId, usize)> = vec![(from, 0)];

        while let Some(frame) = stack.last_mut() {
            let (id, next) = *frame;
            let children = self.nodes[id.index()].adjacency();

            if next == children.len() {
                stack.pop();
                continue;
            }
            frame.1 += 1;

            let child = children[next].id;
            stack.push((child, 0));
            if child == to {
                return stack.into_iter().map(|(id, _)| id).collect();
            }
        }

        Vec::new()
    }

    /// Level-order search from the root, recording each vertex's parent and
    /// walking the back-references once `to` is dequeued.
    fn breadth_first_path(&self, to: VertexId) -> Vec<VertexId> {
        let root = VertexId::new(0);
        let mut parents: Vec<Option<VertexId>> = vec![None; self.nodes.len()];
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = vec![current];
                let mut step = current;
                while let Some(parent) = parents[step.index()] {
                    path.push(parent);
                    step = parent;
                }
                path.reverse();
                return path;
            }

            for edge in self.nodes[current.index()].adjacency() {
                parents[edge.id.index()] = Some(current);
                queue.push_back(edge.id);
            }
        }

        Vec::new()
    }
}
