//! Depth-first spanning forests and strongly connected components.
//!
//! The forest is built with an explicit stack, so traversal depth is bounded
//! by heap memory rather than the call stack. The same pass threads
//! Tarjan's low-link bookkeeping through the traversal: low-links decide the
//! component partition, while arc classification is a diagnostic by-product.
//!
//! Ancestry in the spanning tree under construction is read off the
//! traversal state: a vertex still being explored is an ancestor of the
//! current vertex, and a finished vertex discovered after the current one is
//! its descendant. Both checks are constant time.
//!
//! # References
//!
//! - Tarjan, R. E. (1972). "Depth-first search and linear graph algorithms"

use std::collections::{HashMap, VecDeque};

use super::tree::RootedTree;
use crate::observer::{Observer, TraversalEvent};

/// Classification of a traversed arc relative to the depth-first forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcKind {
    /// Arc into a vertex that was still undiscovered
    Tree,
    /// Arc into a proper ancestor in the active spanning tree
    Back,
    /// Arc into a completed descendant that is still on the component stack
    Forward,
    /// Any other arc into an already discovered vertex
    Cross,
    /// Self-edge
    Loop,
}

impl ArcKind {
    /// All kinds, in the order reports list them.
    pub const ALL: [ArcKind; 5] = [
        ArcKind::Tree,
        ArcKind::Back,
        ArcKind::Forward,
        ArcKind::Cross,
        ArcKind::Loop,
    ];
}

impl std::fmt::Display for ArcKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tree => write!(f, "tree"),
            Self::Back => write!(f, "back"),
            Self::Forward => write!(f, "forward"),
            Self::Cross => write!(f, "cross"),
            Self::Loop => write!(f, "loop"),
        }
    }
}

/// A traversed arc together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassifiedArc {
    /// Label of the arc's source vertex
    pub source: String,
    /// Label of the arc's target vertex
    pub target: String,
    /// How the arc relates to the spanning forest
    pub kind: ArcKind,
}

impl ClassifiedArc {
    /// Creates a classified arc.
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: ArcKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
        }
    }
}

impl std::fmt::Display for ClassifiedArc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// One strongly connected component.
///
/// Members are listed in the order they were popped off the component
/// stack, so the component's root (first discovered member) comes last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Labels of the vertices in this component
    pub members: Vec<String>,
    /// Closed walk through the root, first and last label equal; empty when
    /// the component has no cycle
    cycle: Vec<String>,
}

impl Component {
    /// Creates a component from its members and a closed walk through them.
    ///
    /// Pass an empty `cycle` for an acyclic singleton.
    pub fn new(members: Vec<String>, cycle: Vec<String>) -> Self {
        Self { members, cycle }
    }

    /// Returns the number of vertices in the component.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the component has no members (never produced by the
    /// engine).
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Checks whether `label` belongs to this component.
    pub fn contains(&self, label: &str) -> bool {
        self.members.iter().any(|member| member == label)
    }

    /// Returns true if the component contains a directed cycle: more than
    /// one member, or a single member with a self-loop.
    pub fn is_cyclic(&self) -> bool {
        !self.cycle.is_empty()
    }

    /// Returns a shortest closed walk through the component's root.
    ///
    /// Every consecutive pair is an edge of the graph. Empty for acyclic
    /// components.
    pub fn cycle(&self) -> &[String] {
        &self.cycle
    }

    /// Renders [`cycle`](Self::cycle), for example "a -> b -> a". Acyclic
    /// singletons render as the bare label.
    pub fn cycle_path(&self) -> String {
        if self.cycle.is_empty() {
            return self.members.last().cloned().unwrap_or_default();
        }
        self.cycle.join(" -> ")
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.members.join(", "))
    }
}

/// Result of a depth-first forest traversal.
///
/// Holds the spanning trees (one per root chosen in insertion order), every
/// traversed arc with its classification, and the strongly connected
/// components in reverse topological order of the condensation graph.
#[derive(Debug, Clone, Default)]
pub struct DepthFirstForest {
    trees: Vec<RootedTree<()>>,
    arcs: Vec<ClassifiedArc>,
    components: Vec<Component>,
    /// Maps each label to its position in `components`
    component_index: HashMap<String, usize>,
}

impl DepthFirstForest {
    /// Returns the spanning trees in the order their roots were chosen.
    pub fn trees(&self) -> &[RootedTree<()>] {
        &self.trees
    }

    /// Returns the spanning tree containing `label`.
    pub fn tree_of(&self, label: &str) -> Option<&RootedTree<()>> {
        self.trees.iter().find(|tree| tree.contains(label))
    }

    /// Returns every traversed arc in traversal order.
    pub fn arcs(&self) -> &[ClassifiedArc] {
        &self.arcs
    }

    /// Returns the arcs of one kind in traversal order.
    pub fn arcs_of(&self, kind: ArcKind) -> Vec<&ClassifiedArc> {
        self.arcs.iter().filter(|arc| arc.kind == kind).collect()
    }

    /// Returns the tree arcs.
    pub fn tree_arcs(&self) -> Vec<&ClassifiedArc> {
        self.arcs_of(ArcKind::Tree)
    }

    /// Returns the back arcs.
    pub fn back_arcs(&self) -> Vec<&ClassifiedArc> {
        self.arcs_of(ArcKind::Back)
    }

    /// Returns the forward arcs.
    pub fn forward_arcs(&self) -> Vec<&ClassifiedArc> {
        self.arcs_of(ArcKind::Forward)
    }

    /// Returns the cross arcs.
    pub fn cross_arcs(&self) -> Vec<&ClassifiedArc> {
        self.arcs_of(ArcKind::Cross)
    }

    /// Returns the loop arcs.
    pub fn loop_arcs(&self) -> Vec<&ClassifiedArc> {
        self.arcs_of(ArcKind::Loop)
    }

    /// Returns the strongly connected components in emission order.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Consumes the forest and returns only the components.
    pub fn into_components(self) -> Vec<Component> {
        self.components
    }

    /// Returns the component containing `label`.
    pub fn component_of(&self, label: &str) -> Option<&Component> {
        self.component_index
            .get(label)
            .map(|&position| &self.components[position])
    }
}

/// Dense, read-only view of a graph: labels in insertion order and
/// adjacency as positions into `labels`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Snapshot<'g> {
    pub(crate) labels: Vec<&'g str>,
    pub(crate) edges: Vec<Vec<usize>>,
}

/// Per-vertex traversal bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
struct VertexState {
    /// Discovery index, assigned once
    index: Option<usize>,
    low_link: usize,
    on_stack: bool,
    completed: bool,
    /// Position of the closed component in the output
    component: Option<usize>,
}

struct ForestBuilder<'a, 'g, O: ?Sized> {
    snapshot: &'a Snapshot<'g>,
    observer: &'a mut O,
    state: Vec<VertexState>,
    next_index: usize,
    /// Tarjan's component stack
    scc_stack: Vec<usize>,
    forest: DepthFirstForest,
}

/// Builds the depth-first forest of `snapshot`, reporting progress to
/// `observer`.
pub(crate) fn build_forest<O>(snapshot: &Snapshot<'_>, observer: &mut O) -> DepthFirstForest
where
    O: Observer + ?Sized,
{
    let mut builder = ForestBuilder {
        snapshot,
        observer,
        state: vec![VertexState::default(); snapshot.labels.len()],
        next_index: 0,
        scc_stack: Vec::new(),
        forest: DepthFirstForest::default(),
    };

    for root in 0..snapshot.labels.len() {
        if builder.state[root].index.is_none() {
            builder.walk(root);
        }
    }

    builder.forest
}

impl<O> ForestBuilder<'_, '_, O>
where
    O: Observer + ?Sized,
{
    fn label(&self, vertex: usize) -> &str {
        self.snapshot.labels[vertex]
    }

    /// Explores everything reachable from `root` that is still undiscovered,
    /// growing one spanning tree.
    fn walk(&mut self, root: usize) {
        let root_label = self.snapshot.labels[root];
        self.observer
            .notify(&TraversalEvent::TreeStarted { root: root_label });
        let mut tree = RootedTree::with_valid_root(root_label.to_string(), ());

        self.discover(root);
        // (vertex, position of the next outgoing arc)
        let mut call_stack: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(frame) = call_stack.last_mut() {
            let (u, next) = *frame;

            if let Some(&v) = self.snapshot.edges[u].get(next) {
                frame.1 += 1;

                if self.state[v].index.is_none() {
                    self.record(u, v, ArcKind::Tree);
                    let (parent, child) = (self.snapshot.labels[u], self.snapshot.labels[v]);
                    tree.append_valid(parent, child, (), &mut *self.observer);
                    self.discover(v);
                    call_stack.push((v, 0));
                    continue;
                }

                if self.state[v].on_stack {
                    let target_index = self.discovery_index(v);
                    let source = &mut self.state[u];
                    source.low_link = source.low_link.min(target_index);
                }
                let kind = self.classify(u, v);
                self.record(u, v, kind);
            } else {
                call_stack.pop();
                self.finish(u);

                if let Some(&(parent, _)) = call_stack.last() {
                    let child_low = self.state[u].low_link;
                    let parent_state = &mut self.state[parent];
                    parent_state.low_link = parent_state.low_link.min(child_low);
                }
                if self.state[u].low_link == self.discovery_index(u) {
                    self.close_component(u);
                }
            }
        }

        self.forest.trees.push(tree);
    }

    fn discover(&mut self, vertex: usize) {
        let index = self.next_index;
        self.next_index += 1;
        self.state[vertex] = VertexState {
            index: Some(index),
            low_link: index,
            on_stack: true,
            completed: false,
            component: None,
        };
        self.scc_stack.push(vertex);

        let label = self.snapshot.labels[vertex];
        self.observer
            .notify(&TraversalEvent::Discovered { label, index });
    }

    fn finish(&mut self, vertex: usize) {
        self.state[vertex].completed = true;
        let label = self.snapshot.labels[vertex];
        let low_link = self.state[vertex].low_link;
        self.observer
            .notify(&TraversalEvent::Finished { label, low_link });
    }

    fn discovery_index(&self, vertex: usize) -> usize {
        self.state[vertex].index.unwrap_or(usize::MAX)
    }

    /// Classifies a non-tree arc `u -> v` against the tree being built.
    ///
    /// `u` is always still being explored, so an unfinished `v` lies on the
    /// path from the root to `u`, and a finished `v` discovered after `u`
    /// lies below `u`.
    fn classify(&self, u: usize, v: usize) -> ArcKind {
        if u == v {
            return ArcKind::Loop;
        }

        let target = &self.state[v];
        if !target.on_stack {
            // Completed and already assigned to a closed component
            ArcKind::Cross
        } else if !target.completed {
            ArcKind::Back
        } else if self.discovery_index(v) > self.discovery_index(u) {
            ArcKind::Forward
        } else {
            ArcKind::Cross
        }
    }

    /// Breadth-first search inside component `position` for the shortest
    /// walk from `root` back to itself. Empty if there is none.
    fn closed_walk(&self, root: usize, position: usize) -> Vec<usize> {
        let mut parents: HashMap<usize, usize> = HashMap::new();
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for &next in &self.snapshot.edges[current] {
                if self.state[next].component != Some(position) {
                    continue;
                }
                if next == root {
                    let mut walk = vec![current];
                    let mut step = current;
                    while let Some(&parent) = parents.get(&step) {
                        walk.push(parent);
                        step = parent;
                    }
                    walk.reverse();
                    walk.push(root);
                    return walk;
                }
                if !parents.contains_key(&next) {
                    parents.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        Vec::new()
    }

    fn record(&mut self, u: usize, v: usize, kind: ArcKind) {
        let arc = ClassifiedArc::new(self.label(u), self.label(v), kind);
        self.observer.notify(&TraversalEvent::ArcClassified(&arc));
        self.forest.arcs.push(arc);
    }

    /// Pops the component rooted at `root` off the component stack.
    fn close_component(&mut self, root: usize) {
        let position = self.forest.components.len();
        let mut members = Vec::new();

        while let Some(vertex) = self.scc_stack.pop() {
            self.state[vertex].on_stack = false;
            self.state[vertex].component = Some(position);
            let label = self.snapshot.labels[vertex].to_string();
            self.forest.component_index.insert(label.clone(), position);
            members.push(label);
            if vertex == root {
                break;
            }
        }

        let cycle = self
            .closed_walk(root, position)
            .into_iter()
            .map(|vertex| self.snapshot.labels[vertex].to_string())
            .collect();
        let component = Component::new(members, cycle);
        self.observer
            .notify(&TraversalEvent::ComponentClosed(&component));
        self.forest.components.push(component);
    }
}
