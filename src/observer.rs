//! Injectable observers for tree growth and depth-first traversal.
//!
//! Observers are handed to the operations that emit events for the duration
//! of a single call. Nothing is kept in process-wide state, so two
//! traversals can be observed independently.
//!
//! # Example
//!
//! ```rust
//! use sccscope::graph::Digraph;
//! use sccscope::observer::TraversalEvent;
//!
//! let mut graph: Digraph = Digraph::new();
//! graph.create_node("a", ()).unwrap();
//! graph.create_node("b", ()).unwrap();
//! graph.connect_node("a", "b");
//!
//! let mut discovered = Vec::new();
//! graph.depth_first_forest_with(&mut |event: &TraversalEvent<'_>| {
//!     if let TraversalEvent::Discovered { label, .. } = event {
//!         discovered.push(label.to_string());
//!     }
//! });
//! assert_eq!(discovered, vec!["a", "b"]);
//! ```

use std::io::Write;

use crate::graph::{ClassifiedArc, Component};

/// An event emitted while a tree grows or a forest is traversed.
#[derive(Debug, Clone, Copy)]
pub enum TraversalEvent<'a> {
    /// A new spanning tree was started at `root`
    TreeStarted { root: &'a str },
    /// A vertex was discovered and assigned its discovery index
    Discovered { label: &'a str, index: usize },
    /// An arc was classified relative to the active spanning tree
    ArcClassified(&'a ClassifiedArc),
    /// All outgoing arcs of a vertex were processed
    Finished { label: &'a str, low_link: usize },
    /// A strongly connected component was popped off the stack
    ComponentClosed(&'a Component),
    /// A child was appended under a parent in a rooted tree
    NodeAppended { parent: &'a str, child: &'a str },
}

impl std::fmt::Display for TraversalEvent<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TreeStarted { root } => write!(f, "tree started at {}", root),
            Self::Discovered { label, index } => {
                write!(f, "discovered {} (index {})", label, index)
            }
            Self::ArcClassified(arc) => write!(f, "{} arc {}", arc.kind, arc),
            Self::Finished { label, low_link } => {
                write!(f, "finished {} (low-link {})", label, low_link)
            }
            Self::ComponentClosed(component) => write!(f, "component {{{}}}", component),
            Self::NodeAppended { parent, child } => write!(f, "appended {} -> {}", parent, child),
        }
    }
}

/// Receives traversal events.
pub trait Observer {
    /// Called once per event, in emission order.
    fn notify(&mut self, event: &TraversalEvent<'_>);
}

/// An observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn notify(&mut self, _event: &TraversalEvent<'_>) {}
}

impl<F> Observer for F
where
    F: FnMut(&TraversalEvent<'_>),
{
    fn notify(&mut self, event: &TraversalEvent<'_>) {
        self(event)
    }
}

/// An observer that writes one line per event to a writer.
///
/// Write failures are counted rather than propagated so that a broken sink
/// never aborts a traversal.
#[derive(Debug)]
pub struct WriterObserver<W: Write> {
    writer: W,
    failed_writes: usize,
}

impl<W: Write> WriterObserver<W> {
    /// Creates an observer writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            failed_writes: 0,
        }
    }

    /// Returns how many events could not be written.
    pub fn failed_writes(&self) -> usize {
        self.failed_writes
    }

    /// Consumes the observer and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Observer for WriterObserver<W> {
    fn notify(&mut self, event: &TraversalEvent<'_>) {
        if writeln!(self.writer, "[trace] {}", event).is_err() {
            self.failed_writes += 1;
        }
    }
}
