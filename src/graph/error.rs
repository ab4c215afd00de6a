//! Error types for graph and tree construction.
//!
//! Lookups by label never fail: an unknown label is always answered with
//! `false`, an empty result or a no-op. The only rejected input is a label
//! that cannot identify a vertex at all.

/// Errors that can occur while building vertices, trees and graphs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A vertex was given an empty label.
    #[error("Empty label rejected by {context}")]
    EmptyLabel {
        /// The operation that rejected the label
        context: &'static str,
    },
}

/// Result type alias for graph construction.
pub type GraphResult<T> = Result<T, GraphError>;

/// Rejects empty labels on behalf of `context`.
pub(crate) fn validate_label(label: &str, context: &'static str) -> GraphResult<()> {
    if label.is_empty() {
        return Err(GraphError::EmptyLabel { context });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_label() {
        assert!(validate_label("A", "test").is_ok());
        assert_eq!(
            validate_label("", "Digraph::create_node"),
            Err(GraphError::EmptyLabel {
                context: "Digraph::create_node"
            })
        );
    }

    #[test]
    fn test_error_message() {
        let err = GraphError::EmptyLabel {
            context: "RootedTree::new",
        };
        assert_eq!(err.to_string(), "Empty label rejected by RootedTree::new");
    }
}
