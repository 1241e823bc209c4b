use thiserror::Error;

/// Input rejected before any flow is computed.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FlowError {
    #[error("node {node} is out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: usize, num_nodes: usize },
    #[error("edge {from} -> {to} has a negative capacity")]
    NegativeCapacity { from: usize, to: usize },
    #[error("source and sink are the same node ({0})")]
    SourceIsSink(usize),
}
