use crate::model::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations surfaced by the layout core. All of these mean the
/// caller (or a strategy implementation) handed the pipeline a graph that
/// breaks its preconditions; none are recoverable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "segment ({from}, {to}) does not descend one layer: layer {from_layer} -> layer {to_layer}"
    )]
    InvalidLayering {
        from: NodeId,
        to: NodeId,
        from_layer: usize,
        to_layer: usize,
    },

    #[error("edge ({from}, {to}) chain has {len} nodes but at least 2 expected")]
    MalformedEdgeChain {
        from: NodeId,
        to: NodeId,
        len: usize,
    },

    #[error("assigned {assigned} edge paths but the graph has {expected} edges")]
    EdgeMismatch { assigned: usize, expected: usize },
}
