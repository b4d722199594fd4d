//! Layer ordering: crossing counting, order initializers, per-layer
//! crossing-minimization heuristics, and the Warfield epoch driver.

mod cross_count;
pub use cross_count::{crossings, crossings_between_layers, FenwickTree};

mod init;
pub use init::{BfsOrderingInitializer, RandomOrderingInitializer};

mod optimize;
pub use optimize::{
    median, CompositeOrderingOptimizer, EmptyMedianPolicy, RandomOrderingOptimizer,
    SwitchAdjacentOrderingOptimizer, WMedianOrderingOptimizer,
};

mod warfield;
pub use warfield::{
    EpochRecord, NoopProgress, OrderingProgress, TracingProgress, WarfieldOrderingOptimizer,
};

use std::collections::BTreeSet;

use crate::layered::Segment;
use crate::model::NodeId;

/// Direction of a Warfield sweep across the layer stack. A `Down` sweep
/// visits layers top-to-bottom and treats the layer above the visited one as
/// fixed; an `Up` sweep visits bottom-to-top and fixes the layer below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Down,
    Up,
}

/// Assigns the starting order within each layer.
pub trait LayerOrderingInitializer {
    fn init(&mut self, segments: &BTreeSet<Segment>, layers: &mut [Vec<NodeId>]);
}

/// Permutes one layer in place to reduce crossings against its fixed
/// neighbor.
pub trait LayerOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<Segment>,
        layers: &mut [Vec<NodeId>],
        idx: usize,
        sweep: Sweep,
    );
}
