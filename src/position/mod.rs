//! Coordinate assignment for layered graphs.

pub mod bk;
pub use bk::BrandesKopf;

use std::collections::BTreeMap;

use crate::layered::LayeredGraph;
use crate::model::NodeId;

/// Places every layer on a fixed-height row: `y = layer * row_height` for
/// each real and dummy node.
#[derive(Debug, Clone, Copy)]
pub struct RowsVerticalCoordinatesAssigner {
    pub row_height: i64,
}

impl RowsVerticalCoordinatesAssigner {
    pub fn assign(&self, g: &LayeredGraph) -> BTreeMap<NodeId, i64> {
        g.node_position
            .iter()
            .map(|(&node, position)| (node, position.layer as i64 * self.row_height))
            .collect()
    }
}
