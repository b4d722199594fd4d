//! Edge path assembly.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::layered::LayeredGraph;
use crate::model::{Edge, Graph, Node, NodeId, Position};
use crate::pipeline::GraphLayout;

/// Routes every original edge through the coordinates of its chain nodes, so
/// a long edge bends exactly at its dummy nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightEdgePathAssigner;

impl StraightEdgePathAssigner {
    /// `node_xy` must cover every real and dummy node. Every original edge
    /// must receive a path; a count mismatch is a caller contract violation.
    pub fn assign(
        &self,
        g: &mut Graph,
        lg: &LayeredGraph,
        node_xy: &BTreeMap<NodeId, Position>,
    ) -> Result<()> {
        let mut assigned = 0;
        for (key, chain) in &lg.edges {
            let Some(edge) = g.edges.get_mut(key) else {
                continue;
            };
            edge.path = chain
                .iter()
                .map(|n| node_xy.get(n).copied().unwrap_or_default())
                .collect();
            assigned += 1;
        }

        if assigned != g.edges.len() {
            return Err(Error::EdgeMismatch {
                assigned,
                expected: g.edges.len(),
            });
        }
        Ok(())
    }
}

/// Straight line from the center of one node to the center of another.
pub fn direct_edge(from: Node, to: Node) -> Edge {
    Edge {
        path: vec![from.center(), to.center()],
    }
}

/// Single-line edges between node centers, ignoring any hierarchy.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectEdgesLayout;

impl GraphLayout for DirectEdgesLayout {
    fn update_graph_layout(&mut self, g: &mut Graph) -> Result<()> {
        let Graph { nodes, edges } = g;
        for (&(from, to), edge) in edges.iter_mut() {
            let from_node = nodes.get(&from).copied().unwrap_or_default();
            let to_node = nodes.get(&to).copied().unwrap_or_default();
            *edge = direct_edge(from_node, to_node);
        }
        Ok(())
    }
}
