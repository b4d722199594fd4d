//! Layered graph: the proper hierarchy every Sugiyama phase operates on.
//!
//! After normalization there are no long edges left: every segment connects
//! nodes on consecutive layers, and each original edge is represented by a
//! chain of real and dummy nodes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Error, Result};
use crate::model::NodeId;

/// A node's slot in the hierarchy. Layer 0 is the top; `order` is the
/// 0-based rank within the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct LayerPosition {
    pub layer: usize,
    pub order: usize,
}

impl LayerPosition {
    /// Comparable only within one layer.
    pub fn is_left_of(&self, other: &LayerPosition) -> bool {
        debug_assert_eq!(self.layer, other.layer, "positions not on the same layer");
        self.order < other.order
    }
}

/// An edge of the layered graph, always between consecutive layers.
pub type Segment = (NodeId, NodeId);

/// A directed graph with dummy nodes inserted so that no edge spans more
/// than one layer.
#[derive(Debug, Clone, Default)]
pub struct LayeredGraph {
    /// Slot of every real and dummy node.
    pub node_position: BTreeMap<NodeId, LayerPosition>,
    /// Unit-length edges, both real and pieces of split long edges.
    pub segments: BTreeSet<Segment>,
    /// Synthetically inserted nodes.
    pub dummy: BTreeSet<NodeId>,
    /// Original edge -> the chain of nodes realizing it,
    /// `[src, d1, .., dn, dst]`.
    pub edges: BTreeMap<(NodeId, NodeId), Vec<NodeId>>,
}

impl LayeredGraph {
    /// Materializes the layer matrix, each layer sorted by `order`
    /// (ties broken by node id).
    pub fn layers(&self) -> Vec<Vec<NodeId>> {
        let Some(max_layer) = self.node_position.values().map(|p| p.layer).max() else {
            return Vec::new();
        };

        let mut layers: Vec<Vec<NodeId>> = vec![Vec::new(); max_layer + 1];
        for (&node, position) in &self.node_position {
            layers[position.layer].push(node);
        }
        for layer in &mut layers {
            layer.sort_by_key(|n| self.position(*n).order);
        }
        layers
    }

    pub fn position(&self, node: NodeId) -> LayerPosition {
        self.node_position.get(&node).copied().unwrap_or_default()
    }

    /// Checks the construction contract: every segment descends exactly one
    /// layer and every edge chain has both endpoints.
    pub fn validate(&self) -> Result<()> {
        for &(from, to) in &self.segments {
            let from_layer = self.position(from).layer;
            let to_layer = self.position(to).layer;
            if to_layer != from_layer + 1 {
                return Err(Error::InvalidLayering {
                    from,
                    to,
                    from_layer,
                    to_layer,
                });
            }
        }
        for (&(from, to), chain) in &self.edges {
            if chain.len() < 2 {
                return Err(Error::MalformedEdgeChain {
                    from,
                    to,
                    len: chain.len(),
                });
            }
        }
        Ok(())
    }

    /// A segment between two dummy nodes, i.e. an interior piece of a long
    /// edge.
    pub fn is_inner_segment(&self, segment: Segment) -> bool {
        self.dummy.contains(&segment.0) && self.dummy.contains(&segment.1)
    }

    /// Nodes in the layer above connected to the given node.
    pub fn upper_neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.segments
            .iter()
            .filter(|&&(from, to)| {
                to == node && self.position(from).layer + 1 == self.position(to).layer
            })
            .map(|&(from, _)| from)
            .collect()
    }

    /// Nodes in the layer below connected to the given node.
    pub fn lower_neighbors(&self, node: NodeId) -> Vec<NodeId> {
        self.segments
            .iter()
            .filter(|&&(from, to)| {
                from == node && self.position(from).layer + 1 == self.position(to).layer
            })
            .map(|&(_, to)| to)
            .collect()
    }
}

impl fmt::Display for LayeredGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dummy nodes: {:?}", self.dummy)?;

        let segments: Vec<String> = self
            .segments
            .iter()
            .map(|(from, to)| format!("{from}->{to}"))
            .collect();
        writeln!(f, "segments: {}", segments.join(" "))?;

        for (layer, nodes) in self.layers().iter().enumerate() {
            let ids: Vec<String> = nodes.iter().map(|n| n.to_string()).collect();
            writeln!(f, "{layer}: {}", ids.join(" "))?;
        }
        Ok(())
    }
}
