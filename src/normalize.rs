//! Build a layered graph from an acyclic graph: longest-path layering plus
//! dummy-node chains for long edges.

use std::collections::{BTreeMap, VecDeque};

use crate::error::{Error, Result};
use crate::layered::{LayerPosition, LayeredGraph};
use crate::model::{Graph, NodeId};

/// Assigns every node to a layer, then splits each long edge into a chain of
/// unit-length segments by inserting one dummy node per intermediate layer.
///
/// The input must be acyclic; layering starts from the nodes with no
/// incoming edge. An edge whose target does not end up strictly below its
/// source is a caller contract violation.
pub fn build_layered_graph(g: &Graph) -> Result<LayeredGraph> {
    let mut node_position = assign_layers(g);
    let edges = split_edges(g, &mut node_position)?;

    let mut lg = LayeredGraph {
        node_position,
        edges,
        ..Default::default()
    };
    for chain in lg.edges.values() {
        for pair in chain.windows(2) {
            lg.segments.insert((pair[0], pair[1]));
        }
        for &node in &chain[1..chain.len() - 1] {
            lg.dummy.insert(node);
        }
    }
    Ok(lg)
}

/// Longest-path layering: breadth-first relaxation from the roots, a child
/// always taking the maximum layer seen. `order` stays 0 until the ordering
/// phase.
fn assign_layers(g: &Graph) -> BTreeMap<NodeId, LayerPosition> {
    let mut positions: BTreeMap<NodeId, LayerPosition> = g
        .nodes
        .keys()
        .map(|&n| (n, LayerPosition::default()))
        .collect();

    let mut children: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for &(from, to) in g.edges.keys() {
        children.entry(from).or_default().push(to);
    }

    for root in g.roots() {
        let mut queue = VecDeque::from([root]);
        while let Some(parent) = queue.pop_front() {
            let next = positions.get(&parent).map(|p| p.layer).unwrap_or(0) + 1;
            for &child in children.get(&parent).map(Vec::as_slice).unwrap_or(&[]) {
                let current = positions.entry(child).or_default();
                if next > current.layer {
                    current.layer = next;
                }
                queue.push_back(child);
            }
        }
    }

    positions
}

/// Breaks every long edge into a chain through fresh dummy nodes, numbered
/// from `max(real id) + 1` upward. Short edges record the two-node chain
/// directly.
fn split_edges(
    g: &Graph,
    positions: &mut BTreeMap<NodeId, LayerPosition>,
) -> Result<BTreeMap<(NodeId, NodeId), Vec<NodeId>>> {
    let mut next_dummy = g.nodes.keys().max().copied().unwrap_or(0) + 1;

    let mut edges: BTreeMap<(NodeId, NodeId), Vec<NodeId>> = BTreeMap::new();
    for &(from, to) in g.edges.keys() {
        let from_layer = positions.get(&from).map(|p| p.layer).unwrap_or(0);
        let to_layer = positions.get(&to).map(|p| p.layer).unwrap_or(0);
        if to_layer <= from_layer {
            return Err(Error::InvalidLayering {
                from,
                to,
                from_layer,
                to_layer,
            });
        }

        let mut chain = Vec::with_capacity(2 + to_layer - from_layer - 1);
        chain.push(from);
        for layer in from_layer + 1..to_layer {
            positions.insert(next_dummy, LayerPosition { layer, order: 0 });
            chain.push(next_dummy);
            next_dummy += 1;
        }
        chain.push(to);

        edges.insert((from, to), chain);
    }

    Ok(edges)
}
