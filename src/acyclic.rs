//! Break cycles by reversing a feedback arc set, restore them afterwards.
//!
//! The layering phase requires an acyclic input, so the pipeline runs a
//! cycle remover first and undoes its rewrites once coordinates are in
//! place. The strategy is pluggable; the DFS variant mirrors the classic
//! feedback-arc approach used by dagre-style engines.

use std::collections::BTreeSet;

use crate::model::{Edge, Graph, NodeId};

pub trait CycleRemover {
    /// Rewrites `g` so it has no cycles, remembering what changed.
    fn remove_cycles(&mut self, g: &mut Graph);
    /// Undoes the rewrites, keeping any computed paths (reversed back into
    /// original orientation).
    fn restore(&mut self, g: &mut Graph);
}

/// For inputs already known to be acyclic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCycleRemover;

impl CycleRemover for NoopCycleRemover {
    fn remove_cycles(&mut self, _g: &mut Graph) {}
    fn restore(&mut self, _g: &mut Graph) {}
}

/// Reverses the back edges found by a depth-first traversal. Self-loops are
/// taken out entirely for the duration of the layout. A back edge whose
/// opposite edge already exists cannot be reversed in place (the graph holds
/// one edge per ordered pair), so it is dropped and reinstated on restore
/// with the opposite edge's path reversed.
#[derive(Debug, Default)]
pub struct DfsCycleRemover {
    reversed: Vec<(NodeId, NodeId)>,
    dropped: Vec<(NodeId, NodeId)>,
    self_loops: Vec<(NodeId, Edge)>,
}

impl CycleRemover for DfsCycleRemover {
    fn remove_cycles(&mut self, g: &mut Graph) {
        let loops: Vec<NodeId> = g
            .edges
            .keys()
            .filter(|&&(from, to)| from == to)
            .map(|&(from, _)| from)
            .collect();
        for n in loops {
            if let Some(edge) = g.edges.remove(&(n, n)) {
                self.self_loops.push((n, edge));
            }
        }

        for (from, to) in dfs_feedback_arcs(g) {
            if g.edges.contains_key(&(to, from)) {
                if g.edges.remove(&(from, to)).is_some() {
                    self.dropped.push((from, to));
                }
            } else if let Some(edge) = g.edges.remove(&(from, to)) {
                g.edges.insert((to, from), edge);
                self.reversed.push((from, to));
            }
        }
    }

    fn restore(&mut self, g: &mut Graph) {
        for (from, to) in self.reversed.drain(..) {
            if let Some(mut edge) = g.edges.remove(&(to, from)) {
                edge.path.reverse();
                g.edges.insert((from, to), edge);
            }
        }
        for (from, to) in self.dropped.drain(..) {
            let mut edge = g.edges.get(&(to, from)).cloned().unwrap_or_default();
            edge.path.reverse();
            g.edges.insert((from, to), edge);
        }
        for (n, edge) in self.self_loops.drain(..) {
            g.edges.insert((n, n), edge);
        }
    }
}

fn dfs_feedback_arcs(g: &Graph) -> Vec<(NodeId, NodeId)> {
    let mut fas: Vec<(NodeId, NodeId)> = Vec::new();
    let mut visited: BTreeSet<NodeId> = BTreeSet::new();
    let mut stack: BTreeSet<NodeId> = BTreeSet::new();

    fn dfs(
        g: &Graph,
        v: NodeId,
        visited: &mut BTreeSet<NodeId>,
        stack: &mut BTreeSet<NodeId>,
        fas: &mut Vec<(NodeId, NodeId)>,
    ) {
        if !visited.insert(v) {
            return;
        }
        stack.insert(v);
        for (&(_, w), _) in g.edges.range((v, NodeId::MIN)..=(v, NodeId::MAX)) {
            if w == v {
                continue;
            }
            if stack.contains(&w) {
                fas.push((v, w));
            } else {
                dfs(g, w, visited, stack, fas);
            }
        }
        stack.remove(&v);
    }

    for &v in g.nodes.keys() {
        dfs(g, v, &mut visited, &mut stack, &mut fas);
    }
    fas
}
