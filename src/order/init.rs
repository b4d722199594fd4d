//! Starting orders for the Warfield sweeps.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::LayerOrderingInitializer;
use crate::layered::Segment;
use crate::model::NodeId;

/// Orders each layer by BFS visitation order from segment roots (nodes with
/// no incoming segment). Related nodes end up close to each other across
/// layers, which gives the median heuristic a reasonable starting point.
#[derive(Debug, Default, Clone, Copy)]
pub struct BfsOrderingInitializer;

impl LayerOrderingInitializer for BfsOrderingInitializer {
    fn init(&mut self, segments: &BTreeSet<Segment>, layers: &mut [Vec<NodeId>]) {
        let mut children: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        let mut has_parent: BTreeSet<NodeId> = BTreeSet::new();
        for &(from, to) in segments {
            children.entry(from).or_default().push(to);
            has_parent.insert(to);
        }

        let mut queue: VecDeque<NodeId> = children
            .keys()
            .copied()
            .filter(|n| !has_parent.contains(n))
            .collect();

        let mut visit_order: BTreeMap<NodeId, usize> = BTreeMap::new();
        while let Some(node) = queue.pop_front() {
            if visit_order.contains_key(&node) {
                continue;
            }
            visit_order.insert(node, visit_order.len());
            if let Some(next) = children.get(&node) {
                queue.extend(next.iter().copied());
            }
        }

        // Nodes not touched by any segment keep their relative position at
        // the end of the layer.
        for layer in layers.iter_mut() {
            layer.sort_by_key(|n| visit_order.get(n).copied().unwrap_or(usize::MAX));
        }
    }
}

/// Uniformly shuffles each layer. Seeded so runs are reproducible.
#[derive(Debug, Clone)]
pub struct RandomOrderingInitializer {
    rng: StdRng,
}

impl RandomOrderingInitializer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl LayerOrderingInitializer for RandomOrderingInitializer {
    fn init(&mut self, _segments: &BTreeSet<Segment>, layers: &mut [Vec<NodeId>]) {
        for layer in layers.iter_mut() {
            layer.shuffle(&mut self.rng);
        }
    }
}
