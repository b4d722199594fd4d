//! Per-layer crossing-minimization heuristics.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::cross_count::crossings_between_layers;
use super::{LayerOrderingOptimizer, Sweep};
use crate::layered::Segment;
use crate::model::NodeId;

/// What weight a node with no neighbors in the fixed layer gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyMedianPolicy {
    /// Weight -1: unanchored nodes sort to the far left.
    #[default]
    FarLeft,
    /// Weight equal to the node's current index, so the stable sort keeps it
    /// where it is.
    Hold,
}

/// Sorts a layer by the median position of each node's neighbors in the
/// fixed layer (Eades and Wormald, 1994). The median keeps long dummy
/// chains vertically stable, which is what makes split edges straight.
#[derive(Debug, Clone, Copy, Default)]
pub struct WMedianOrderingOptimizer {
    pub empty_median: EmptyMedianPolicy,
}

impl LayerOrderingOptimizer for WMedianOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<Segment>,
        layers: &mut [Vec<NodeId>],
        idx: usize,
        sweep: Sweep,
    ) {
        let mut weights: BTreeMap<NodeId, f64> = BTreeMap::new();
        for (i, &node) in layers[idx].iter().enumerate() {
            let positions = match sweep {
                Sweep::Down => upper_neighbor_positions(segments, layers, i, idx),
                Sweep::Up => lower_neighbor_positions(segments, layers, i, idx),
            };
            let weight = if positions.is_empty() && self.empty_median == EmptyMedianPolicy::Hold {
                i as f64
            } else {
                median(&positions)
            };
            weights.insert(node, weight);
        }

        layers[idx].sort_by(|a, b| {
            let wa = weights.get(a).copied().unwrap_or(-1.0);
            let wb = weights.get(b).copied().unwrap_or(-1.0);
            wa.partial_cmp(&wb).unwrap_or(Ordering::Equal)
        });
    }
}

/// Median weight of a sorted list of neighbor positions:
/// interpolated toward the side with the longer spread for even sizes.
pub fn median(positions: &[f64]) -> f64 {
    let m = positions.len() / 2;
    match positions.len() {
        0 => -1.0,
        n if n % 2 == 1 => positions[m],
        2 => (positions[0] + positions[1]) / 2.0,
        n => {
            let left = positions[m - 1] - positions[0];
            let right = positions[n - 1] - positions[m];
            (positions[m - 1] * right + positions[m] * left) / (left + right)
        }
    }
}

fn upper_neighbor_positions(
    segments: &BTreeSet<Segment>,
    layers: &[Vec<NodeId>],
    x: usize,
    y: usize,
) -> Vec<f64> {
    if y == 0 {
        return Vec::new();
    }
    let node = layers[y][x];
    layers[y - 1]
        .iter()
        .enumerate()
        .filter(|&(_, &n)| segments.contains(&(n, node)))
        .map(|(i, _)| i as f64)
        .collect()
}

fn lower_neighbor_positions(
    segments: &BTreeSet<Segment>,
    layers: &[Vec<NodeId>],
    x: usize,
    y: usize,
) -> Vec<f64> {
    if y == layers.len() - 1 {
        return Vec::new();
    }
    let node = layers[y][x];
    layers[y + 1]
        .iter()
        .enumerate()
        .filter(|&(_, &n)| segments.contains(&(node, n)))
        .map(|(i, _)| i as f64)
        .collect()
}

/// One left-to-right pass that swaps adjacent nodes whenever the swap
/// strictly reduces crossings against the fixed neighbor layer. The
/// "transpose" refinement from the Graphviz dot paper.
#[derive(Debug, Default, Clone, Copy)]
pub struct SwitchAdjacentOrderingOptimizer;

impl LayerOrderingOptimizer for SwitchAdjacentOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<Segment>,
        layers: &mut [Vec<NodeId>],
        idx: usize,
        sweep: Sweep,
    ) {
        if layers[idx].len() < 2 {
            return;
        }
        // Nothing fixed to compare against at the boundary.
        match sweep {
            Sweep::Down if idx == 0 => return,
            Sweep::Up if idx == layers.len() - 1 => return,
            _ => {}
        }

        for i in 0..layers[idx].len() - 1 {
            let current = [layers[idx][i], layers[idx][i + 1]];
            let swapped = [current[1], current[0]];

            let (current_crossings, swapped_crossings) = match sweep {
                Sweep::Down => (
                    crossings_between_layers(segments, &layers[idx - 1], &current),
                    crossings_between_layers(segments, &layers[idx - 1], &swapped),
                ),
                Sweep::Up => (
                    crossings_between_layers(segments, &current, &layers[idx + 1]),
                    crossings_between_layers(segments, &swapped, &layers[idx + 1]),
                ),
            };

            if swapped_crossings < current_crossings {
                layers[idx].swap(i, i + 1);
            }
        }
    }
}

/// Applies a fixed sequence of optimizers for each (layer, direction) call.
#[derive(Default)]
pub struct CompositeOrderingOptimizer {
    pub optimizers: Vec<Box<dyn LayerOrderingOptimizer>>,
}

impl LayerOrderingOptimizer for CompositeOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<Segment>,
        layers: &mut [Vec<NodeId>],
        idx: usize,
        sweep: Sweep,
    ) {
        for optimizer in &mut self.optimizers {
            optimizer.optimize(segments, layers, idx, sweep);
        }
    }
}

/// Shuffles the layer `epochs` times and keeps the permutation with the
/// fewest crossings against both neighbor layers. The current order counts
/// as a candidate, so the layer never gets worse.
#[derive(Debug, Clone)]
pub struct RandomOrderingOptimizer {
    pub epochs: usize,
    rng: StdRng,
}

impl RandomOrderingOptimizer {
    pub fn new(epochs: usize, seed: u64) -> Self {
        Self {
            epochs,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl LayerOrderingOptimizer for RandomOrderingOptimizer {
    fn optimize(
        &mut self,
        segments: &BTreeSet<Segment>,
        layers: &mut [Vec<NodeId>],
        idx: usize,
        _sweep: Sweep,
    ) {
        let mut best = layers[idx].clone();
        let mut best_crossings = neighbor_crossings(segments, layers, idx, &best);

        let mut candidate = best.clone();
        for _ in 0..self.epochs {
            candidate.shuffle(&mut self.rng);
            let n = neighbor_crossings(segments, layers, idx, &candidate);
            if n < best_crossings {
                best_crossings = n;
                best.copy_from_slice(&candidate);
            }
        }

        layers[idx].copy_from_slice(&best);
    }
}

fn neighbor_crossings(
    segments: &BTreeSet<Segment>,
    layers: &[Vec<NodeId>],
    idx: usize,
    candidate: &[NodeId],
) -> u64 {
    let mut n = 0;
    if idx > 0 {
        n += crossings_between_layers(segments, &layers[idx - 1], candidate);
    }
    if idx + 1 < layers.len() {
        n += crossings_between_layers(segments, candidate, &layers[idx + 1]);
    }
    n
}
