//! Crossing counting between adjacent layers with a Fenwick tree.

use std::collections::BTreeSet;

use crate::layered::Segment;
use crate::model::NodeId;

/// Binary indexed tree over 1-based indices.
#[derive(Debug, Clone)]
pub struct FenwickTree(Vec<u64>);

impl FenwickTree {
    pub fn new(len: usize) -> Self {
        Self(vec![0; len + 1])
    }

    pub fn update(&mut self, mut idx: usize, value: u64) {
        while idx < self.0.len() {
            self.0[idx] += value;
            idx += idx & idx.wrapping_neg();
        }
    }

    /// Prefix sum over `1..=idx`.
    pub fn query(&self, mut idx: usize) -> u64 {
        let mut sum = 0;
        while idx > 0 {
            sum += self.0[idx];
            idx -= idx & idx.wrapping_neg();
        }
        sum
    }
}

/// Counts pair-crossings between two ordered layers in
/// `O(|bottom| * |top| * log |top|)`: sweeping both layers right to left,
/// each segment crosses every already-seen segment anchored strictly to its
/// left in the top layer.
pub fn crossings_between_layers(
    segments: &BTreeSet<Segment>,
    top: &[NodeId],
    bottom: &[NodeId],
) -> u64 {
    let mut sum = 0;
    let mut bit = FenwickTree::new(top.len());
    for &node in bottom.iter().rev() {
        for (j, &neighbor) in top.iter().enumerate().rev() {
            if segments.contains(&(neighbor, node)) {
                bit.update(j + 1, 1);
                sum += bit.query(j);
            }
        }
    }
    sum
}

/// Total crossings across all adjacent layer pairs.
pub fn crossings(segments: &BTreeSet<Segment>, layers: &[Vec<NodeId>]) -> u64 {
    layers
        .windows(2)
        .map(|pair| crossings_between_layers(segments, &pair[0], &pair[1]))
        .sum()
}
