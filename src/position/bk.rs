//! Brandes-Kopf horizontal coordinate assignment.
//!
//! "Fast and Simple Horizontal Coordinate Assignment" (Brandes and Kopf,
//! 2002) with the class-offset pass from the 2020 erratum. Given a layered
//! graph with final orders, produces an x coordinate per node such that
//! order-adjacent nodes sit at least `delta` apart and long dummy chains
//! come out as straight vertical lines. Nodes are treated as width-less;
//! the caller re-centers rectangles afterwards.
//!
//! The four directional variants share one alignment and one compaction
//! routine, parameterized by `{Top, Bottom} x {Left, Right}` primitives.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use crate::layered::{LayeredGraph, Segment};
use crate::model::NodeId;

/// Segments that vertical alignment must not cross: every non-inner segment
/// that crosses an inner one.
pub type Conflicts = BTreeSet<Segment>;

/// Per-node neighbor lists in the adjacent layers, sorted by order.
#[derive(Debug, Default)]
pub struct Neighbors {
    pub up: FxHashMap<NodeId, Vec<NodeId>>,
    pub down: FxHashMap<NodeId, Vec<NodeId>>,
}

pub fn ordered_neighbors(g: &LayeredGraph) -> Neighbors {
    let mut neighbors = Neighbors::default();
    for &(from, to) in &g.segments {
        neighbors.down.entry(from).or_default().push(to);
        neighbors.up.entry(to).or_default().push(from);
    }
    for list in neighbors.down.values_mut() {
        list.sort_by_key(|&n| g.position(n).order);
    }
    for list in neighbors.up.values_mut() {
        list.sort_by_key(|&n| g.position(n).order);
    }
    neighbors
}

/// Alg 1: marks type-1 conflicts. Sweeps each pair of adjacent layers left
/// to right across the lower layer, tracking the span `[k0, k1]` of upper
/// orders between the two closest inner segments; any segment reaching
/// outside the span crosses an inner segment and is marked.
pub fn mark_type1_conflicts(
    g: &LayeredGraph,
    layers: &[Vec<NodeId>],
    neighbors: &Neighbors,
) -> Conflicts {
    let mut marked = Conflicts::new();

    for i in 0..layers.len().saturating_sub(1) {
        let next_layer = &layers[i + 1];

        let mut k0: usize = 0;
        let mut l: usize = 0;

        for (l1, &v) in next_layer.iter().enumerate() {
            let inner_upper = neighbors
                .up
                .get(&v)
                .and_then(|ups| ups.iter().copied().find(|&u| g.is_inner_segment((u, v))));

            if l1 == next_layer.len() - 1 || inner_upper.is_some() {
                let k1 = match inner_upper {
                    Some(u) => g.position(u).order,
                    None => layers[i].len().saturating_sub(1),
                };
                while l <= l1 {
                    let scan = next_layer[l];
                    for &u in neighbors.up.get(&scan).map(Vec::as_slice).unwrap_or(&[]) {
                        let k = g.position(u).order;
                        if (k < k0 || k > k1) && !g.is_inner_segment((u, scan)) {
                            marked.insert((u, scan));
                        }
                    }
                    l += 1;
                }
                k0 = k1;
            }
        }
    }

    marked
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

/// One of the four directional runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl Direction {
    pub const TOP_LEFT: Direction = Direction {
        vertical: Vertical::Top,
        horizontal: Horizontal::Left,
    };
    pub const TOP_RIGHT: Direction = Direction {
        vertical: Vertical::Top,
        horizontal: Horizontal::Right,
    };
    pub const BOTTOM_LEFT: Direction = Direction {
        vertical: Vertical::Bottom,
        horizontal: Horizontal::Left,
    };
    pub const BOTTOM_RIGHT: Direction = Direction {
        vertical: Vertical::Bottom,
        horizontal: Horizontal::Right,
    };

    /// Combination order; also the tie-break order when several runs are
    /// equally narrow.
    pub const ALL: [Direction; 4] = [
        Direction::TOP_LEFT,
        Direction::TOP_RIGHT,
        Direction::BOTTOM_LEFT,
        Direction::BOTTOM_RIGHT,
    ];

    fn layer_indices(&self, count: usize) -> Vec<usize> {
        match self.vertical {
            Vertical::Top => (0..count).collect(),
            Vertical::Bottom => (0..count).rev().collect(),
        }
    }

    fn node_indices(&self, count: usize) -> Vec<usize> {
        match self.horizontal {
            Horizontal::Left => (0..count).collect(),
            Horizontal::Right => (0..count).rev().collect(),
        }
    }

    /// The conflict set stores segments in graph orientation (upper, lower).
    fn segment(&self, v: NodeId, neighbor: NodeId) -> Segment {
        match self.vertical {
            Vertical::Top => (neighbor, v),
            Vertical::Bottom => (v, neighbor),
        }
    }

    fn shift_sentinel(&self) -> i64 {
        match self.horizontal {
            Horizontal::Left => i64::MAX,
            Horizontal::Right => i64::MIN,
        }
    }
}

/// Block structure produced by vertical alignment: `align` is the cyclic
/// next-in-block link, `root` points at the block's root under the direction
/// in use.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub root: FxHashMap<NodeId, NodeId>,
    pub align: FxHashMap<NodeId, NodeId>,
}

/// Alg 2: aligns each node with one median neighbor in the predecessor
/// layer, as long as the segment is not a marked conflict and the alignment
/// does not cross the previously accepted one.
pub fn vertical_alignment(
    g: &LayeredGraph,
    layers: &[Vec<NodeId>],
    conflicts: &Conflicts,
    neighbors: &Neighbors,
    dir: Direction,
) -> Alignment {
    let mut root: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut align: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    for &v in g.node_position.keys() {
        root.insert(v, v);
        align.insert(v, v);
    }

    for &i in &dir.layer_indices(layers.len()) {
        let mut r: i64 = match dir.horizontal {
            Horizontal::Left => -1,
            Horizontal::Right => i64::MAX,
        };
        for &j in &dir.node_indices(layers[i].len()) {
            let v = layers[i][j];
            let list = match dir.vertical {
                Vertical::Top => neighbors.up.get(&v),
                Vertical::Bottom => neighbors.down.get(&v),
            };
            let Some(list) = list else { continue };
            let d = list.len();
            if d == 0 {
                continue;
            }

            // Median candidates: lower and upper median, tried in traversal
            // order.
            let lo = (d - 1) / 2;
            let hi = ((d + 1) / 2).min(d - 1);
            let candidates: Vec<usize> = match dir.horizontal {
                Horizontal::Left => (lo..=hi).collect(),
                Horizontal::Right => (lo..=hi).rev().collect(),
            };

            for m in candidates {
                if align.get(&v) != Some(&v) {
                    break;
                }
                let u = list[m];
                let u_order = g.position(u).order as i64;
                let beyond = match dir.horizontal {
                    Horizontal::Left => r < u_order,
                    Horizontal::Right => r > u_order,
                };
                if beyond && !conflicts.contains(&dir.segment(v, u)) {
                    align.insert(u, v);
                    let u_root = root.get(&u).copied().unwrap_or(u);
                    root.insert(v, u_root);
                    align.insert(v, u_root);
                    r = u_order;
                }
            }
        }
    }

    Alignment { root, align }
}

/// Alg 3: assigns every block the coordinate of its root, packing blocks of
/// the same class with at least `delta` separation and then shifting whole
/// classes relative to their sinks.
pub fn horizontal_compaction(
    g: &LayeredGraph,
    layers: &[Vec<NodeId>],
    alignment: &Alignment,
    delta: i64,
    dir: Direction,
) -> FxHashMap<NodeId, i64> {
    let sentinel = dir.shift_sentinel();
    let mut sink: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut shift: FxHashMap<NodeId, i64> = FxHashMap::default();
    let mut x: FxHashMap<NodeId, i64> = FxHashMap::default();
    for &v in g.node_position.keys() {
        sink.insert(v, v);
        shift.insert(v, sentinel);
    }

    // Root coordinates relative to sinks.
    for &v in g.node_position.keys() {
        if alignment.root.get(&v) == Some(&v) {
            place_block(
                g, layers, alignment, &mut sink, &mut shift, &mut x, delta, v, dir,
            );
        }
    }

    class_offsets(g, layers, alignment, &sink, &mut shift, &x, delta, dir);

    // Absolute coordinates.
    for (&v, value) in x.iter_mut() {
        let class_shift = sink
            .get(&v)
            .and_then(|s| shift.get(s))
            .copied()
            .unwrap_or(sentinel);
        if class_shift != sentinel {
            *value += class_shift;
        }
    }

    x
}

/// Places one block and, transitively, every block it is packed against.
/// Runs on an explicit stack: a frame `(v, w)` resumes the cyclic walk of
/// `v`'s block at `w` once the predecessor block pushed above it is placed.
#[allow(clippy::too_many_arguments)]
fn place_block(
    g: &LayeredGraph,
    layers: &[Vec<NodeId>],
    alignment: &Alignment,
    sink: &mut FxHashMap<NodeId, NodeId>,
    shift: &mut FxHashMap<NodeId, i64>,
    x: &mut FxHashMap<NodeId, i64>,
    delta: i64,
    v0: NodeId,
    dir: Direction,
) {
    if x.contains_key(&v0) {
        return;
    }
    x.insert(v0, 0);
    let sentinel = dir.shift_sentinel();

    let mut frames: Vec<(NodeId, NodeId)> = vec![(v0, v0)];
    'frames: while let Some((v, start)) = frames.pop() {
        let mut w = start;
        loop {
            let pos = g.position(w);
            let pred = match dir.horizontal {
                Horizontal::Left => (pos.order > 0).then(|| layers[pos.layer][pos.order - 1]),
                Horizontal::Right => (pos.order + 1 < layers[pos.layer].len())
                    .then(|| layers[pos.layer][pos.order + 1]),
            };

            if let Some(p) = pred {
                let u = alignment.root.get(&p).copied().unwrap_or(p);
                if !x.contains_key(&u) {
                    // Place the predecessor block first, then resume here.
                    frames.push((v, w));
                    x.insert(u, 0);
                    frames.push((u, u));
                    continue 'frames;
                }

                let sink_v = sink.get(&v).copied().unwrap_or(v);
                let sink_u = sink.get(&u).copied().unwrap_or(u);
                if sink_v == v {
                    sink.insert(v, sink_u);
                }
                let sink_v = sink.get(&v).copied().unwrap_or(v);

                let x_u = x.get(&u).copied().unwrap_or(0);
                let x_v = x.get(&v).copied().unwrap_or(0);
                if sink_v != sink_u {
                    let current = shift.get(&sink_u).copied().unwrap_or(sentinel);
                    match dir.horizontal {
                        Horizontal::Left => {
                            let s = x_v - x_u - delta;
                            if s < current {
                                shift.insert(sink_u, s);
                            }
                        }
                        Horizontal::Right => {
                            let s = x_v + x_u + delta;
                            if s > current {
                                shift.insert(sink_u, s);
                            }
                        }
                    }
                } else {
                    match dir.horizontal {
                        Horizontal::Left => {
                            let s = x_u + delta;
                            if s > x_v {
                                x.insert(v, s);
                            }
                        }
                        Horizontal::Right => {
                            let s = x_u - delta;
                            if s < x_v {
                                x.insert(v, s);
                            }
                        }
                    }
                }
            }

            w = alignment.align.get(&w).copied().unwrap_or(w);
            if w == v {
                break;
            }
        }

        // Propagate the root's coordinate and sink through the block.
        let x_v = x.get(&v).copied().unwrap_or(0);
        let sink_v = sink.get(&v).copied().unwrap_or(v);
        let mut w = alignment.align.get(&v).copied().unwrap_or(v);
        while w != v {
            x.insert(w, x_v);
            sink.insert(w, sink_v);
            w = alignment.align.get(&w).copied().unwrap_or(w);
        }
    }
}

/// Erratum pass: walks each class from its sink's defining corner and
/// records how far the class may shift toward its neighbor classes.
#[allow(clippy::too_many_arguments)]
fn class_offsets(
    g: &LayeredGraph,
    layers: &[Vec<NodeId>],
    alignment: &Alignment,
    sink: &FxHashMap<NodeId, NodeId>,
    shift: &mut FxHashMap<NodeId, i64>,
    x: &FxHashMap<NodeId, i64>,
    delta: i64,
    dir: Direction,
) {
    let sentinel = dir.shift_sentinel();

    for &i in &dir.layer_indices(layers.len()) {
        let layer = &layers[i];
        if layer.is_empty() {
            continue;
        }
        let vfirst = match dir.horizontal {
            Horizontal::Left => layer[0],
            Horizontal::Right => layer[layer.len() - 1],
        };
        if sink.get(&vfirst) != Some(&vfirst) {
            continue;
        }
        if shift.get(&vfirst) == Some(&sentinel) {
            shift.insert(vfirst, 0);
        }

        let mut j = i as i64;
        let mut k: i64 = match dir.horizontal {
            Horizontal::Left => 0,
            Horizontal::Right => layer.len() as i64 - 1,
        };
        loop {
            let Some(row) = layers.get(j as usize) else {
                break;
            };
            if k < 0 || k as usize >= row.len() {
                break;
            }
            let mut v = row[k as usize];

            while alignment.align.get(&v) != alignment.root.get(&v) {
                v = alignment.align.get(&v).copied().unwrap_or(v);
                j += match dir.vertical {
                    Vertical::Top => 1,
                    Vertical::Bottom => -1,
                };

                let pos = g.position(v);
                let sink_v = sink.get(&v).copied().unwrap_or(v);
                let x_v = x.get(&v).copied().unwrap_or(0);
                match dir.horizontal {
                    Horizontal::Left => {
                        if pos.order > 0 {
                            let u = layers[pos.layer][pos.order - 1];
                            let sink_u = sink.get(&u).copied().unwrap_or(u);
                            let x_u = x.get(&u).copied().unwrap_or(0);
                            let shifted =
                                shift.get(&sink_v).copied().unwrap_or(0) + x_v - (x_u + delta);
                            if shifted < shift.get(&sink_u).copied().unwrap_or(sentinel) {
                                shift.insert(sink_u, shifted);
                            }
                        }
                    }
                    Horizontal::Right => {
                        if pos.order + 1 < layers[pos.layer].len() {
                            let u = layers[pos.layer][pos.order + 1];
                            let sink_u = sink.get(&u).copied().unwrap_or(u);
                            let x_u = x.get(&u).copied().unwrap_or(0);
                            let shifted =
                                shift.get(&sink_v).copied().unwrap_or(0) + x_v - (x_u - delta);
                            if shifted > shift.get(&sink_u).copied().unwrap_or(sentinel) {
                                shift.insert(sink_u, shifted);
                            }
                        }
                    }
                }
            }

            k = match dir.horizontal {
                Horizontal::Left => g.position(v).order as i64 + 1,
                Horizontal::Right => g.position(v).order as i64 - 1,
            };

            let Some(row) = layers.get(j as usize) else {
                break;
            };
            if k < 0 || k as usize >= row.len() {
                break;
            }
            let next = row[k as usize];
            if sink.get(&v) != sink.get(&next) {
                break;
            }
        }
    }
}

#[derive(Debug, Clone)]
struct LayoutResult {
    x: FxHashMap<NodeId, i64>,
    min_x: i64,
    max_x: i64,
}

impl LayoutResult {
    fn width(&self) -> i64 {
        self.max_x - self.min_x
    }
}

/// Horizontal coordinate assigner. `delta` is the minimum separation
/// between order-adjacent nodes within a layer; `top_down_only` skips the
/// two bottom-up runs and reuses the top-down results (better for trees).
#[derive(Debug, Clone, Copy)]
pub struct BrandesKopf {
    pub delta: i64,
    pub top_down_only: bool,
}

impl Default for BrandesKopf {
    fn default() -> Self {
        Self {
            delta: 1,
            top_down_only: false,
        }
    }
}

impl BrandesKopf {
    /// Pure function of the layered graph: computes x for every real and
    /// dummy node. Each of the four directional runs yields a candidate
    /// layout; the runs are aligned to the narrowest one and each node takes
    /// the mean of its two middle candidates.
    pub fn assign(&self, g: &LayeredGraph) -> BTreeMap<NodeId, i64> {
        let layers = g.layers();
        let neighbors = ordered_neighbors(g);
        let conflicts = mark_type1_conflicts(g, &layers, &neighbors);

        let run = |dir: Direction| -> LayoutResult {
            let alignment = vertical_alignment(g, &layers, &conflicts, &neighbors, dir);
            let x = horizontal_compaction(g, &layers, &alignment, self.delta, dir);
            let mut min_x = i64::MAX;
            let mut max_x = i64::MIN;
            for &value in x.values() {
                min_x = min_x.min(value);
                max_x = max_x.max(value);
            }
            if x.is_empty() {
                min_x = 0;
                max_x = 0;
            }
            LayoutResult { x, min_x, max_x }
        };

        let tl = run(Direction::TOP_LEFT);
        let tr = run(Direction::TOP_RIGHT);
        let (bl, br) = if self.top_down_only {
            (tl.clone(), tr.clone())
        } else {
            (run(Direction::BOTTOM_LEFT), run(Direction::BOTTOM_RIGHT))
        };
        let results = [tl, tr, bl, br];

        let mut best = 0;
        for i in 1..results.len() {
            if results[i].width() < results[best].width() {
                best = i;
            }
        }

        let mut shifts = [0i64; 4];
        for (i, (dir, result)) in Direction::ALL.iter().zip(&results).enumerate() {
            shifts[i] = match dir.horizontal {
                Horizontal::Left => results[best].min_x - result.min_x,
                Horizontal::Right => results[best].max_x - result.max_x,
            };
        }

        let mut out = BTreeMap::new();
        for &v in g.node_position.keys() {
            let mut place = [0i64; 4];
            for i in 0..4 {
                place[i] = results[i].x.get(&v).copied().unwrap_or(0) + shifts[i];
            }
            place.sort_unstable();
            out.insert(v, (place[1] + place[2]) / 2);
        }
        out
    }
}
