//! Warfield-style epoch driver: alternating down/up sweeps with a
//! best-so-far layering tracker. Used by Graphviz dot.

use super::{crossings, LayerOrderingInitializer, LayerOrderingOptimizer, Sweep};
use crate::layered::{LayerPosition, LayeredGraph};
use crate::model::NodeId;

/// Crossing counts after one ordering epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochRecord {
    pub epoch: usize,
    pub best_crossings: u64,
    pub current_crossings: u64,
}

/// Receives one record per epoch. Injected so callers can observe progress,
/// redirect it, or drop it.
pub trait OrderingProgress {
    fn epoch(&mut self, record: EpochRecord);
}

/// Emits per-epoch records at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl OrderingProgress for TracingProgress {
    fn epoch(&mut self, record: EpochRecord) {
        tracing::debug!(
            target: "stratum::order",
            epoch = record.epoch,
            best = record.best_crossings,
            current = record.current_crossings,
            "ordering epoch"
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl OrderingProgress for NoopProgress {
    fn epoch(&mut self, _record: EpochRecord) {}
}

/// Runs the initializer once, then `epochs` alternating sweeps of the
/// optimizer over all layers, keeping the best layering seen and writing it
/// back into the layered graph's orders.
pub struct WarfieldOrderingOptimizer {
    pub epochs: usize,
    pub initializer: Box<dyn LayerOrderingInitializer>,
    pub optimizer: Box<dyn LayerOrderingOptimizer>,
    pub progress: Box<dyn OrderingProgress>,
}

impl WarfieldOrderingOptimizer {
    pub fn new(
        epochs: usize,
        initializer: Box<dyn LayerOrderingInitializer>,
        optimizer: Box<dyn LayerOrderingOptimizer>,
    ) -> Self {
        Self {
            epochs,
            initializer,
            optimizer,
            progress: Box::new(TracingProgress),
        }
    }

    pub fn optimize(&mut self, lg: &mut LayeredGraph) {
        let mut layers = lg.layers();
        if layers.is_empty() {
            return;
        }
        self.initializer.init(&lg.segments, &mut layers);

        let mut best: Option<(u64, Vec<Vec<NodeId>>)> = None;
        for epoch in 0..self.epochs {
            let sweep = if epoch % 2 == 0 { Sweep::Down } else { Sweep::Up };
            for i in 0..layers.len() {
                let idx = match sweep {
                    Sweep::Down => i,
                    Sweep::Up => layers.len() - 1 - i,
                };
                self.optimizer.optimize(&lg.segments, &mut layers, idx, sweep);
            }

            let current = crossings(&lg.segments, &layers);
            let best_crossings = match &mut best {
                Some((n, saved)) => {
                    if current < *n {
                        *n = current;
                        saved.clone_from(&layers);
                    }
                    *n
                }
                None => {
                    best = Some((current, layers.clone()));
                    current
                }
            };

            self.progress.epoch(EpochRecord {
                epoch,
                best_crossings,
                current_crossings: current,
            });
            if current == 0 {
                break;
            }
        }

        if let Some((_, best_layers)) = best {
            for (layer, nodes) in best_layers.iter().enumerate() {
                for (order, &node) in nodes.iter().enumerate() {
                    lg.node_position.insert(node, LayerPosition { layer, order });
                }
            }
        }
    }
}
