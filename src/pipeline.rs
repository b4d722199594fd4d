//! Phase driver for the layered layout.

use std::collections::BTreeMap;

use crate::acyclic::{CycleRemover, DfsCycleRemover};
use crate::edge_path::StraightEdgePathAssigner;
use crate::error::Result;
use crate::model::{Graph, NodeId, Position};
use crate::normalize::build_layered_graph;
use crate::order::{
    BfsOrderingInitializer, CompositeOrderingOptimizer, SwitchAdjacentOrderingOptimizer,
    WMedianOrderingOptimizer, WarfieldOrderingOptimizer,
};
use crate::position::{BrandesKopf, RowsVerticalCoordinatesAssigner};

/// A strategy that rewrites node positions and edge paths in place.
pub trait GraphLayout {
    fn update_graph_layout(&mut self, g: &mut Graph) -> Result<()>;
}

/// The Sugiyama pipeline: cycle removal, layering with dummy nodes, crossing
/// minimization, coordinate assignment, edge paths, cycle restoration.
pub struct SugiyamaLayout {
    pub cycle_remover: Box<dyn CycleRemover>,
    pub ordering: WarfieldOrderingOptimizer,
    pub horizontal: BrandesKopf,
    pub vertical: RowsVerticalCoordinatesAssigner,
}

impl Default for SugiyamaLayout {
    fn default() -> Self {
        Self {
            cycle_remover: Box::new(DfsCycleRemover::default()),
            ordering: WarfieldOrderingOptimizer::new(
                16,
                Box::new(BfsOrderingInitializer),
                Box::new(CompositeOrderingOptimizer {
                    optimizers: vec![
                        Box::new(WMedianOrderingOptimizer::default()),
                        Box::new(SwitchAdjacentOrderingOptimizer),
                    ],
                }),
            ),
            horizontal: BrandesKopf {
                delta: 20,
                top_down_only: false,
            },
            vertical: RowsVerticalCoordinatesAssigner { row_height: 40 },
        }
    }
}

impl GraphLayout for SugiyamaLayout {
    fn update_graph_layout(&mut self, g: &mut Graph) -> Result<()> {
        self.cycle_remover.remove_cycles(g);

        let mut lg = build_layered_graph(g)?;
        lg.validate()?;

        self.ordering.optimize(&mut lg);

        let node_x = self.horizontal.assign(&lg);
        let node_y = self.vertical.assign(&lg);

        // Coordinates for real and dummy nodes alike; edge paths bend at the
        // dummies.
        let mut node_xy: BTreeMap<NodeId, Position> = BTreeMap::new();
        for &n in lg.node_position.keys() {
            node_xy.insert(
                n,
                Position {
                    x: node_x.get(&n).copied().unwrap_or(0),
                    y: node_y.get(&n).copied().unwrap_or(0),
                },
            );
        }

        StraightEdgePathAssigner.assign(g, &lg, &node_xy)?;

        // The assigners position node centers; shift top-left corners so the
        // centers line up.
        for (id, node) in g.nodes.iter_mut() {
            let Some(center) = node_xy.get(id) else {
                continue;
            };
            node.x = center.x - node.w / 2;
            node.y = center.y - node.h / 2;
        }

        self.cycle_remover.restore(g);
        Ok(())
    }
}
