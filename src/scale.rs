//! Uniform scaling of an existing layout.

use crate::error::Result;
use crate::model::{Graph, Position};
use crate::pipeline::GraphLayout;

/// Scales node positions and edge paths by a constant factor, then re-pins
/// each path's endpoints to the (scaled) node centers. Edge paths with
/// interior bends keep their shape; edges that had no path get a two-point
/// one.
#[derive(Debug, Clone, Copy)]
pub struct ScalerLayout {
    pub scale: f64,
}

impl GraphLayout for ScalerLayout {
    fn update_graph_layout(&mut self, g: &mut Graph) -> Result<()> {
        for node in g.nodes.values_mut() {
            node.x = (node.x as f64 * self.scale) as i64;
            node.y = (node.y as f64 * self.scale) as i64;
        }

        let Graph { nodes, edges } = g;
        for (&(from, to), edge) in edges.iter_mut() {
            for point in &mut edge.path {
                point.x = (point.x as f64 * self.scale) as i64;
                point.y = (point.y as f64 * self.scale) as i64;
            }

            if edge.path.is_empty() {
                edge.path = vec![Position::default(); 2];
            }

            // Endpoints always sit on node centers; this overwrites any
            // ports an earlier pass may have set.
            let from_center = nodes.get(&from).copied().unwrap_or_default().center();
            let to_center = nodes.get(&to).copied().unwrap_or_default().center();
            edge.path[0] = from_center;
            let last = edge.path.len() - 1;
            edge.path[last] = to_center;
        }
        Ok(())
    }
}
