//! Hierarchical graph layout in the classic Sugiyama style.
//!
//! Nodes are arranged on horizontal layers with edges pointing predominantly
//! downward. The pipeline removes cycles, assigns layers and splits long
//! edges with dummy nodes, minimizes crossings with iterated median and
//! transposition heuristics, and assigns horizontal coordinates with the
//! Brandes-Kopf alignment so long edges render as nearly straight vertical
//! lines.
//!
//! ```
//! use stratum::{Graph, GraphLayout, Node, SugiyamaLayout};
//!
//! let mut g = Graph::default();
//! for id in 1..=4 {
//!     g.nodes.insert(id, Node { w: 10, h: 10, ..Default::default() });
//! }
//! for edge in [(1, 2), (1, 3), (2, 4), (3, 4)] {
//!     g.edges.insert(edge, Default::default());
//! }
//!
//! SugiyamaLayout::default().update_graph_layout(&mut g).unwrap();
//! assert!(g.edges.values().all(|e| e.path.len() >= 2));
//! ```

pub mod acyclic;
pub mod edge_path;
pub mod error;
pub mod layered;
pub mod model;
pub mod normalize;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod scale;

pub use error::{Error, Result};
pub use layered::{LayerPosition, LayeredGraph, Segment};
pub use model::{Edge, Graph, Node, NodeId, Position};
pub use pipeline::{GraphLayout, SugiyamaLayout};
