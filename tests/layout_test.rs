use stratum::acyclic::NoopCycleRemover;
use stratum::edge_path::{DirectEdgesLayout, StraightEdgePathAssigner};
use stratum::layered::LayerPosition;
use stratum::model::{Edge, Graph, Node, Position};
use stratum::order::{
    BfsOrderingInitializer, CompositeOrderingOptimizer, NoopProgress,
    SwitchAdjacentOrderingOptimizer, WMedianOrderingOptimizer, WarfieldOrderingOptimizer,
};
use stratum::position::{BrandesKopf, RowsVerticalCoordinatesAssigner};
use stratum::scale::ScalerLayout;
use stratum::{GraphLayout, LayeredGraph, SugiyamaLayout};

fn graph(nodes: &[u64], edges: &[(u64, u64)]) -> Graph {
    let mut g = Graph::default();
    for &n in nodes {
        g.nodes.insert(
            n,
            Node {
                w: 10,
                h: 10,
                ..Default::default()
            },
        );
    }
    for &e in edges {
        g.edges.insert(e, Edge::default());
    }
    g
}

/// Deterministic pipeline used by the scenarios: BFS start, median plus
/// transposition sweeps, no cycle rewriting.
fn layout() -> SugiyamaLayout {
    let mut ordering = WarfieldOrderingOptimizer::new(
        16,
        Box::new(BfsOrderingInitializer),
        Box::new(CompositeOrderingOptimizer {
            optimizers: vec![
                Box::new(WMedianOrderingOptimizer::default()),
                Box::new(SwitchAdjacentOrderingOptimizer),
            ],
        }),
    );
    ordering.progress = Box::new(NoopProgress);

    SugiyamaLayout {
        cycle_remover: Box::new(NoopCycleRemover),
        ordering,
        horizontal: BrandesKopf {
            delta: 20,
            top_down_only: false,
        },
        vertical: RowsVerticalCoordinatesAssigner { row_height: 40 },
    }
}

fn center(g: &Graph, n: u64) -> Position {
    g.nodes[&n].center()
}

#[test]
fn empty_graph_lays_out_to_nothing() {
    let mut g = Graph::default();
    layout().update_graph_layout(&mut g).unwrap();
    assert!(g.nodes.is_empty());
    assert!(g.edges.is_empty());
}

#[test]
fn single_node_is_centered_on_the_origin() {
    let mut g = graph(&[1], &[]);
    layout().update_graph_layout(&mut g).unwrap();

    assert_eq!(center(&g, 1), Position { x: 0, y: 0 });
    assert_eq!(g.nodes[&1], Node { x: -5, y: -5, w: 10, h: 10 });
}

#[test]
fn two_nodes_get_a_straight_center_to_center_edge() {
    let mut g = graph(&[1, 2], &[(1, 2)]);
    layout().update_graph_layout(&mut g).unwrap();

    assert_eq!(center(&g, 1), Position { x: 0, y: 0 });
    assert_eq!(center(&g, 2), Position { x: 0, y: 40 });
    assert_eq!(
        g.edges[&(1, 2)].path,
        vec![Position { x: 0, y: 0 }, Position { x: 0, y: 40 }]
    );
}

#[test]
fn diamond_scenario() {
    let mut g = graph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
    layout().update_graph_layout(&mut g).unwrap();

    let (c1, c2, c3, c4) = (center(&g, 1), center(&g, 2), center(&g, 3), center(&g, 4));
    assert_eq!(c1.x, c4.x, "source and sink should line up");
    assert!((c2.x - c3.x).abs() >= 20);

    assert_eq!(c1.y, 0);
    assert_eq!(c2.y, 40);
    assert_eq!(c3.y, 40);
    assert_eq!(c4.y, 80);

    for (&(from, to), edge) in &g.edges {
        assert_eq!(edge.path.first().copied(), Some(center(&g, from)));
        assert_eq!(edge.path.last().copied(), Some(center(&g, to)));
    }

    let (min_x, min_y, _, _) = g.bounding_box();
    assert!(min_x <= 0);
    assert!(min_y <= 0);
}

#[test]
fn long_edge_scenario_renders_as_one_vertical_line() {
    // A single edge pinned across four layers: the chain holds two interior
    // dummies and the path goes straight down.
    let mut lg = LayeredGraph::default();
    for (node, layer) in [(1u64, 0usize), (3, 1), (4, 2), (2, 3)] {
        lg.node_position.insert(node, LayerPosition { layer, order: 0 });
    }
    lg.segments = [(1, 3), (3, 4), (4, 2)].into_iter().collect();
    lg.dummy = [3, 4].into_iter().collect();
    lg.edges.insert((1, 2), vec![1, 3, 4, 2]);
    lg.validate().unwrap();

    let node_x = BrandesKopf {
        delta: 20,
        top_down_only: false,
    }
    .assign(&lg);
    let node_y = RowsVerticalCoordinatesAssigner { row_height: 40 }.assign(&lg);
    let node_xy = lg
        .node_position
        .keys()
        .map(|&n| {
            (
                n,
                Position {
                    x: node_x[&n],
                    y: node_y[&n],
                },
            )
        })
        .collect();

    let mut g = graph(&[1, 2], &[(1, 2)]);
    StraightEdgePathAssigner
        .assign(&mut g, &lg, &node_xy)
        .unwrap();

    let path = &g.edges[&(1, 2)].path;
    assert_eq!(path.len(), 4);
    assert!(path.iter().all(|p| p.x == path[0].x));
    assert_eq!(
        path.iter().map(|p| p.y).collect::<Vec<_>>(),
        vec![0, 40, 80, 120]
    );
}

#[test]
fn transitive_triangle_scenario() {
    let mut g = graph(&[1, 2, 3], &[(1, 2), (2, 3), (1, 3)]);
    layout().update_graph_layout(&mut g).unwrap();

    // The long edge bends once, at its dummy node on the middle layer.
    let path = &g.edges[&(1, 3)].path;
    assert_eq!(path.len(), 3);
    assert_eq!(path[1].y, center(&g, 2).y);

    assert_eq!(g.edges[&(1, 2)].path.len(), 2);
    assert_eq!(g.edges[&(2, 3)].path.len(), 2);
}

#[test]
fn two_component_scenario_keeps_components_apart() {
    let mut g = graph(&[1, 2, 3, 4], &[(1, 2), (3, 4)]);
    layout().update_graph_layout(&mut g).unwrap();

    // Both roots land on layer 0, both sinks on layer 1.
    assert_eq!(center(&g, 1).y, center(&g, 3).y);
    assert_eq!(center(&g, 2).y, center(&g, 4).y);

    assert!((center(&g, 1).x - center(&g, 3).x).abs() >= 20);
    assert!((center(&g, 2).x - center(&g, 4).x).abs() >= 20);
}

#[test]
fn laying_out_a_copy_gives_identical_results() {
    let mut a = graph(
        &[1, 2, 3, 4, 5, 6],
        &[(1, 2), (1, 3), (2, 4), (3, 5), (4, 6), (5, 6), (1, 6)],
    );
    let mut b = a.clone();

    layout().update_graph_layout(&mut a).unwrap();
    layout().update_graph_layout(&mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn direct_edges_connect_centers() {
    let mut g = Graph::default();
    g.nodes.insert(1, Node { x: 0, y: 0, w: 10, h: 10 });
    g.nodes.insert(2, Node { x: 100, y: 40, w: 20, h: 10 });
    g.edges.insert((1, 2), Edge::default());

    DirectEdgesLayout.update_graph_layout(&mut g).unwrap();
    assert_eq!(
        g.edges[&(1, 2)].path,
        vec![Position { x: 5, y: 5 }, Position { x: 110, y: 45 }]
    );
}

#[test]
fn scaler_scales_nodes_and_repins_path_endpoints() {
    let mut g = graph(&[1, 2], &[(1, 2)]);
    layout().update_graph_layout(&mut g).unwrap();

    ScalerLayout { scale: 2.0 }.update_graph_layout(&mut g).unwrap();

    assert_eq!(g.nodes[&1].x, -10);
    assert_eq!(g.nodes[&1].y, -10);
    let path = &g.edges[&(1, 2)].path;
    assert_eq!(path[0], g.nodes[&1].center());
    assert_eq!(*path.last().unwrap(), g.nodes[&2].center());
}
