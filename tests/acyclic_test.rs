use stratum::acyclic::{CycleRemover, DfsCycleRemover, NoopCycleRemover};
use stratum::model::{Edge, Graph, Node, Position};
use stratum::normalize::build_layered_graph;

fn graph(nodes: &[u64], edges: &[(u64, u64)]) -> Graph {
    let mut g = Graph::default();
    for &n in nodes {
        g.nodes.insert(n, Node::default());
    }
    for &e in edges {
        g.edges.insert(e, Edge::default());
    }
    g
}

#[test]
fn noop_remover_leaves_the_graph_alone() {
    let mut g = graph(&[1, 2], &[(1, 2)]);
    let expected = g.clone();

    let mut remover = NoopCycleRemover;
    remover.remove_cycles(&mut g);
    remover.restore(&mut g);
    assert_eq!(g, expected);
}

#[test]
fn reverses_a_back_edge_and_restores_it() {
    let mut g = graph(&[1, 2, 3], &[(1, 2), (2, 3), (3, 1)]);

    let mut remover = DfsCycleRemover::default();
    remover.remove_cycles(&mut g);

    assert!(!g.edges.contains_key(&(3, 1)));
    assert!(g.edges.contains_key(&(1, 3)));
    // The rewritten graph must be layerable.
    build_layered_graph(&g).unwrap();

    // Simulate a layout pass writing a path onto the reversed edge.
    let path = vec![
        Position { x: 0, y: 0 },
        Position { x: 5, y: 40 },
        Position { x: 0, y: 80 },
    ];
    g.edges.get_mut(&(1, 3)).unwrap().path = path.clone();

    remover.restore(&mut g);
    assert!(!g.edges.contains_key(&(1, 3)));
    let restored = &g.edges[&(3, 1)];
    let reversed: Vec<Position> = path.into_iter().rev().collect();
    assert_eq!(restored.path, reversed);
}

#[test]
fn two_cycle_drops_one_edge_and_reinstates_it() {
    let mut g = graph(&[1, 2], &[(1, 2), (2, 1)]);

    let mut remover = DfsCycleRemover::default();
    remover.remove_cycles(&mut g);

    assert_eq!(g.edges.len(), 1);
    assert!(g.edges.contains_key(&(1, 2)));
    build_layered_graph(&g).unwrap();

    g.edges.get_mut(&(1, 2)).unwrap().path = vec![
        Position { x: 0, y: 0 },
        Position { x: 0, y: 40 },
    ];

    remover.restore(&mut g);
    assert_eq!(g.edges.len(), 2);
    assert_eq!(
        g.edges[&(2, 1)].path,
        vec![Position { x: 0, y: 40 }, Position { x: 0, y: 0 }]
    );
}

#[test]
fn self_loops_are_held_back_and_reinstated() {
    let mut g = graph(&[1, 2], &[(1, 1), (1, 2)]);

    let mut remover = DfsCycleRemover::default();
    remover.remove_cycles(&mut g);
    assert!(!g.edges.contains_key(&(1, 1)));
    build_layered_graph(&g).unwrap();

    remover.restore(&mut g);
    assert!(g.edges.contains_key(&(1, 1)));
}

#[test]
fn acyclic_input_passes_through_unchanged() {
    let mut g = graph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let expected = g.clone();

    let mut remover = DfsCycleRemover::default();
    remover.remove_cycles(&mut g);
    assert_eq!(g, expected);
    remover.restore(&mut g);
    assert_eq!(g, expected);
}
