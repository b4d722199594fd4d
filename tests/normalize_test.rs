use stratum::layered::{LayerPosition, LayeredGraph};
use stratum::model::{Edge, Graph, Node};
use stratum::normalize::build_layered_graph;
use stratum::Error;

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

#[test]
fn diamond_gets_three_layers() {
    let g = graph(&[1, 2, 3, 4], &[(1, 2), (1, 3), (2, 4), (3, 4)]);
    let lg = build_layered_graph(&g).unwrap();

    assert_eq!(lg.position(1).layer, 0);
    assert_eq!(lg.position(2).layer, 1);
    assert_eq!(lg.position(3).layer, 1);
    assert_eq!(lg.position(4).layer, 2);
    assert!(lg.dummy.is_empty());
    lg.validate().unwrap();
}

#[test]
fn layering_takes_the_longest_path() {
    // 1 -> 2 -> 3 and 1 -> 3: node 3 must sit below node 2, not beside it.
    let g = graph(&[1, 2, 3], &[(1, 2), (2, 3), (1, 3)]);
    let lg = build_layered_graph(&g).unwrap();

    assert_eq!(lg.position(1).layer, 0);
    assert_eq!(lg.position(2).layer, 1);
    assert_eq!(lg.position(3).layer, 2);
}

#[test]
fn transitive_edge_gains_a_dummy_on_the_skipped_layer() {
    let g = graph(&[1, 2, 3], &[(1, 2), (2, 3), (1, 3)]);
    let lg = build_layered_graph(&g).unwrap();

    assert_eq!(lg.edges[&(1, 3)], vec![1, 4, 3]);
    assert_eq!(lg.dummy.iter().copied().collect::<Vec<_>>(), vec![4]);
    assert_eq!(lg.position(4).layer, 1);
    assert!(lg.segments.contains(&(1, 4)));
    assert!(lg.segments.contains(&(4, 3)));
    lg.validate().unwrap();
}

#[test]
fn dummy_ids_start_after_the_largest_real_id() {
    let g = graph(&[7, 9, 11], &[(7, 9), (9, 11), (7, 11)]);
    let lg = build_layered_graph(&g).unwrap();

    assert_eq!(lg.edges[&(7, 11)], vec![7, 12, 11]);
    assert!(lg.dummy.contains(&12));
    assert!(lg.dummy.iter().all(|d| !g.nodes.contains_key(d)));
}

#[test]
fn every_chain_connects_its_endpoints_through_segments() {
    let g = graph(
        &[1, 2, 3, 4, 5],
        &[(1, 2), (2, 3), (3, 4), (1, 4), (1, 5), (4, 5)],
    );
    let lg = build_layered_graph(&g).unwrap();
    lg.validate().unwrap();

    for (&(src, dst), chain) in &lg.edges {
        assert_eq!(chain[0], src);
        assert_eq!(*chain.last().unwrap(), dst);
        for pair in chain.windows(2) {
            assert!(lg.segments.contains(&(pair[0], pair[1])));
            assert_eq!(
                lg.position(pair[1]).layer,
                lg.position(pair[0]).layer + 1,
                "segment ({}, {}) does not descend one layer",
                pair[0],
                pair[1]
            );
        }
        for &n in &chain[1..chain.len() - 1] {
            assert!(lg.dummy.contains(&n));
        }
        assert!(!lg.dummy.contains(&src));
        assert!(!lg.dummy.contains(&dst));
    }
}

#[test]
fn cyclic_input_is_rejected() {
    let g = graph(&[1, 2], &[(1, 2), (2, 1)]);
    let err = build_layered_graph(&g).unwrap_err();
    assert!(matches!(err, Error::InvalidLayering { .. }));
}

#[test]
fn validate_rejects_a_segment_that_skips_a_layer() {
    let mut lg = LayeredGraph::default();
    lg.node_position.insert(1, LayerPosition { layer: 0, order: 0 });
    lg.node_position.insert(2, LayerPosition { layer: 2, order: 0 });
    lg.segments.insert((1, 2));

    let err = lg.validate().unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidLayering {
            from: 1,
            to: 2,
            from_layer: 0,
            to_layer: 2,
        }
    ));
}

#[test]
fn validate_rejects_a_single_node_chain() {
    let mut lg = LayeredGraph::default();
    lg.node_position.insert(1, LayerPosition { layer: 0, order: 0 });
    lg.edges.insert((1, 1), vec![1]);

    let err = lg.validate().unwrap_err();
    assert!(matches!(err, Error::MalformedEdgeChain { len: 1, .. }));
}

#[test]
fn empty_graph_builds_an_empty_layering() {
    let lg = build_layered_graph(&Graph::default()).unwrap();
    assert!(lg.node_position.is_empty());
    assert!(lg.layers().is_empty());
    lg.validate().unwrap();
}

#[test]
fn single_node_sits_alone_on_layer_zero() {
    let g = graph(&[1], &[]);
    let lg = build_layered_graph(&g).unwrap();
    assert_eq!(lg.layers(), vec![vec![1]]);
}

#[test]
fn isolated_roots_share_layer_zero() {
    let g = graph(&[1, 2, 3, 4], &[(1, 2), (3, 4)]);
    let lg = build_layered_graph(&g).unwrap();

    assert_eq!(lg.position(1).layer, 0);
    assert_eq!(lg.position(3).layer, 0);
    assert_eq!(lg.position(2).layer, 1);
    assert_eq!(lg.position(4).layer, 1);
}

#[test]
fn neighbor_queries_follow_segments() {
    let g = graph(&[1, 2, 3], &[(1, 2), (2, 3), (1, 3)]);
    let lg = build_layered_graph(&g).unwrap();

    assert_eq!(lg.upper_neighbors(3), vec![2, 4]);
    assert_eq!(lg.lower_neighbors(1), vec![2, 4]);
    assert!(!lg.is_inner_segment((4, 3)));
}
