#![allow(dead_code)]

use maxflow_mpm::maximum_flow::Graph;
use rand::rngs::StdRng;
use rand::Rng;

pub fn build(num_nodes: usize, edges: &[(usize, usize, i64)]) -> Graph<i64> {
    let mut graph = Graph::default();
    graph.add_nodes(num_nodes);
    for &(from, to, upper) in edges {
        graph.add_directed_edge(from, to, upper).unwrap();
    }
    graph
}

pub fn random_graph(rng: &mut StdRng, num_nodes: usize, num_edges: usize, max_capacity: i64) -> Graph<i64> {
    let mut graph = Graph::default();
    graph.add_nodes(num_nodes);
    for _ in 0..num_edges {
        let from = rng.random_range(0..num_nodes);
        let to = rng.random_range(0..num_nodes);
        graph.add_directed_edge(from, to, rng.random_range(0..=max_capacity)).unwrap();
    }
    graph
}

// capacity bounds, conservation at inner nodes and the value leaving the source / entering the sink
pub fn assert_feasible(graph: &Graph<i64>, source: usize, sink: usize, value: i64) {
    let mut balance = vec![0i64; graph.num_nodes()];
    for edge in graph.edges() {
        assert!(0 <= edge.flow && edge.flow <= edge.upper, "edge {edge:?} violates its capacity");
        balance[edge.from] -= edge.flow;
        balance[edge.to] += edge.flow;
    }
    for (u, &b) in balance.iter().enumerate() {
        if u != source && u != sink {
            assert_eq!(b, 0, "flow is not conserved at node {u}");
        }
    }
    assert_eq!(balance[source], -value);
    assert_eq!(balance[sink], value);
    assert_eq!(graph.maximum_flow(source), value);
}

// minimum over all source-side sets of the capacity leaving the set
pub fn brute_force_minimum_cut(graph: &Graph<i64>, source: usize, sink: usize) -> i64 {
    let n = graph.num_nodes();
    (0u32..1 << n)
        .filter(|set| set >> source & 1 == 1 && set >> sink & 1 == 0)
        .map(|set| graph.edges().filter(|e| set >> e.from & 1 == 1 && set >> e.to & 1 == 0).map(|e| e.upper).sum::<i64>())
        .min()
        .unwrap()
}
