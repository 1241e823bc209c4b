use crate::maximum_flow::graph::Graph;
use std::collections::VecDeque;
use std::ops::Sub;

use num_traits::NumAssign;

#[derive(Default, PartialEq, Debug, Clone)]
pub struct InsideEdge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
    pub rev: usize,
}

impl<Flow> InsideEdge<Flow>
where
    Flow: Sub<Output = Flow> + Copy,
{
    pub fn residual_capacity(&self) -> Flow {
        self.upper - self.flow
    }
}

// Edge pairs live at (2k, 2k + 1): the forward copy of user edge k and its reverse.
// `out_list[out_start[u]..out_start[u + 1]]` lists pair indices leaving u,
// `in_list[in_start[u]..in_start[u + 1]]` lists pair indices entering u.
#[derive(Default)]
pub struct CSR<Flow> {
    pub num_nodes: usize,

    pub inside_edge_list: Vec<InsideEdge<Flow>>,
    pub out_start: Vec<usize>,
    pub out_list: Vec<usize>,
    pub in_start: Vec<usize>,
    pub in_list: Vec<usize>,
    pub distances: Vec<usize>, // distance from source to u in residual network
    que: VecDeque<usize>,
}

impl<Flow> CSR<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    pub fn build(&mut self, graph: &Graph<Flow>) {
        self.num_nodes = graph.num_nodes();

        self.inside_edge_list.clear();
        self.inside_edge_list.reserve(2 * graph.num_edges());
        for e in graph.edges.iter() {
            self.add_edge(e.from, e.to, e.upper);
        }

        let mut out_degree = vec![0; self.num_nodes];
        let mut in_degree = vec![0; self.num_nodes];
        for e in self.inside_edge_list.iter() {
            out_degree[e.from] += 1;
            in_degree[e.to] += 1;
        }
        Self::fill_index(&mut self.out_start, &mut self.out_list, &out_degree, self.inside_edge_list.iter().map(|e| e.from));
        Self::fill_index(&mut self.in_start, &mut self.in_list, &in_degree, self.inside_edge_list.iter().map(|e| e.to));

        self.distances.clear();
        self.distances.resize(self.num_nodes, self.num_nodes);
    }

    fn add_edge(&mut self, from: usize, to: usize, upper: Flow) {
        let forward = self.inside_edge_list.len();
        self.inside_edge_list.push(InsideEdge { from, to, flow: Flow::zero(), upper, rev: forward + 1 });
        self.inside_edge_list.push(InsideEdge { from: to, to: from, flow: Flow::zero(), upper: Flow::zero(), rev: forward });
    }

    // counting sort of pair indices by `keys`, stable in insertion order
    fn fill_index(start: &mut Vec<usize>, list: &mut Vec<usize>, degree: &[usize], keys: impl Iterator<Item = usize>) {
        let num_nodes = degree.len();
        start.clear();
        start.resize(num_nodes + 1, 0);
        for i in 1..=num_nodes {
            start[i] = start[i - 1] + degree[i - 1];
        }

        list.clear();
        list.resize(start[num_nodes], 0);
        let mut counter = start[..num_nodes].to_vec();
        for (inside_edge_index, u) in keys.enumerate() {
            list[counter[u]] = inside_edge_index;
            counter[u] += 1;
        }
    }

    pub fn set_flow(&self, graph: &mut Graph<Flow>) {
        for (edge_id, edge) in graph.edges.iter_mut().enumerate() {
            edge.flow = self.inside_edge_list[2 * edge_id].flow;
        }
    }

    #[inline]
    pub fn out_edges(&self, u: usize) -> &[usize] {
        &self.out_list[self.out_start[u]..self.out_start[u + 1]]
    }

    #[inline]
    pub fn in_edges(&self, u: usize) -> &[usize] {
        &self.in_list[self.in_start[u]..self.in_start[u + 1]]
    }

    #[inline]
    pub fn residual_capacity(&self, inside_edge_index: usize) -> Flow {
        self.inside_edge_list[inside_edge_index].residual_capacity()
    }

    #[inline]
    pub fn push_flow(&mut self, inside_edge_index: usize, flow: Flow) {
        assert!(flow <= self.residual_capacity(inside_edge_index), "pushed more flow than the residual capacity of edge {inside_edge_index}");
        let rev = self.inside_edge_list[inside_edge_index].rev;

        // update flow
        self.inside_edge_list[inside_edge_index].flow += flow;
        self.inside_edge_list[rev].flow -= flow;
    }

    // O(n + m)
    // calculate the distance from source to u in the residual network
    // stops once the sink is labelled; unreached nodes keep distance self.num_nodes
    pub fn update_distances(&mut self, source: usize, sink: usize) -> bool {
        self.que.clear();
        self.que.push_back(source);
        self.distances.fill(self.num_nodes);
        self.distances[source] = 0;

        while let Some(u) = self.que.pop_front() {
            if self.distances[sink] < self.num_nodes {
                break;
            }
            for &i in self.out_list[self.out_start[u]..self.out_start[u + 1]].iter() {
                let e = &self.inside_edge_list[i];
                if e.residual_capacity() > Flow::zero() && self.distances[e.to] == self.num_nodes {
                    self.distances[e.to] = self.distances[u] + 1;
                    self.que.push_back(e.to);
                }
            }
        }

        self.distances[sink] < self.num_nodes
    }

    // edge of the level graph, ignoring its residual capacity
    #[inline]
    pub fn is_level_edge(&self, i: usize) -> bool {
        let e = &self.inside_edge_list[i];
        self.distances[e.from] < self.num_nodes && self.distances[e.to] == self.distances[e.from] + 1
    }

    #[inline]
    pub fn is_admissible_edge(&self, i: usize) -> bool {
        self.is_level_edge(i) && self.inside_edge_list[i].residual_capacity() > Flow::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Graph<i64> {
        let mut graph = Graph::default();
        graph.add_nodes(4);
        graph.add_directed_edge(0, 1, 3).unwrap();
        graph.add_directed_edge(0, 2, 2).unwrap();
        graph.add_directed_edge(1, 3, 2).unwrap();
        graph.add_directed_edge(2, 3, 3).unwrap();
        graph
    }

    #[test]
    fn build_pairs_edges() {
        let mut csr = CSR::default();
        csr.build(&diamond());

        assert_eq!(csr.inside_edge_list.len(), 8);
        for (i, e) in csr.inside_edge_list.iter().enumerate() {
            assert_eq!(e.rev, i ^ 1);
            let rev = &csr.inside_edge_list[e.rev];
            assert_eq!((rev.from, rev.to), (e.to, e.from));
        }
        assert_eq!(csr.inside_edge_list[1].upper, 0);
        assert_eq!(csr.out_edges(0), &[0, 2]);
        assert_eq!(csr.in_edges(3), &[4, 6]);
        assert_eq!(csr.out_edges(3), &[5, 7]);
        assert_eq!(csr.in_edges(0), &[1, 3]);
    }

    #[test]
    fn push_flow_keeps_pair_symmetric() {
        let mut csr = CSR::default();
        csr.build(&diamond());

        csr.push_flow(0, 2);
        assert_eq!(csr.inside_edge_list[0].flow, 2);
        assert_eq!(csr.inside_edge_list[1].flow, -2);
        assert_eq!(csr.residual_capacity(0), 1);
        assert_eq!(csr.residual_capacity(1), 2);

        csr.push_flow(1, 1);
        assert_eq!(csr.inside_edge_list[0].flow, 1);
        assert_eq!(csr.inside_edge_list[1].flow, -1);
    }

    #[test]
    #[should_panic(expected = "residual capacity")]
    fn push_flow_beyond_residual_panics() {
        let mut csr = CSR::default();
        csr.build(&diamond());
        csr.push_flow(1, 1);
    }

    #[test]
    fn update_distances_levels() {
        let mut csr = CSR::default();
        csr.build(&diamond());

        assert!(csr.update_distances(0, 3));
        assert_eq!(csr.distances, vec![0, 1, 1, 2]);
        assert!(csr.is_admissible_edge(0));
        assert!(!csr.is_level_edge(1));

        csr.push_flow(0, 2);
        csr.push_flow(4, 2);
        csr.push_flow(2, 2);
        csr.push_flow(6, 2);
        assert!(!csr.update_distances(0, 3));
        assert_eq!(csr.distances[0], 0);
        assert_eq!(csr.distances[1], 1);
        assert_eq!(csr.distances[3], 4);
    }

    #[test]
    fn set_flow_writes_forward_flows() {
        let mut graph = diamond();
        let mut csr = CSR::default();
        csr.build(&graph);
        csr.push_flow(2, 2);
        csr.push_flow(6, 2);
        csr.set_flow(&mut graph);

        let flows: Vec<i64> = graph.edges().map(|e| e.flow).collect();
        assert_eq!(flows, vec![0, 2, 0, 2]);
        assert_eq!(graph.maximum_flow(0), 2);
    }
}
