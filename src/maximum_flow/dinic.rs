use crate::maximum_flow::csr::CSR;
use crate::maximum_flow::error::FlowError;
use crate::maximum_flow::graph::Graph;
use log::debug;
use num_traits::NumAssign;

/// Dinic's algorithm with a plain current-edge DFS for the blocking flow.
#[derive(Default)]
pub struct Dinic<Flow> {
    csr: CSR<Flow>,
    current_edge: Vec<usize>,
}

impl<Flow> Dinic<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    pub fn solve(&mut self, source: usize, sink: usize, graph: &mut Graph<Flow>) -> Result<Flow, FlowError> {
        graph.validate_terminals(source, sink)?;
        self.csr.build(graph);
        self.current_edge.resize(graph.num_nodes(), 0);

        let upper = self.csr.out_edges(source).iter().fold(Flow::zero(), |sum, &i| sum + self.csr.residual_capacity(i));
        let mut flow = Flow::zero();
        while flow < upper {
            // no s-t path
            if !self.csr.update_distances(source, sink) {
                break;
            }

            self.current_edge.fill(0);
            debug!("dinic phase: sink distance {}", self.csr.distances[sink]);
            let delta = self.dfs(source, sink, upper - flow);
            if delta == Flow::zero() {
                break;
            }
            flow += delta;
        }

        self.csr.set_flow(graph);
        Ok(flow)
    }

    fn dfs(&mut self, u: usize, sink: usize, upper: Flow) -> Flow {
        if u == sink {
            return upper;
        }

        let mut res = Flow::zero();
        let degree = self.csr.out_edges(u).len();
        while self.current_edge[u] < degree {
            let i = self.csr.out_edges(u)[self.current_edge[u]];
            if self.csr.is_admissible_edge(i) {
                let v = self.csr.inside_edge_list[i].to;
                let d = self.dfs(v, sink, self.csr.residual_capacity(i).min(upper - res));
                if d > Flow::zero() {
                    self.csr.push_flow(i, d);
                    res += d;
                    if res == upper {
                        return res;
                    }
                }
            }
            self.current_edge[u] += 1;
        }
        self.csr.distances[u] = self.csr.num_nodes;

        res
    }
}
