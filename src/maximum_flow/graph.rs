use crate::maximum_flow::error::FlowError;
use num_traits::NumAssign;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
}

#[derive(Default)]
pub struct Graph<Flow> {
    num_nodes: usize,
    pub(crate) edges: Vec<Edge<Flow>>,
}

impl<Flow> Graph<Flow>
where
    Flow: NumAssign + Ord + Copy,
{
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn add_node(&mut self) -> usize {
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn add_nodes(&mut self, num_nodes: usize) -> Vec<usize> {
        self.num_nodes += num_nodes;
        ((self.num_nodes - num_nodes)..self.num_nodes).collect()
    }

    // return edge index
    pub fn add_directed_edge(&mut self, from: usize, to: usize, upper: Flow) -> Result<usize, FlowError> {
        self.check_node(from)?;
        self.check_node(to)?;
        if upper < Flow::zero() {
            return Err(FlowError::NegativeCapacity { from, to });
        }

        self.edges.push(Edge { from, to, flow: Flow::zero(), upper });
        Ok(self.edges.len() - 1)
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.edges.get(edge_id).cloned()
    }

    pub fn edges(&self) -> std::slice::Iter<'_, Edge<Flow>> {
        self.edges.iter()
    }

    /// Net flow leaving `source` under the flows written back by the last solve.
    pub fn maximum_flow(&self, source: usize) -> Flow {
        self.edges.iter().fold(Flow::zero(), |mut flow, edge| {
            if edge.from == source && edge.to != source {
                flow += edge.flow;
            } else if edge.to == source && edge.from != source {
                flow -= edge.flow;
            }
            flow
        })
    }

    pub fn validate_terminals(&self, source: usize, sink: usize) -> Result<(), FlowError> {
        self.check_node(source)?;
        self.check_node(sink)?;
        if source == sink {
            return Err(FlowError::SourceIsSink(source));
        }
        Ok(())
    }

    fn check_node(&self, node: usize) -> Result<(), FlowError> {
        if node >= self.num_nodes {
            return Err(FlowError::NodeOutOfRange { node, num_nodes: self.num_nodes });
        }
        Ok(())
    }
}
