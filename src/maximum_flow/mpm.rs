//! Dinic's algorithm with blocking flows found by vertex potentials
//! (Malhotra, Pramodh Kumar and Maheshwari).
//!
//! Each phase builds the level graph from the source. Within a phase the vertex with the
//! smallest positive potential is saturated by pushing its potential forward to the sink and
//! backward to the source, and vertices whose potential drops to zero are eliminated.
//! Inbound and outbound residual sums are computed once per phase and then kept up to date
//! edge by edge, both when flow is pushed and when a neighbour is eliminated.

use crate::maximum_flow::csr::CSR;
use crate::maximum_flow::error::FlowError;
use crate::maximum_flow::graph::Graph;
use log::{debug, trace};
use num_traits::NumAssign;
use std::collections::VecDeque;
use std::fmt::Debug;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Direction {
    // along outbound edges, towards the sink
    Forward,
    // along inbound edges, towards the source
    Backward,
}

#[derive(Default)]
pub struct MPM<Flow> {
    csr: CSR<Flow>,
    source: usize,
    sink: usize,

    // residual capacity of level edges to / from vertices that are not eliminated
    in_sums: Vec<Flow>,
    out_sums: Vec<Flow>,
    eliminated: Vec<bool>,
    out_pointer: Vec<usize>,
    in_pointer: Vec<usize>,
    que: VecDeque<usize>,
    phase_sink_distances: Vec<usize>,
}

impl<Flow> MPM<Flow>
where
    Flow: NumAssign + Ord + Copy + Debug,
{
    pub fn solve(&mut self, source: usize, sink: usize, graph: &mut Graph<Flow>) -> Result<Flow, FlowError> {
        graph.validate_terminals(source, sink)?;
        self.init(source, sink, graph);

        let mut flow = Flow::zero();
        while self.build_levels() {
            let mut phase_flow = Flow::zero();
            loop {
                let added = self.drain();
                if added == Flow::zero() {
                    break;
                }
                phase_flow += added;
            }
            flow += phase_flow;

            debug!("phase {}: sink distance {}, flow added {:?}", self.phase_sink_distances.len(), self.csr.distances[sink], phase_flow);
            assert!(phase_flow > Flow::zero(), "no flow found although the sink is reachable");
        }

        self.csr.set_flow(graph);
        Ok(flow)
    }

    /// Sink distance of the level graph of every phase, in order.
    pub fn phase_sink_distances(&self) -> &[usize] {
        &self.phase_sink_distances
    }

    fn init(&mut self, source: usize, sink: usize, graph: &Graph<Flow>) {
        self.csr.build(graph);
        self.source = source;
        self.sink = sink;

        let n = self.csr.num_nodes;
        self.in_sums.clear();
        self.in_sums.resize(n, Flow::zero());
        self.out_sums.clear();
        self.out_sums.resize(n, Flow::zero());
        self.eliminated.clear();
        self.eliminated.resize(n, false);
        self.out_pointer.resize(n, 0);
        self.in_pointer.resize(n, 0);
        self.phase_sink_distances.clear();
    }

    // new level graph: every vertex is back in play
    fn build_levels(&mut self) -> bool {
        self.eliminated.fill(false);
        if !self.csr.update_distances(self.source, self.sink) {
            return false;
        }
        self.phase_sink_distances.push(self.csr.distances[self.sink]);

        self.out_pointer.fill(0);
        self.in_pointer.fill(0);
        self.compute_sums();
        true
    }

    // O(n + m)
    fn compute_sums(&mut self) {
        for u in 0..self.csr.num_nodes {
            self.in_sums[u] = self.residual_sum(u, Direction::Backward);
            self.out_sums[u] = self.residual_sum(u, Direction::Forward);
        }
    }

    #[inline]
    fn adjacency(&self, u: usize, direction: Direction) -> &[usize] {
        match direction {
            Direction::Forward => self.csr.out_edges(u),
            Direction::Backward => self.csr.in_edges(u),
        }
    }

    // the other endpoint of an edge listed in u's adjacency
    #[inline]
    fn neighbor(&self, inside_edge_index: usize, direction: Direction) -> usize {
        let e = &self.csr.inside_edge_list[inside_edge_index];
        match direction {
            Direction::Forward => e.to,
            Direction::Backward => e.from,
        }
    }

    #[inline]
    fn is_usable(&self, inside_edge_index: usize, direction: Direction) -> bool {
        self.csr.is_level_edge(inside_edge_index) && !self.eliminated[self.neighbor(inside_edge_index, direction)]
    }

    fn residual_sum(&self, u: usize, direction: Direction) -> Flow {
        self.adjacency(u, direction)
            .iter()
            .filter(|&&i| self.is_usable(i, direction))
            .fold(Flow::zero(), |sum, &i| sum + self.csr.residual_capacity(i))
    }

    #[inline]
    fn potential(&self, u: usize) -> Flow {
        if u == self.sink {
            self.in_sums[u]
        } else if u == self.source {
            self.out_sums[u]
        } else {
            self.in_sums[u].min(self.out_sums[u])
        }
    }

    // Marks u eliminated and cascades: the residual of every level edge between an eliminated
    // vertex and a live neighbour leaves that neighbour's sums, and neighbours dropping to zero
    // potential are eliminated in turn. Each eliminated vertex is scanned once.
    fn eliminate(&mut self, u: usize) {
        self.eliminated[u] = true;
        self.que.clear();
        self.que.push_back(u);

        while let Some(x) = self.que.pop_front() {
            for direction in [Direction::Forward, Direction::Backward] {
                for k in 0..self.adjacency(x, direction).len() {
                    let i = self.adjacency(x, direction)[k];
                    if !self.csr.is_level_edge(i) {
                        continue;
                    }
                    let v = self.neighbor(i, direction);
                    if self.eliminated[v] {
                        continue;
                    }
                    let residual_capacity = self.csr.residual_capacity(i);
                    match direction {
                        Direction::Forward => self.in_sums[v] -= residual_capacity,
                        Direction::Backward => self.out_sums[v] -= residual_capacity,
                    }
                    if v != self.source && v != self.sink && self.potential(v) == Flow::zero() {
                        self.eliminated[v] = true;
                        self.que.push_back(v);
                    }
                }
            }
        }
    }

    fn sweep(&mut self) {
        for u in 0..self.csr.num_nodes {
            if u != self.source && u != self.sink && !self.eliminated[u] && self.potential(u) == Flow::zero() {
                self.eliminate(u);
            }
        }
    }

    // one blocking-flow step: saturate the vertex of smallest positive potential
    fn drain(&mut self) -> Flow {
        self.sweep();

        if self.potential(self.source) == Flow::zero() || self.potential(self.sink) == Flow::zero() {
            return Flow::zero();
        }

        let mut best = self.source;
        let mut delta = self.potential(best);
        for u in 0..self.csr.num_nodes {
            if self.eliminated[u] {
                continue;
            }
            let p = self.potential(u);
            if p > Flow::zero() && p < delta {
                best = u;
                delta = p;
            }
        }

        trace!("saturating node {best} with potential {delta:?}");
        self.augment(best, delta, Direction::Forward);
        self.augment(best, delta, Direction::Backward);
        delta
    }

    // Routes exactly `flow` units from u to the sink (Forward) or from the source to u
    // (Backward) through the level graph. Pointers only move past edges that stay useless for
    // the rest of the phase.
    fn augment(&mut self, u: usize, mut flow: Flow, direction: Direction) {
        let target = match direction {
            Direction::Forward => self.sink,
            Direction::Backward => self.source,
        };
        if flow == Flow::zero() || u == target {
            return;
        }

        loop {
            let pointer = match direction {
                Direction::Forward => self.out_pointer[u],
                Direction::Backward => self.in_pointer[u],
            };
            let Some(&i) = self.adjacency(u, direction).get(pointer) else {
                break;
            };

            let added = if self.is_usable(i, direction) { flow.min(self.csr.residual_capacity(i)) } else { Flow::zero() };
            if added == Flow::zero() {
                match direction {
                    Direction::Forward => self.out_pointer[u] += 1,
                    Direction::Backward => self.in_pointer[u] += 1,
                }
                continue;
            }

            let v = self.neighbor(i, direction);
            self.augment(v, added, direction);
            self.push(i, added);
            flow -= added;
            if flow == Flow::zero() {
                break;
            }
        }

        assert!(flow == Flow::zero(), "node {u} could not route the flow bounded by its potential");
    }

    // push along a level edge between two live vertices; the reverse edge points one level up
    // and never enters the sums
    fn push(&mut self, inside_edge_index: usize, flow: Flow) {
        self.csr.push_flow(inside_edge_index, flow);
        let e = &self.csr.inside_edge_list[inside_edge_index];
        let (from, to) = (e.from, e.to);
        self.out_sums[from] -= flow;
        self.in_sums[to] -= flow;
    }
}
