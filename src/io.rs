//! Plain-text network descriptions.
//!
//! The format is a stream of whitespace-separated integers: `n m s t` followed by `m` edge
//! triples `u v c`. Vertices are numbered from 1 in the text and from 0 in the returned graph.

use std::fs;
use std::path::Path;
use std::str::SplitWhitespace;

use thiserror::Error;

use crate::maximum_flow::{FlowError, Graph};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unexpected end of input, expected {0}")]
    MissingToken(&'static str),
    #[error("invalid number {0:?}")]
    InvalidNumber(String),
    #[error("input continues after the declared edges")]
    TrailingInput,
    #[error("node index {index} is out of range 1..={num_nodes}")]
    NodeIndex { index: usize, num_nodes: usize },
    #[error(transparent)]
    Flow(#[from] FlowError),
}

pub struct Network {
    pub graph: Graph<i64>,
    pub source: usize,
    pub sink: usize,
}

impl Network {
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut tokens = Tokens { inner: input.split_whitespace() };

        let num_nodes: usize = tokens.next("node count")?;
        let num_edges: usize = tokens.next("edge count")?;
        let source = tokens.node("source", num_nodes)?;
        let sink = tokens.node("sink", num_nodes)?;

        let mut graph = Graph::default();
        graph.add_nodes(num_nodes);
        graph.validate_terminals(source, sink)?;

        for _ in 0..num_edges {
            let from = tokens.node("edge origin", num_nodes)?;
            let to = tokens.node("edge destination", num_nodes)?;
            let upper: i64 = tokens.next("edge capacity")?;
            graph.add_directed_edge(from, to, upper)?;
        }

        if tokens.inner.next().is_some() {
            return Err(ParseError::TrailingInput);
        }

        Ok(Network { graph, source, sink })
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl Tokens<'_> {
    fn next<T: std::str::FromStr>(&mut self, what: &'static str) -> Result<T, ParseError> {
        let token = self.inner.next().ok_or(ParseError::MissingToken(what))?;
        token.parse().map_err(|_| ParseError::InvalidNumber(token.to_string()))
    }

    // 1-based in the text
    fn node(&mut self, what: &'static str, num_nodes: usize) -> Result<usize, ParseError> {
        let index: usize = self.next(what)?;
        if index == 0 || index > num_nodes {
            return Err(ParseError::NodeIndex { index, num_nodes });
        }
        Ok(index - 1)
    }
}
