mod csr;
pub mod dinic;
pub mod error;
pub mod graph;
pub mod mpm;

pub use dinic::Dinic;
pub use error::FlowError;
pub use graph::{Edge, Graph};
pub use mpm::MPM;
