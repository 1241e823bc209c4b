pub mod io;
pub mod maximum_flow;
