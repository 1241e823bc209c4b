use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use maxflow_mpm::io::Network;
use maxflow_mpm::maximum_flow::{Dinic, MPM};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Algorithm {
    /// Dinic with potential-based blocking flows
    Mpm,
    /// Dinic with depth-first blocking flows
    Dinic,
}

/// Compute the maximum flow of a network read from a text file.
#[derive(Parser, Debug)]
#[command(name = "maxflow", version)]
struct Cli {
    /// Network description (`n m s t` then `m` lines `u v c`), or `-` for stdin
    input: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Algorithm::Mpm)]
    algorithm: Algorithm,

    /// Also print the flow on every edge as `u v flow`
    #[arg(long)]
    flows: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("MAXFLOW_LOG", "warn")).init();
    let cli = Cli::parse();

    let mut network = if cli.input.as_os_str() == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
        Network::parse(&input)?
    } else {
        Network::read(&cli.input).with_context(|| format!("failed to load {}", cli.input.display()))?
    };
    info!("loaded {} nodes and {} edges", network.graph.num_nodes(), network.graph.num_edges());

    let start = Instant::now();
    let flow = match cli.algorithm {
        Algorithm::Mpm => MPM::default().solve(network.source, network.sink, &mut network.graph)?,
        Algorithm::Dinic => Dinic::default().solve(network.source, network.sink, &mut network.graph)?,
    };
    info!("{:?} finished in {:.3?}", cli.algorithm, start.elapsed());

    println!("{flow}");
    if cli.flows {
        for edge in network.graph.edges() {
            println!("{} {} {}", edge.from + 1, edge.to + 1, edge.flow);
        }
    }
    Ok(())
}
