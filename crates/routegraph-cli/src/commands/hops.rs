//! Shortest-hop command

use clap::Args;
use routegraph_core::TraversalEngine;

use crate::graph_args::{EdgeSpec, LabelledGraph};
use crate::output::{format_reports, OutputFormat, PathReport};
use crate::AppContext;

#[derive(Args)]
pub struct HopsArgs {
    /// Edge as FROM:TO or FROM:TO:WEIGHT (repeatable)
    #[arg(short, long = "edge", required = true)]
    pub edges: Vec<EdgeSpec>,
    /// Extra node with no edges (repeatable)
    #[arg(short, long = "node")]
    pub nodes: Vec<String>,
    /// Starting node
    #[arg(long)]
    pub from: String,
    /// Target node
    #[arg(long)]
    pub to: String,
    /// Maximum paths dequeued (0 = unlimited)
    #[arg(long)]
    pub max_steps: Option<usize>,
    /// Maximum frontier size (0 = unlimited)
    #[arg(long)]
    pub max_frontier: Option<usize>,
}

pub fn run(args: &HopsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let labelled = LabelledGraph::build(&args.edges, &args.nodes)?;
    let (start, target) = (labelled.id(&args.from)?, labelled.id(&args.to)?);

    let limits = ctx.config.limits(args.max_steps, args.max_frontier);
    let engine = TraversalEngine::new(&labelled.graph).with_limits(limits);

    match engine.shortest_hop_path(start, target)? {
        Some(path) => {
            let report = PathReport::new(&path, labelled.weighted);
            println!("{}", format_reports(&[report], ctx.format));
        }
        None => match ctx.format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Table => println!("No path from {} to {}", args.from, args.to),
        },
    }

    Ok(())
}
