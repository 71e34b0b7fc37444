//! Best-path command

use clap::{Args, ValueEnum};
use routegraph_core::{FewestHops, MaxTotalWeight, MinTotalWeight, PathStrategy, TraversalEngine};

use crate::graph_args::{EdgeSpec, LabelledGraph};
use crate::output::{format_reports, PathReport};
use crate::AppContext;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyArg {
    /// Smallest sum of edge weights
    Min,
    /// Largest sum of edge weights (acyclic graphs only)
    Max,
    /// Fewest edges
    FewestHops,
}

impl StrategyArg {
    fn strategy(self) -> Box<dyn PathStrategy<String, f64>> {
        match self {
            Self::Min => Box::new(MinTotalWeight),
            Self::Max => Box::new(MaxTotalWeight),
            Self::FewestHops => Box::new(FewestHops),
        }
    }
}

#[derive(Args)]
pub struct BestArgs {
    /// Edge as FROM:TO or FROM:TO:WEIGHT (repeatable)
    #[arg(short, long = "edge", required = true)]
    pub edges: Vec<EdgeSpec>,
    /// Extra node with no edges (repeatable)
    #[arg(short, long = "node")]
    pub nodes: Vec<String>,
    /// Starting node
    #[arg(long)]
    pub from: String,
    /// Only report the path to this node
    #[arg(long)]
    pub to: Option<String>,
    /// Path comparison strategy
    #[arg(short, long, value_enum, default_value = "min")]
    pub strategy: StrategyArg,
    /// Maximum paths dequeued (0 = unlimited)
    #[arg(long)]
    pub max_steps: Option<usize>,
    /// Maximum frontier size (0 = unlimited)
    #[arg(long)]
    pub max_frontier: Option<usize>,
}

pub fn run(args: &BestArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let labelled = LabelledGraph::build(&args.edges, &args.nodes)?;
    let start = labelled.id(&args.from)?;
    let only = args.to.as_deref().map(|to| labelled.id(to)).transpose()?;

    let limits = ctx.config.limits(args.max_steps, args.max_frontier);
    let engine = TraversalEngine::new(&labelled.graph).with_limits(limits);
    let strategy = args.strategy.strategy();
    let best = engine.optimal_paths_by(start, strategy.as_ref())?;

    tracing::info!(
        "Reached {} nodes from {} using {:?} strategy",
        best.len(),
        args.from,
        args.strategy
    );
    tracing::debug!("Traversal stats: {:?}", best.stats());

    let reports: Vec<PathReport> = best
        .nodes()
        .into_iter()
        .filter(|node| only.map_or(true, |only| only == *node))
        .filter_map(|node| best.get(node))
        .map(|path| PathReport::new(path, labelled.weighted))
        .collect();

    println!("{}", format_reports(&reports, ctx.format));
    Ok(())
}
