//! Graph traversal algorithms

use crate::error::Result;
use crate::graph::{Graph, NodeId};
use crate::limits::TraversalLimits;
use crate::path::Path;
use crate::queue::WorkQueue;
use crate::strategy::{Choice, MinTotalWeight, PathStrategy};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::iter::Sum;

/// Traversal statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub paths_dequeued: usize,
    pub paths_enqueued: usize,
    /// Times a recorded best path was replaced by a candidate
    pub improvements: usize,
    pub max_frontier: usize,
}

/// Best known path for every node reached from a start node
#[derive(Debug)]
pub struct OptimalPaths<'g, D, W = f64> {
    start: NodeId,
    best: HashMap<NodeId, Path<'g, D, W>>,
    stats: TraversalStats,
}

impl<'g, D, W> OptimalPaths<'g, D, W> {
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Best path to `node`, `None` if the node was never reached
    pub fn get(&self, node: NodeId) -> Option<&Path<'g, D, W>> {
        self.best.get(&node)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.best.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// Reached nodes in arena order
    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.best.keys().copied().collect();
        nodes.sort();
        nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Path<'g, D, W>)> {
        self.best.iter().map(|(node, path)| (*node, path))
    }

    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    pub fn into_map(self) -> HashMap<NodeId, Path<'g, D, W>> {
        self.best
    }
}

/// Graph traversal engine
///
/// Holds a shared borrow of the graph, so the graph cannot change while the
/// engine or any path it produced is alive. A new engine runs without limits;
/// use [`TraversalEngine::with_limits`] to bound it.
pub struct TraversalEngine<'g, D, W = f64> {
    graph: &'g Graph<D, W>,
    limits: TraversalLimits,
}

impl<'g, D, W> TraversalEngine<'g, D, W>
where
    D: Clone + PartialEq + fmt::Debug,
{
    pub fn new(graph: &'g Graph<D, W>) -> Self {
        Self {
            graph,
            limits: TraversalLimits::unbounded(),
        }
    }

    pub fn with_limits(mut self, limits: TraversalLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> TraversalLimits {
        self.limits
    }

    /// Breadth-first search for the path with the fewest edges from `start`
    /// to `target`.
    ///
    /// `target` is matched by identity. The start node itself is only a hit
    /// when a cycle leads back to it. Nodes are marked as seen when first
    /// enqueued, which keeps the search finite on cyclic graphs without
    /// affecting minimality. Returns `Ok(None)` when the target is unreachable.
    pub fn shortest_hop_path(
        &self,
        start: NodeId,
        target: NodeId,
    ) -> Result<Option<Path<'g, D, W>>> {
        tracing::debug!("Executing shortest-hop search: start={}, target={}", start, target);

        self.graph.node(target)?;
        let origin = Path::empty(self.graph, start)?;

        let mut seen: HashSet<NodeId> = HashSet::new();
        let mut frontier = WorkQueue::new();
        let mut stats = TraversalStats::default();

        self.enqueue_unseen(&origin, &mut seen, &mut frontier, &mut stats)?;

        while !frontier.is_empty() {
            let path = frontier.dequeue()?;
            stats.paths_dequeued += 1;
            self.limits.check_steps(stats.paths_dequeued)?;

            if path.final_node() == target {
                tracing::debug!(
                    "Shortest-hop search found path of {} hops after {} steps",
                    path.hops(),
                    stats.paths_dequeued
                );
                return Ok(Some(path));
            }

            self.enqueue_unseen(&path, &mut seen, &mut frontier, &mut stats)?;
        }

        tracing::debug!(
            "Shortest-hop search exhausted frontier: dequeued={}, enqueued={}",
            stats.paths_dequeued,
            stats.paths_enqueued
        );
        Ok(None)
    }

    fn enqueue_unseen(
        &self,
        path: &Path<'g, D, W>,
        seen: &mut HashSet<NodeId>,
        frontier: &mut WorkQueue<Path<'g, D, W>>,
        stats: &mut TraversalStats,
    ) -> Result<()> {
        for next in self.extensions(path)? {
            if seen.insert(next.final_node()) {
                frontier.enqueue(next);
                stats.paths_enqueued += 1;
            }
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
        self.limits.check_frontier(frontier.len())
    }

    /// Best path to every node reachable from `start`, minimising the sum of
    /// edge payloads
    pub fn optimal_paths(&self, start: NodeId) -> Result<OptimalPaths<'g, D, W>>
    where
        W: Clone + Sum<W> + PartialOrd,
    {
        self.optimal_paths_by(start, &MinTotalWeight)
    }

    /// Best path to every node reachable from `start` under `strategy`
    pub fn optimal_paths_by<S>(&self, start: NodeId, strategy: &S) -> Result<OptimalPaths<'g, D, W>>
    where
        S: PathStrategy<D, W> + ?Sized,
    {
        self.accumulate(start, |current, candidate| {
            strategy.choose(current, candidate)
        })
    }

    /// Best path to every node reachable from `start`, using a plain
    /// comparison function as the strategy
    pub fn optimal_paths_with<F>(&self, start: NodeId, choose: F) -> Result<OptimalPaths<'g, D, W>>
    where
        F: Fn(&Path<'g, D, W>, &Path<'g, D, W>) -> Choice,
    {
        self.accumulate(start, choose)
    }

    fn accumulate<F>(&self, start: NodeId, choose: F) -> Result<OptimalPaths<'g, D, W>>
    where
        F: Fn(&Path<'g, D, W>, &Path<'g, D, W>) -> Choice,
    {
        tracing::debug!("Executing best-path accumulation: start={}", start);

        let mut best: HashMap<NodeId, Path<'g, D, W>> = HashMap::new();
        let mut frontier = WorkQueue::new();
        let mut stats = TraversalStats::default();

        frontier.enqueue(Path::empty(self.graph, start)?);
        stats.paths_enqueued = 1;

        while !frontier.is_empty() {
            let candidate = frontier.dequeue()?;
            stats.paths_dequeued += 1;
            self.limits.check_steps(stats.paths_dequeued)?;

            let node = candidate.final_node();
            let active = match best.get(&node) {
                None => true,
                Some(current) => choose(current, &candidate) == Choice::Candidate,
            };
            if !active {
                continue;
            }

            let extensions = self.extensions(&candidate)?;
            tracing::trace!(
                "Recording best path to {} ({} hops), {} extensions",
                node,
                candidate.hops(),
                extensions.len()
            );
            if best.insert(node, candidate).is_some() {
                stats.improvements += 1;
            }

            stats.paths_enqueued += extensions.len();
            frontier.enqueue_all(extensions);
            stats.max_frontier = stats.max_frontier.max(frontier.len());
            self.limits.check_frontier(frontier.len())?;
        }

        tracing::debug!(
            "Best-path accumulation reached {} nodes: dequeued={}, improvements={}",
            best.len(),
            stats.paths_dequeued,
            stats.improvements
        );

        Ok(OptimalPaths { start, best, stats })
    }

    /// One extension of `path` per outgoing edge of its final node, keyed by
    /// the neighbor's data.
    ///
    /// Each extension re-resolves its key against the whole edge list, so a
    /// node of degree `d` costs O(d²) data comparisons to expand. That is what
    /// keeps a later sibling with duplicate data shadowed by the first one.
    fn extensions(&self, path: &Path<'g, D, W>) -> Result<Vec<Path<'g, D, W>>> {
        let node = self.graph.node(path.final_node())?;
        node.edge_store()
            .targets()
            .map(|next| {
                let key = self.graph.data(next)?.clone();
                path.extended(key)
            })
            .collect()
    }
}

/// Shortest-hop search without traversal limits
pub fn shortest_hop_path<'g, D, W>(
    graph: &'g Graph<D, W>,
    start: NodeId,
    target: NodeId,
) -> Result<Option<Path<'g, D, W>>>
where
    D: Clone + PartialEq + fmt::Debug,
{
    TraversalEngine::new(graph).shortest_hop_path(start, target)
}

/// Minimum-total-weight paths without traversal limits
pub fn optimal_paths<'g, D, W>(graph: &'g Graph<D, W>, start: NodeId) -> Result<OptimalPaths<'g, D, W>>
where
    D: Clone + PartialEq + fmt::Debug,
    W: Clone + Sum<W> + PartialOrd,
{
    TraversalEngine::new(graph).optimal_paths(start)
}

/// Strategy-driven best paths without traversal limits
pub fn optimal_paths_by<'g, D, W, S>(
    graph: &'g Graph<D, W>,
    start: NodeId,
    strategy: &S,
) -> Result<OptimalPaths<'g, D, W>>
where
    D: Clone + PartialEq + fmt::Debug,
    S: PathStrategy<D, W> + ?Sized,
{
    TraversalEngine::new(graph).optimal_paths_by(start, strategy)
}

/// Best paths chosen by a plain comparison function, without traversal limits
pub fn optimal_paths_with<'g, D, W, F>(
    graph: &'g Graph<D, W>,
    start: NodeId,
    choose: F,
) -> Result<OptimalPaths<'g, D, W>>
where
    D: Clone + PartialEq + fmt::Debug,
    F: Fn(&Path<'g, D, W>, &Path<'g, D, W>) -> Choice,
{
    TraversalEngine::new(graph).optimal_paths_with(start, choose)
}
