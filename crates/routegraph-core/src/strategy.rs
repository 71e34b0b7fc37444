//! Path comparison strategies for the best-path accumulator
//!
//! A strategy looks at the best path recorded for a node and a newly found
//! candidate reaching the same node, and decides which one to keep. It must be
//! pure: the same two paths always produce the same [`Choice`].
//!
//! The accumulator only converges when the strategy is monotonic along a path
//! (e.g. minimising non-negative additive costs). A strategy that keeps
//! preferring longer walks around a cycle never settles; traversal limits are
//! the only thing that stops it.

use crate::path::Path;
use std::iter::Sum;

/// Outcome of comparing the recorded best path with a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Keep the recorded path; the candidate is not expanded further
    Current,
    /// Replace the recorded path with the candidate and expand it
    Candidate,
}

/// Rule for picking the better of two paths ending at the same node
pub trait PathStrategy<D, W> {
    fn choose(&self, current: &Path<'_, D, W>, candidate: &Path<'_, D, W>) -> Choice;
}

impl<D, W, F> PathStrategy<D, W> for F
where
    F: Fn(&Path<'_, D, W>, &Path<'_, D, W>) -> Choice,
{
    fn choose(&self, current: &Path<'_, D, W>, candidate: &Path<'_, D, W>) -> Choice {
        self(current, candidate)
    }
}

/// Use a comparison function as a [`PathStrategy`].
///
/// The bound pins the closure's signature, so parameter types need no
/// annotations at the call site.
pub fn from_fn<D, W, F>(choose: F) -> F
where
    F: Fn(&Path<'_, D, W>, &Path<'_, D, W>) -> Choice,
{
    choose
}

/// Prefer the smaller sum of edge payloads. Ties keep the recorded path.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinTotalWeight;

impl<D, W> PathStrategy<D, W> for MinTotalWeight
where
    W: Clone + Sum<W> + PartialOrd,
{
    fn choose(&self, current: &Path<'_, D, W>, candidate: &Path<'_, D, W>) -> Choice {
        if candidate.total_weight() < current.total_weight() {
            Choice::Candidate
        } else {
            Choice::Current
        }
    }
}

/// Prefer the larger sum of edge payloads. Ties keep the recorded path.
///
/// Only converges on graphs without a cycle reachable from the start.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxTotalWeight;

impl<D, W> PathStrategy<D, W> for MaxTotalWeight
where
    W: Clone + Sum<W> + PartialOrd,
{
    fn choose(&self, current: &Path<'_, D, W>, candidate: &Path<'_, D, W>) -> Choice {
        if candidate.total_weight() > current.total_weight() {
            Choice::Candidate
        } else {
            Choice::Current
        }
    }
}

/// Prefer fewer edges, ignoring payloads
#[derive(Debug, Clone, Copy, Default)]
pub struct FewestHops;

impl<D, W> PathStrategy<D, W> for FewestHops {
    fn choose(&self, current: &Path<'_, D, W>, candidate: &Path<'_, D, W>) -> Choice {
        if candidate.hops() < current.hops() {
            Choice::Candidate
        } else {
            Choice::Current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_builtin_strategies() {
        let mut graph: Graph<&str, u32> = Graph::new();
        let s = graph.add_weighted_node("S");
        let a = graph.add_weighted_node("A");
        let t = graph.add_weighted_node("T");
        graph.add_weighted_edge(s, t, 10).unwrap();
        graph.add_weighted_edge(s, a, 1).unwrap();
        graph.add_weighted_edge(a, t, 2).unwrap();

        let direct = Path::construct(&graph, s, ["T"]).unwrap();
        let detour = Path::construct(&graph, s, ["A", "T"]).unwrap();

        assert_eq!(MinTotalWeight.choose(&direct, &detour), Choice::Candidate);
        assert_eq!(MaxTotalWeight.choose(&direct, &detour), Choice::Current);
        assert_eq!(FewestHops.choose(&direct, &detour), Choice::Current);
        assert_eq!(FewestHops.choose(&detour, &direct), Choice::Candidate);
    }

    #[test]
    fn test_closure_strategy() {
        let mut graph: Graph<&str, u32> = Graph::new();
        let s = graph.add_weighted_node("S");
        let a = graph.add_weighted_node("A");
        let t = graph.add_weighted_node("T");
        graph.add_weighted_edge(s, t, 10).unwrap();
        graph.add_weighted_edge(s, a, 1).unwrap();
        graph.add_weighted_edge(a, t, 2).unwrap();

        let direct = Path::construct(&graph, s, ["T"]).unwrap();
        let detour = Path::construct(&graph, s, ["A", "T"]).unwrap();

        let longer = from_fn::<&str, u32, _>(|current, candidate| {
            if candidate.hops() > current.hops() {
                Choice::Candidate
            } else {
                Choice::Current
            }
        });
        assert_eq!(longer.choose(&direct, &detour), Choice::Candidate);
        assert_eq!(longer.choose(&detour, &direct), Choice::Current);

        let boxed: Box<dyn PathStrategy<&str, u32>> = Box::new(longer);
        assert_eq!(boxed.choose(&direct, &detour), Choice::Candidate);
    }

    #[test]
    fn test_ties_keep_current() {
        let mut graph: Graph<&str, u32> = Graph::new();
        let s = graph.add_weighted_node("S");
        let a = graph.add_weighted_node("A");
        let b = graph.add_weighted_node("B");
        let t = graph.add_weighted_node("T");
        graph.add_weighted_edge(s, a, 1).unwrap();
        graph.add_weighted_edge(s, b, 1).unwrap();
        graph.add_weighted_edge(a, t, 1).unwrap();
        graph.add_weighted_edge(b, t, 1).unwrap();

        let via_a = Path::construct(&graph, s, ["A", "T"]).unwrap();
        let via_b = Path::construct(&graph, s, ["B", "T"]).unwrap();

        assert_eq!(MinTotalWeight.choose(&via_a, &via_b), Choice::Current);
        assert_eq!(MaxTotalWeight.choose(&via_a, &via_b), Choice::Current);
        assert_eq!(FewestHops.choose(&via_a, &via_b), Choice::Current);
    }
}
