//! Value-resolved paths over a graph
//!
//! A [`Path`] is a start node plus a sequence of selector keys. Each key is
//! resolved with [`Graph::neighbor_by_data`] against the node reached so far,
//! so the derived node sequence is always `keys.len() + 1` long. A path
//! borrows its graph, which keeps the graph frozen while the path exists.

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use std::fmt;
use std::iter::Sum;

/// Validated walk through a graph
pub struct Path<'g, D, W = f64> {
    graph: &'g Graph<D, W>,
    keys: Vec<D>,
    nodes: Vec<NodeId>,
}

impl<'g, D, W> Path<'g, D, W>
where
    D: PartialEq + fmt::Debug,
{
    /// Resolve `keys` one by one starting at `start`.
    ///
    /// Fails with [`Error::BrokenPath`] carrying the index of the first key
    /// that has no matching neighbor; no partial path is returned.
    pub fn construct<I>(graph: &'g Graph<D, W>, start: NodeId, keys: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<D>,
    {
        graph.node(start)?;
        let keys: Vec<D> = keys.into_iter().map(Into::into).collect();

        let mut nodes = Vec::with_capacity(keys.len() + 1);
        nodes.push(start);
        let mut current = start;
        for (index, key) in keys.iter().enumerate() {
            current = resolve(graph, current, index, key)?;
            nodes.push(current);
        }

        Ok(Self { graph, keys, nodes })
    }

    /// Zero-length path sitting at `start`
    pub fn empty(graph: &'g Graph<D, W>, start: NodeId) -> Result<Self> {
        graph.node(start)?;
        Ok(Self {
            graph,
            keys: Vec::new(),
            nodes: vec![start],
        })
    }

    /// New path with one more key, resolved against this path's final node
    pub fn extended(&self, key: D) -> Result<Self>
    where
        D: Clone,
    {
        let next = resolve(self.graph, self.final_node(), self.keys.len(), &key)?;

        let mut keys = Vec::with_capacity(self.keys.len() + 1);
        keys.extend(self.keys.iter().cloned());
        keys.push(key);

        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend_from_slice(&self.nodes);
        nodes.push(next);

        Ok(Self {
            graph: self.graph,
            keys,
            nodes,
        })
    }
}

fn resolve<D, W>(graph: &Graph<D, W>, node: NodeId, index: usize, key: &D) -> Result<NodeId>
where
    D: PartialEq + fmt::Debug,
{
    match graph.neighbor_by_data(node, key) {
        Ok(next) => Ok(next),
        Err(Error::NoSuchNeighbor { node, key }) => Err(Error::BrokenPath { index, node, key }),
        Err(other) => Err(other),
    }
}

impl<'g, D, W> Path<'g, D, W> {
    pub fn graph(&self) -> &'g Graph<D, W> {
        self.graph
    }

    pub fn start(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn keys(&self) -> &[D] {
        &self.keys
    }

    /// Resolved node sequence, starting node included
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn final_node(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges walked
    pub fn hops(&self) -> usize {
        self.keys.len()
    }

    /// Data of every node along the path
    pub fn labels(&self) -> Vec<&'g D> {
        let graph = self.graph;
        self.nodes
            .iter()
            .filter_map(|id| graph.data(*id).ok())
            .collect()
    }

    /// Payloads of the edges along the path.
    ///
    /// Steps leaving a plain node carry no payload and are skipped, so a
    /// chain mixing plain and weighted nodes yields fewer payloads than hops.
    pub fn edge_payloads(&self) -> Vec<W>
    where
        W: Clone,
    {
        self.nodes
            .windows(2)
            .filter_map(|pair| self.graph.payload(pair[0], pair[1]).ok().flatten())
            .cloned()
            .collect()
    }

    /// Sum of [`edge_payloads`](Self::edge_payloads)
    pub fn total_weight(&self) -> W
    where
        W: Clone + Sum<W>,
    {
        self.edge_payloads().into_iter().sum()
    }
}

impl<'g, D: Clone, W> Clone for Path<'g, D, W> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            keys: self.keys.clone(),
            nodes: self.nodes.clone(),
        }
    }
}

impl<'g, D, W> PartialEq for Path<'g, D, W> {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl<'g, D, W> Eq for Path<'g, D, W> {}

impl<'g, D: fmt::Debug, W> fmt::Debug for Path<'g, D, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Path")
            .field("keys", &self.keys)
            .field("nodes", &self.nodes)
            .finish()
    }
}

impl<'g, D: fmt::Display, W> fmt::Display for Path<'g, D, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels().into_iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // S -> A -> C -> D, S -> C, A -> D
    fn weighted_graph() -> (Graph<&'static str, f64>, [NodeId; 4]) {
        let mut graph = Graph::new();
        let s = graph.add_weighted_node("S");
        let a = graph.add_weighted_node("A");
        let c = graph.add_weighted_node("C");
        let d = graph.add_weighted_node("D");
        graph.add_weighted_edge(s, a, 1.0).unwrap();
        graph.add_weighted_edge(s, c, 4.0).unwrap();
        graph.add_weighted_edge(a, c, 1.0).unwrap();
        graph.add_weighted_edge(a, d, 5.0).unwrap();
        graph.add_weighted_edge(c, d, 1.0).unwrap();
        (graph, [s, a, c, d])
    }

    #[test]
    fn test_construct_matches_manual_walk() {
        let (graph, [s, a, c, d]) = weighted_graph();
        let path = Path::construct(&graph, s, ["A", "C", "D"]).unwrap();

        assert_eq!(path.nodes(), &[s, a, c, d]);
        assert_eq!(path.nodes().len(), path.keys().len() + 1);
        assert_eq!(path.final_node(), d);
        assert_eq!(path.hops(), 3);
        assert_eq!(path.to_string(), "S -> A -> C -> D");
    }

    #[test]
    fn test_broken_path_reports_first_bad_index() {
        let (graph, [s, a, ..]) = weighted_graph();
        let err = Path::construct(&graph, s, ["A", "S", "D"]).unwrap_err();

        assert_eq!(
            err,
            Error::BrokenPath {
                index: 1,
                node: a,
                key: "\"S\"".to_string()
            }
        );
    }

    #[test]
    fn test_construct_rejects_unknown_start() {
        let (graph, _) = weighted_graph();
        let ghost = NodeId::new(17);
        assert_eq!(
            Path::construct(&graph, ghost, Vec::<&str>::new()).unwrap_err(),
            Error::UnknownNode(ghost)
        );
    }

    #[test]
    fn test_empty_path() {
        let (graph, [s, ..]) = weighted_graph();
        let path = Path::empty(&graph, s).unwrap();

        assert_eq!(path.nodes(), &[s]);
        assert_eq!(path.final_node(), s);
        assert_eq!(path.hops(), 0);
        assert!(path.edge_payloads().is_empty());
        assert_eq!(path.total_weight(), 0.0);
    }

    #[test]
    fn test_extended_resolves_incrementally() {
        let (graph, [s, a, c, _]) = weighted_graph();
        let base = Path::construct(&graph, s, ["A"]).unwrap();
        let longer = base.extended("C").unwrap();

        assert_eq!(longer.nodes(), &[s, a, c]);
        assert_eq!(base.nodes(), &[s, a]);

        let err = base.extended("S").unwrap_err();
        assert!(matches!(err, Error::BrokenPath { index: 1, .. }));
    }

    #[test]
    fn test_edge_payloads() {
        let (graph, [s, ..]) = weighted_graph();
        let path = Path::construct(&graph, s, ["A", "C", "D"]).unwrap();

        assert_eq!(path.edge_payloads(), vec![1.0, 1.0, 1.0]);
        assert_eq!(path.total_weight(), 3.0);
    }

    #[test]
    fn test_mixed_chain_skips_plain_steps() {
        let mut graph: Graph<&str, u32> = Graph::new();
        let a = graph.add_weighted_node("A");
        let b = graph.add_node("B");
        let c = graph.add_weighted_node("C");
        let d = graph.add_node("D");
        graph.add_weighted_edge(a, b, 2).unwrap();
        graph.add_edge(b, c).unwrap();
        graph.add_weighted_edge(c, d, 5).unwrap();

        let path = Path::construct(&graph, a, ["B", "C", "D"]).unwrap();
        assert_eq!(path.edge_payloads(), vec![2, 5]);
        assert_eq!(path.total_weight(), 7);
    }

    #[test]
    fn test_equality_is_node_sequence() {
        let (graph, [s, ..]) = weighted_graph();
        let left = Path::construct(&graph, s, ["A", "D"]).unwrap();
        let right = Path::construct(&graph, s, ["A"]).unwrap().extended("D").unwrap();
        let other = Path::construct(&graph, s, ["C", "D"]).unwrap();

        assert_eq!(left, right);
        assert_ne!(left, other);
    }
}
