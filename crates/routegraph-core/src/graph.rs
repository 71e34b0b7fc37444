//! Arena-backed directed graph with plain and weighted nodes
//!
//! Nodes live in a [`Graph`] arena and are addressed by [`NodeId`] handles.
//! Edge membership is decided by handle identity: two nodes carrying equal
//! data are still distinct vertices. Neighbor lookup by key
//! ([`Graph::neighbor_by_data`]) compares data by value and returns the
//! first-inserted matching neighbor, so siblings with duplicate data shadow
//! each other for value lookups.

use crate::error::{Error, Result};
use std::borrow::Borrow;
use std::fmt;

/// Handle to a node stored in a [`Graph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Edge storage variant chosen when a node is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Plain,
    Weighted,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Weighted => write!(f, "weighted"),
        }
    }
}

/// Outgoing edge as seen in an edge snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<W> {
    pub to: NodeId,
    /// Payload for weighted nodes, `None` for plain ones
    pub payload: Option<W>,
}

/// Outgoing edges of a node, in insertion order
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeStore<W> {
    Plain(Vec<NodeId>),
    Weighted(Vec<(NodeId, W)>),
}

impl<W> EdgeStore<W> {
    fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Plain => Self::Plain(Vec::new()),
            NodeKind::Weighted => Self::Weighted(Vec::new()),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Plain(_) => NodeKind::Plain,
            Self::Weighted(_) => NodeKind::Weighted,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Plain(targets) => targets.len(),
            Self::Weighted(targets) => targets.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, to: NodeId) -> bool {
        self.targets().any(|target| target == to)
    }

    /// Neighbor handles in insertion order
    pub fn targets(&self) -> impl Iterator<Item = NodeId> + '_ {
        let (plain, weighted) = match self {
            Self::Plain(targets) => (Some(targets.iter().copied()), None),
            Self::Weighted(targets) => (None, Some(targets.iter().map(|(to, _)| *to))),
        };
        plain
            .into_iter()
            .flatten()
            .chain(weighted.into_iter().flatten())
    }

    /// Payload of the edge to `to`; always `None` for plain storage
    pub fn payload(&self, to: NodeId) -> Option<&W> {
        match self {
            Self::Plain(_) => None,
            Self::Weighted(targets) => targets
                .iter()
                .find(|(target, _)| *target == to)
                .map(|(_, payload)| payload),
        }
    }

    fn remove(&mut self, to: NodeId) -> bool {
        match self {
            Self::Plain(targets) => match targets.iter().position(|t| *t == to) {
                Some(pos) => {
                    targets.remove(pos);
                    true
                }
                None => false,
            },
            Self::Weighted(targets) => match targets.iter().position(|(t, _)| *t == to) {
                Some(pos) => {
                    targets.remove(pos);
                    true
                }
                None => false,
            },
        }
    }
}

impl<W: Clone> EdgeStore<W> {
    /// Copy of the current edges, detached from later mutation
    pub fn snapshot(&self) -> Vec<Edge<W>> {
        match self {
            Self::Plain(targets) => targets
                .iter()
                .map(|to| Edge {
                    to: *to,
                    payload: None,
                })
                .collect(),
            Self::Weighted(targets) => targets
                .iter()
                .map(|(to, payload)| Edge {
                    to: *to,
                    payload: Some(payload.clone()),
                })
                .collect(),
        }
    }
}

/// A vertex: caller data plus outgoing edges
#[derive(Debug, Clone)]
pub struct Node<D, W> {
    data: D,
    edges: EdgeStore<W>,
}

impl<D, W> Node<D, W> {
    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn kind(&self) -> NodeKind {
        self.edges.kind()
    }

    pub fn edge_store(&self) -> &EdgeStore<W> {
        &self.edges
    }

    pub fn has_edge(&self, to: NodeId) -> bool {
        self.edges.contains(to)
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

impl<D, W: Clone> Node<D, W> {
    pub fn edges(&self) -> Vec<Edge<W>> {
        self.edges.snapshot()
    }
}

impl<D: fmt::Display, W> fmt::Display for Node<D, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.edges.is_empty() {
            return write!(f, "{}.", self.data);
        }
        write!(f, "{}{{", self.data)?;
        for (i, target) in self.edges.targets().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", target)?;
        }
        write!(f, "}}")
    }
}

/// Node arena
///
/// Nodes are never removed, so every [`NodeId`] handed out by a graph stays
/// valid for that graph's lifetime.
#[derive(Debug, Clone)]
pub struct Graph<D, W = f64> {
    nodes: Vec<Node<D, W>>,
}

impl<D, W> Default for Graph<D, W> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<D, W> Graph<D, W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Add a node whose edges carry no payload
    pub fn add_node(&mut self, data: D) -> NodeId {
        self.push(data, NodeKind::Plain)
    }

    /// Add a node whose edges carry a payload
    pub fn add_weighted_node(&mut self, data: D) -> NodeId {
        self.push(data, NodeKind::Weighted)
    }

    /// Add a plain node already linked to `neighbors`.
    ///
    /// Every neighbor is checked before the node is created, so a bad handle
    /// leaves the graph untouched.
    pub fn add_node_linked(
        &mut self,
        data: D,
        neighbors: impl IntoIterator<Item = NodeId>,
    ) -> Result<NodeId> {
        let neighbors: Vec<NodeId> = neighbors.into_iter().collect();
        for neighbor in &neighbors {
            self.node(*neighbor)?;
        }

        let id = self.add_node(data);
        for neighbor in neighbors {
            self.add_edge(id, neighbor)?;
        }
        Ok(id)
    }

    fn push(&mut self, data: D, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            edges: EdgeStore::for_kind(kind),
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node<D, W>> {
        self.nodes.get(id.0).ok_or(Error::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node<D, W>> {
        self.nodes.get_mut(id.0).ok_or(Error::UnknownNode(id))
    }

    pub fn data(&self, id: NodeId) -> Result<&D> {
        Ok(self.node(id)?.data())
    }

    /// Link `from` to `to` on a plain node. Re-adding an existing edge is a no-op.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        self.node(to)?;
        let node = self.node_mut(from)?;
        match &mut node.edges {
            EdgeStore::Plain(targets) => {
                if !targets.contains(&to) {
                    targets.push(to);
                }
            }
            EdgeStore::Weighted(_) => {
                return Err(Error::EdgeKindMismatch {
                    node: from,
                    kind: NodeKind::Weighted,
                })
            }
        }
        tracing::trace!("Added edge {} -> {}", from, to);
        Ok(())
    }

    /// Link `from` to `to` on a weighted node, overwriting any existing payload
    pub fn add_weighted_edge(&mut self, from: NodeId, to: NodeId, payload: W) -> Result<()> {
        self.node(to)?;
        let node = self.node_mut(from)?;
        match &mut node.edges {
            EdgeStore::Weighted(targets) => {
                match targets.iter_mut().find(|(target, _)| *target == to) {
                    Some((_, slot)) => *slot = payload,
                    None => targets.push((to, payload)),
                }
            }
            EdgeStore::Plain(_) => {
                return Err(Error::EdgeKindMismatch {
                    node: from,
                    kind: NodeKind::Plain,
                })
            }
        }
        tracing::trace!("Added weighted edge {} -> {}", from, to);
        Ok(())
    }

    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let node = self.node_mut(from)?;
        if !node.edges.remove(to) {
            return Err(Error::MissingEdge { from, to });
        }
        tracing::trace!("Removed edge {} -> {}", from, to);
        Ok(())
    }

    /// Payload of the edge `from -> to`, `None` when `from` is a plain node
    pub fn payload(&self, from: NodeId, to: NodeId) -> Result<Option<&W>> {
        let node = self.node(from)?;
        if !node.has_edge(to) {
            return Err(Error::MissingEdge { from, to });
        }
        Ok(node.edges.payload(to))
    }

    /// First outgoing neighbor of `id` whose data equals `key`
    pub fn neighbor_by_data<Q>(&self, id: NodeId, key: &Q) -> Result<NodeId>
    where
        D: Borrow<Q>,
        Q: PartialEq + fmt::Debug + ?Sized,
    {
        let node = self.node(id)?;
        node.edges
            .targets()
            .find(|target| {
                let data: &Q = self.nodes[target.0].data.borrow();
                data == key
            })
            .ok_or_else(|| Error::NoSuchNeighbor {
                node: id,
                key: format!("{:?}", key),
            })
    }

    /// First node in the arena whose data equals `key`
    pub fn find_by_data<Q>(&self, key: &Q) -> Option<NodeId>
    where
        D: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.nodes
            .iter()
            .position(|node| {
                let data: &Q = node.data.borrow();
                data == key
            })
            .map(NodeId)
    }
}

impl<D, W: Clone> Graph<D, W> {
    /// Snapshot of the outgoing edges of `id`
    pub fn edges(&self, id: NodeId) -> Result<Vec<Edge<W>>> {
        Ok(self.node(id)?.edges())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_edge() {
        let mut graph: Graph<&str> = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");

        graph.add_edge(a, b).unwrap();
        assert!(graph.node(a).unwrap().has_edge(b));

        graph.remove_edge(a, b).unwrap();
        assert!(graph.edges(a).unwrap().is_empty());

        let err = graph.remove_edge(a, b).unwrap_err();
        assert_eq!(err, Error::MissingEdge { from: a, to: b });
    }

    #[test]
    fn test_plain_edges_are_a_set() {
        let mut graph: Graph<&str> = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");

        graph.add_edge(a, b).unwrap();
        graph.add_edge(a, b).unwrap();

        assert_eq!(graph.node(a).unwrap().degree(), 1);
    }

    #[test]
    fn test_weighted_edge_overwrites_payload() {
        let mut graph: Graph<&str, f64> = Graph::new();
        let a = graph.add_weighted_node("A");
        let b = graph.add_node("B");

        graph.add_weighted_edge(a, b, 2.0).unwrap();
        graph.add_weighted_edge(a, b, 7.5).unwrap();

        let edges = graph.edges(a).unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].payload, Some(7.5));
        assert_eq!(graph.payload(a, b).unwrap(), Some(&7.5));
    }

    #[test]
    fn test_edge_kind_mismatch() {
        let mut graph: Graph<&str, u32> = Graph::new();
        let plain = graph.add_node("P");
        let weighted = graph.add_weighted_node("W");

        assert_eq!(
            graph.add_weighted_edge(plain, weighted, 1),
            Err(Error::EdgeKindMismatch {
                node: plain,
                kind: NodeKind::Plain
            })
        );
        assert_eq!(
            graph.add_edge(weighted, plain),
            Err(Error::EdgeKindMismatch {
                node: weighted,
                kind: NodeKind::Weighted
            })
        );
    }

    #[test]
    fn test_edge_change_does_not_touch_neighbor() {
        let mut graph: Graph<&str> = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(b, a).unwrap();

        graph.add_edge(a, b).unwrap();
        graph.remove_edge(a, b).unwrap();

        assert!(graph.node(b).unwrap().has_edge(a));
    }

    #[test]
    fn test_edges_snapshot_is_detached() {
        let mut graph: Graph<&str> = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        let c = graph.add_node("C");
        graph.add_edge(a, b).unwrap();

        let snapshot = graph.edges(a).unwrap();
        graph.add_edge(a, c).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(graph.edges(a).unwrap().len(), 2);
    }

    #[test]
    fn test_neighbor_by_data() {
        let mut graph: Graph<String> = Graph::new();
        let a = graph.add_node("A".to_string());
        let b = graph.add_node("B".to_string());
        graph.add_edge(a, b).unwrap();

        assert_eq!(graph.neighbor_by_data(a, "B").unwrap(), b);

        let err = graph.neighbor_by_data(a, "Z").unwrap_err();
        assert_eq!(
            err,
            Error::NoSuchNeighbor {
                node: a,
                key: "\"Z\"".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_sibling_data_first_inserted_wins() {
        let mut graph: Graph<&str> = Graph::new();
        let a = graph.add_node("A");
        let first = graph.add_node("X");
        let second = graph.add_node("X");
        graph.add_edge(a, first).unwrap();
        graph.add_edge(a, second).unwrap();

        // Both are distinct edges, but lookup resolves to the first one.
        assert_eq!(graph.node(a).unwrap().degree(), 2);
        assert_eq!(graph.neighbor_by_data(a, &"X").unwrap(), first);

        graph.remove_edge(a, first).unwrap();
        assert_eq!(graph.neighbor_by_data(a, &"X").unwrap(), second);
    }

    #[test]
    fn test_unknown_node() {
        let mut graph: Graph<&str> = Graph::new();
        let a = graph.add_node("A");
        let ghost = NodeId::new(42);

        assert_eq!(graph.add_edge(a, ghost), Err(Error::UnknownNode(ghost)));
        assert!(graph.edges(a).unwrap().is_empty());
        assert!(graph.data(ghost).is_err());
    }

    #[test]
    fn test_add_node_linked_is_atomic() {
        let mut graph: Graph<&str> = Graph::new();
        let b = graph.add_node("B");
        let c = graph.add_node("C");

        let a = graph.add_node_linked("A", [b, c]).unwrap();
        assert_eq!(graph.node(a).unwrap().degree(), 2);

        let before = graph.len();
        assert!(graph.add_node_linked("D", [b, NodeId::new(99)]).is_err());
        assert_eq!(graph.len(), before);
    }

    #[test]
    fn test_find_by_data() {
        let mut graph: Graph<String> = Graph::new();
        graph.add_node("A".to_string());
        let b = graph.add_node("B".to_string());

        assert_eq!(graph.find_by_data("B"), Some(b));
        assert_eq!(graph.find_by_data("Q"), None);
    }

    #[test]
    fn test_node_display() {
        let mut graph: Graph<&str> = Graph::new();
        let a = graph.add_node("A");
        let b = graph.add_node("B");
        graph.add_edge(a, b).unwrap();

        assert_eq!(graph.node(a).unwrap().to_string(), "A{#1}");
        assert_eq!(graph.node(b).unwrap().to_string(), "B.");
    }
}
