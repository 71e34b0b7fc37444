//! Building a labelled graph from `FROM:TO[:WEIGHT]` arguments

use std::str::FromStr;

use routegraph_core::{Graph, NodeId};

/// One directed edge given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSpec {
    pub from: String,
    pub to: String,
    pub weight: Option<f64>,
}

impl FromStr for EdgeSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let (from, to, weight) = match parts.as_slice() {
            [from, to] => (*from, *to, None),
            [from, to, weight] => {
                let weight: f64 = weight
                    .parse()
                    .map_err(|_| format!("Invalid edge weight '{}' in '{}'", weight, s))?;
                (*from, *to, Some(weight))
            }
            _ => return Err(format!("Invalid edge '{}': expected FROM:TO[:WEIGHT]", s)),
        };

        if from.is_empty() || to.is_empty() {
            return Err(format!("Invalid edge '{}': node labels cannot be empty", s));
        }

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        })
    }
}

/// Graph whose node data are unique labels
pub struct LabelledGraph {
    pub graph: Graph<String, f64>,
    pub weighted: bool,
}

impl LabelledGraph {
    /// Build the graph. It is weighted as soon as one edge carries a weight;
    /// edges without one then default to `1.0`.
    pub fn build(edges: &[EdgeSpec], extra_nodes: &[String]) -> anyhow::Result<Self> {
        let weighted = edges.iter().any(|edge| edge.weight.is_some());
        let mut graph: Graph<String, f64> = Graph::new();

        let labels = edges
            .iter()
            .flat_map(|edge| [&edge.from, &edge.to])
            .chain(extra_nodes.iter());
        for label in labels {
            if graph.find_by_data(label.as_str()).is_none() {
                if weighted {
                    graph.add_weighted_node(label.clone());
                } else {
                    graph.add_node(label.clone());
                }
            }
        }

        let mut labelled = Self { graph, weighted };
        for edge in edges {
            let (from, to) = (labelled.id(&edge.from)?, labelled.id(&edge.to)?);
            if weighted {
                labelled
                    .graph
                    .add_weighted_edge(from, to, edge.weight.unwrap_or(1.0))?;
            } else {
                labelled.graph.add_edge(from, to)?;
            }
        }

        tracing::debug!(
            "Built {} graph with {} nodes and {} edges",
            if weighted { "weighted" } else { "plain" },
            labelled.graph.len(),
            edges.len()
        );

        Ok(labelled)
    }

    /// Node carrying `label`; labels are unique, so this is the only match
    pub fn id(&self, label: &str) -> anyhow::Result<NodeId> {
        self.graph
            .find_by_data(label)
            .ok_or_else(|| anyhow::anyhow!("Unknown node '{}'", label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_edge_spec() {
        let plain: EdgeSpec = "A:B".parse().unwrap();
        assert_eq!(plain.weight, None);

        let weighted: EdgeSpec = "A:B:2.5".parse().unwrap();
        assert_eq!(weighted.from, "A");
        assert_eq!(weighted.to, "B");
        assert_eq!(weighted.weight, Some(2.5));

        assert!("A".parse::<EdgeSpec>().is_err());
        assert!("A:B:heavy".parse::<EdgeSpec>().is_err());
        assert!(":B".parse::<EdgeSpec>().is_err());
        assert!("A:B:1:2".parse::<EdgeSpec>().is_err());
    }

    #[test]
    fn test_build_weighted_when_any_weight() {
        let edges: Vec<EdgeSpec> = ["S:A:2", "A:T"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let labelled = LabelledGraph::build(&edges, &["Z".to_string()]).unwrap();

        assert!(labelled.weighted);
        assert_eq!(labelled.graph.len(), 4);

        let (a, t) = (labelled.id("A").unwrap(), labelled.id("T").unwrap());
        assert_eq!(labelled.graph.payload(a, t).unwrap(), Some(&1.0));
        assert!(labelled.id("Q").is_err());
    }

    #[test]
    fn test_build_reuses_repeated_labels() {
        let edges: Vec<EdgeSpec> = ["A:B", "B:C", "C:A"].iter().map(|s| s.parse().unwrap()).collect();
        let labelled = LabelledGraph::build(&edges, &["A".to_string()]).unwrap();

        assert_eq!(labelled.graph.len(), 3);
        let (a, b) = (labelled.id("A").unwrap(), labelled.id("B").unwrap());
        assert_eq!(labelled.graph.data(a).unwrap(), "A");
        assert!(labelled.graph.node(a).unwrap().has_edge(b));
    }

    #[test]
    fn test_build_plain() {
        let edges: Vec<EdgeSpec> = ["A:B", "B:A"].iter().map(|s| s.parse().unwrap()).collect();
        let labelled = LabelledGraph::build(&edges, &[]).unwrap();

        assert!(!labelled.weighted);
        let a = labelled.id("A").unwrap();
        assert_eq!(labelled.graph.payload(a, labelled.id("B").unwrap()).unwrap(), None);
    }
}
