//! Weighted undirected network graph
//!
//! Thin wrapper around a petgraph [`UnGraph`] keyed by caller-supplied
//! [`NodeId`]s. The graph is simple (re-inserting an edge updates its
//! attributes) and immutable for the duration of any solve; solvers only
//! ever hold a shared reference or an owned bandwidth-filtered copy.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::types::{NodeId, Path};

/// Per-node QoS attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
    /// Processing delay applied when traffic transits this node, ms.
    pub processing_delay: f64,
    /// Node reliability, in (0, 1].
    pub reliability: f64,
}

/// Per-link QoS attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkAttrs {
    /// Propagation delay of the link, ms.
    pub delay: f64,
    /// Link capacity, Mbps. Must be positive.
    pub bandwidth: f64,
    /// Link reliability, in (0, 1].
    pub reliability: f64,
}

/// Undirected, simple, attribute-weighted network graph
#[derive(Debug, Clone, Default)]
pub struct Network {
    pub(crate) graph: UnGraph<(NodeId, NodeAttrs), LinkAttrs>,
    pub(crate) index: HashMap<NodeId, NodeIndex>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Re-adding an existing id replaces its attributes.
    pub fn add_node(&mut self, id: NodeId, attrs: NodeAttrs) {
        match self.index.get(&id) {
            Some(&ix) => self.graph[ix] = (id, attrs),
            None => {
                let ix = self.graph.add_node((id, attrs));
                self.index.insert(id, ix);
            }
        }
    }

    /// Add an undirected link between two existing nodes.
    ///
    /// Re-adding an existing link replaces its attributes, keeping the graph
    /// simple. Self-loops are rejected.
    pub fn add_link(&mut self, a: NodeId, b: NodeId, attrs: LinkAttrs) -> Result<()> {
        if a == b {
            return Err(RouteError::InvalidQuery(format!(
                "self-loop on node {a} is not allowed"
            )));
        }
        let ia = *self
            .index
            .get(&a)
            .ok_or(RouteError::NodeNotFound(a))?;
        let ib = *self
            .index
            .get(&b)
            .ok_or(RouteError::NodeNotFound(b))?;
        self.graph.update_edge(ia, ib, attrs);
        Ok(())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Attributes of a node, if present.
    pub fn node(&self, id: NodeId) -> Option<&NodeAttrs> {
        self.index.get(&id).map(|&ix| &self.graph[ix].1)
    }

    /// Attributes of the link between `a` and `b`, if present.
    pub fn link(&self, a: NodeId, b: NodeId) -> Option<&LinkAttrs> {
        let ia = *self.index.get(&a)?;
        let ib = *self.index.get(&b)?;
        let edge = self.graph.find_edge(ia, ib)?;
        self.graph.edge_weight(edge)
    }

    /// All node ids, in insertion order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.graph.node_weights().map(|(id, _)| *id).collect()
    }

    /// All links as `(a, b, attrs)` triples, in insertion order.
    pub fn links(&self) -> Vec<(NodeId, NodeId, LinkAttrs)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].0,
                    self.graph[edge.target()].0,
                    *edge.weight(),
                )
            })
            .collect()
    }

    /// Neighbors of a node. Empty when the node is unknown or isolated.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        match self.index.get(&id) {
            Some(&ix) => self
                .graph
                .neighbors(ix)
                .map(|nix| self.graph[nix].0)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Bandwidth admission filter: a copy of this network keeping every node
    /// but only the links with `bandwidth >= min_bandwidth`.
    pub fn filtered(&self, min_bandwidth: f64) -> Network {
        let mut out = Network::new();
        for (id, attrs) in self.graph.node_weights() {
            out.add_node(*id, *attrs);
        }
        for edge in self.graph.edge_references() {
            let attrs = *edge.weight();
            if attrs.bandwidth >= min_bandwidth {
                let a = self.graph[edge.source()].0;
                let b = self.graph[edge.target()].0;
                // Both endpoints were just added, so this cannot fail.
                let _ = out.add_link(a, b, attrs);
            }
        }
        out
    }

    /// Shortest path from `a` to `b` by hop count, ignoring all QoS
    /// attributes. `None` when either node is unknown or no path exists.
    pub fn shortest_hop_path(&self, a: NodeId, b: NodeId) -> Option<Path> {
        let ia = *self.index.get(&a)?;
        let ib = *self.index.get(&b)?;
        let (_, nodes) =
            petgraph::algo::astar(&self.graph, ia, |n| n == ib, |_| 1u32, |_| 0u32)?;
        Some(nodes.into_iter().map(|ix| self.graph[ix].0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(delay: f64) -> NodeAttrs {
        NodeAttrs {
            processing_delay: delay,
            reliability: 0.99,
        }
    }

    fn link(bandwidth: f64) -> LinkAttrs {
        LinkAttrs {
            delay: 5.0,
            bandwidth,
            reliability: 0.99,
        }
    }

    fn line_network(len: u32) -> Network {
        let mut net = Network::new();
        for i in 0..len {
            net.add_node(NodeId(i), node(1.0));
        }
        for i in 0..len - 1 {
            net.add_link(NodeId(i), NodeId(i + 1), link(500.0)).unwrap();
        }
        net
    }

    #[test]
    fn test_add_and_lookup() {
        let net = line_network(3);
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.link_count(), 2);
        assert!(net.contains(NodeId(0)));
        assert!(!net.contains(NodeId(9)));
        assert_eq!(net.node(NodeId(1)).unwrap().processing_delay, 1.0);
        assert_eq!(net.link(NodeId(0), NodeId(1)).unwrap().bandwidth, 500.0);
        assert_eq!(net.link(NodeId(1), NodeId(0)).unwrap().bandwidth, 500.0);
        assert!(net.link(NodeId(0), NodeId(2)).is_none());
    }

    #[test]
    fn test_readd_updates_in_place() {
        let mut net = line_network(2);
        net.add_link(NodeId(0), NodeId(1), link(100.0)).unwrap();
        assert_eq!(net.link_count(), 1);
        assert_eq!(net.link(NodeId(0), NodeId(1)).unwrap().bandwidth, 100.0);

        net.add_node(NodeId(0), node(7.0));
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.node(NodeId(0)).unwrap().processing_delay, 7.0);
    }

    #[test]
    fn test_add_link_errors() {
        let mut net = line_network(2);
        assert!(matches!(
            net.add_link(NodeId(0), NodeId(0), link(100.0)),
            Err(RouteError::InvalidQuery(_))
        ));
        assert!(matches!(
            net.add_link(NodeId(0), NodeId(5), link(100.0)),
            Err(RouteError::NodeNotFound(NodeId(5)))
        ));
    }

    #[test]
    fn test_neighbors() {
        let net = line_network(3);
        let mut n = net.neighbors(NodeId(1));
        n.sort();
        assert_eq!(n, vec![NodeId(0), NodeId(2)]);
        assert!(net.neighbors(NodeId(42)).is_empty());
    }

    #[test]
    fn test_filtered_drops_thin_links_only() {
        let mut net = line_network(3);
        net.add_node(NodeId(3), node(1.0));
        net.add_link(NodeId(0), NodeId(3), link(50.0)).unwrap();

        let filtered = net.filtered(100.0);
        assert_eq!(filtered.node_count(), 4);
        assert_eq!(filtered.link_count(), 2);
        assert!(filtered.link(NodeId(0), NodeId(3)).is_none());
        assert!(filtered.link(NodeId(0), NodeId(1)).is_some());
    }

    #[test]
    fn test_shortest_hop_path_ignores_attributes() {
        // Triangle 0-1-2 plus a long detour 0-3-4-2 on much better links.
        let mut net = line_network(3);
        net.add_link(NodeId(0), NodeId(2), link(10.0)).unwrap();
        net.add_node(NodeId(3), node(0.1));
        net.add_node(NodeId(4), node(0.1));
        net.add_link(NodeId(0), NodeId(3), link(1000.0)).unwrap();
        net.add_link(NodeId(3), NodeId(4), link(1000.0)).unwrap();
        net.add_link(NodeId(4), NodeId(2), link(1000.0)).unwrap();

        let path = net.shortest_hop_path(NodeId(0), NodeId(2)).unwrap();
        assert_eq!(path, vec![NodeId(0), NodeId(2)]);
    }

    #[test]
    fn test_shortest_hop_path_disconnected() {
        let mut net = line_network(2);
        net.add_node(NodeId(5), node(1.0));
        assert!(net.shortest_hop_path(NodeId(0), NodeId(5)).is_none());
        assert!(net.shortest_hop_path(NodeId(0), NodeId(9)).is_none());
    }
}
