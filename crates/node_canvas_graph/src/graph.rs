// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node collection owned by the host.

use crate::connection::NodePair;
use crate::error::GraphError;
use crate::node::{Node, NodeId, NodeLookup};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// A node graph.
///
/// Nodes are kept in insertion order. Edges are stored on the target node's
/// `inputs`; this type only adds lookups and bookkeeping over them.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id();
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node and clear every input slot that referenced it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(&node_id)?;
        for node in self.nodes.values_mut() {
            for slot in node.inputs.iter_mut() {
                if *slot == Some(node_id) {
                    *slot = None;
                }
            }
        }
        Some(removed)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// Check if a node is in the graph
    pub fn contains(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Set or clear an input slot, returning the previous upstream node.
    ///
    /// Grows `inputs` to the declared slot count if it was left empty.
    pub fn set_input(
        &mut self,
        target: NodeId,
        index: usize,
        upstream: Option<NodeId>,
    ) -> Result<Option<NodeId>> {
        if let Some(id) = upstream {
            if !self.nodes.contains_key(&id) {
                return Err(GraphError::NodeNotFound(id));
            }
        }

        let node = self
            .nodes
            .get_mut(&target)
            .ok_or(GraphError::NodeNotFound(target))?;

        if index >= node.num_input_slots {
            return Err(GraphError::SlotOutOfRange {
                node: target,
                index,
                slots: node.num_input_slots,
            });
        }
        if node.inputs.len() != node.num_input_slots {
            node.inputs.resize(node.num_input_slots, None);
        }

        Ok(std::mem::replace(&mut node.inputs[index], upstream))
    }

    /// Check whether `candidate` is upstream of `node_id`
    pub fn is_ascendant(&self, node_id: NodeId, candidate: NodeId) -> Result<bool> {
        let node = self.node(node_id).ok_or(GraphError::NodeNotFound(node_id))?;
        Ok(node.is_ascendant(candidate, self))
    }

    /// Get a key for every connected input slot
    pub fn relationships(&self) -> impl Iterator<Item = NodePair> + '_ {
        self.nodes.values().flat_map(|target| {
            target
                .connected_inputs()
                .map(move |(index, source)| NodePair::new(source, target.id(), index))
        })
    }

    /// Check whether an edge is currently stored in the graph
    pub fn has_relationship(&self, pair: &NodePair) -> bool {
        self.node(pair.target)
            .and_then(|n| n.input(pair.target_index))
            == Some(pair.source)
    }

    /// Get nodes ordered so that every node comes after its inputs
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        let mut visited = HashSet::new();
        let mut temp_mark = HashSet::new();
        let mut order = Vec::new();

        for node_id in self.nodes.keys() {
            if !visited.contains(node_id) {
                self.visit(*node_id, &mut visited, &mut temp_mark, &mut order)?;
            }
        }

        Ok(order)
    }

    /// Fail with [`GraphError::CycleDetected`] if the inputs contain a cycle
    pub fn validate(&self) -> Result<()> {
        self.topological_order().map(|_| ())
    }

    fn visit(
        &self,
        node_id: NodeId,
        visited: &mut HashSet<NodeId>,
        temp_mark: &mut HashSet<NodeId>,
        order: &mut Vec<NodeId>,
    ) -> Result<()> {
        if temp_mark.contains(&node_id) {
            return Err(GraphError::CycleDetected(node_id));
        }
        if visited.contains(&node_id) {
            return Ok(());
        }
        let Some(node) = self.nodes.get(&node_id) else {
            return Ok(());
        };

        temp_mark.insert(node_id);

        for (_, upstream) in node.connected_inputs() {
            self.visit(upstream, visited, temp_mark, order)?;
        }

        temp_mark.remove(&node_id);
        visited.insert(node_id);
        order.push(node_id);

        Ok(())
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl NodeLookup for Graph {
    fn lookup(&self, id: NodeId) -> Option<&Node> {
        self.node(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    fn chain() -> (Graph, NodeId, NodeId, NodeId) {
        let mut graph = Graph::new("Chain");
        let a = graph.add_node(Node::new("A", Pos2::ZERO));
        let b = graph.add_node(Node::new("B", Pos2::ZERO).with_input_slots(1));
        let c = graph.add_node(Node::new("C", Pos2::ZERO).with_input_slots(2));
        graph.set_input(b, 0, Some(a)).unwrap();
        graph.set_input(c, 1, Some(b)).unwrap();
        (graph, a, b, c)
    }

    #[test]
    fn test_set_input_validates() {
        let (mut graph, a, b, _) = chain();
        assert!(matches!(
            graph.set_input(b, 1, Some(a)),
            Err(GraphError::SlotOutOfRange { index: 1, slots: 1, .. })
        ));
        assert!(matches!(
            graph.set_input(b, 0, Some(NodeId::new())),
            Err(GraphError::NodeNotFound(_))
        ));
        assert_eq!(graph.set_input(b, 0, None).unwrap(), Some(a));
        assert_eq!(graph.node(b).unwrap().input(0), None);
    }

    #[test]
    fn test_set_input_grows_missing_inputs() {
        let mut graph = Graph::default();
        let a = graph.add_node(Node::new("A", Pos2::ZERO));
        let mut target = Node::new("T", Pos2::ZERO);
        target.num_input_slots = 2;
        let t = graph.add_node(target);

        graph.set_input(t, 1, Some(a)).unwrap();
        assert_eq!(graph.node(t).unwrap().inputs, vec![None, Some(a)]);
    }

    #[test]
    fn test_remove_node_clears_references() {
        let (mut graph, a, b, c) = chain();
        graph.set_input(c, 0, Some(a)).unwrap();

        let removed = graph.remove_node(a).unwrap();
        assert_eq!(removed.id(), a);
        assert!(!graph.contains(a));
        assert_eq!(graph.node(b).unwrap().input(0), None);
        assert_eq!(graph.node(c).unwrap().input(0), None);
        assert_eq!(graph.node(c).unwrap().input(1), Some(b));
        assert!(graph.remove_node(a).is_none());
    }

    #[test]
    fn test_relationships() {
        let (graph, a, b, c) = chain();
        let pairs: Vec<_> = graph.relationships().collect();
        assert_eq!(pairs, vec![NodePair::new(a, b, 0), NodePair::new(b, c, 1)]);
        assert!(graph.has_relationship(&NodePair::new(a, b, 0)));
        assert!(!graph.has_relationship(&NodePair::new(a, c, 1)));
    }

    #[test]
    fn test_graph_ascendancy() {
        let (graph, a, _, c) = chain();
        assert!(graph.is_ascendant(c, a).unwrap());
        assert!(!graph.is_ascendant(a, c).unwrap());
        assert!(graph.is_ascendant(NodeId::new(), a).is_err());
    }

    #[test]
    fn test_topological_order() {
        let (graph, a, b, c) = chain();
        assert_eq!(graph.topological_order().unwrap(), vec![a, b, c]);
        assert!(graph.validate().is_ok());
    }

    #[test]
    fn test_cycle_detected() {
        let (mut graph, a, _, c) = chain();
        graph.node_mut(a).unwrap().set_num_input_slots(1);
        graph.set_input(a, 0, Some(c)).unwrap();
        assert!(matches!(graph.validate(), Err(GraphError::CycleDetected(_))));
    }
}
