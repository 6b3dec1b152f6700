// SPDX-License-Identifier: MIT OR Apache-2.0
//! Relationship keys and per-relationship data.

use crate::graph::Graph;
use crate::node::NodeId;
use indexmap::IndexMap;

/// Key identifying a directed edge: `source` feeds `target`'s input slot
/// `target_index`.
///
/// Not authoritative: the edge itself lives in the target node's `inputs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePair {
    /// Upstream node
    pub source: NodeId,
    /// Node receiving the input
    pub target: NodeId,
    /// Input slot on the target
    pub target_index: usize,
}

impl NodePair {
    /// Create a new relationship key
    pub fn new(source: NodeId, target: NodeId, target_index: usize) -> Self {
        Self {
            source,
            target,
            target_index,
        }
    }

    /// Check if this relationship involves a specific node
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Auxiliary data keyed by relationship, such as curve geometry.
///
/// The map never mutates the graph. Callers insert and remove keys as the
/// target nodes' input slots change, or call [`RelationshipMap::retain_live`]
/// to drop keys whose edge has gone.
#[derive(Debug, Clone)]
pub struct RelationshipMap<V> {
    entries: IndexMap<NodePair, V>,
}

impl<V> RelationshipMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert data for a relationship, returning the previous value
    pub fn insert(&mut self, pair: NodePair, value: V) -> Option<V> {
        self.entries.insert(pair, value)
    }

    /// Remove data for a relationship
    pub fn remove(&mut self, pair: &NodePair) -> Option<V> {
        self.entries.shift_remove(pair)
    }

    /// Get data for a relationship
    pub fn get(&self, pair: &NodePair) -> Option<&V> {
        self.entries.get(pair)
    }

    /// Get mutable data for a relationship
    pub fn get_mut(&mut self, pair: &NodePair) -> Option<&mut V> {
        self.entries.get_mut(pair)
    }

    /// Check if a relationship has data
    pub fn contains(&self, pair: &NodePair) -> bool {
        self.entries.contains_key(pair)
    }

    /// Iterate over all entries
    pub fn iter(&self) -> impl Iterator<Item = (&NodePair, &V)> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop entries touching a node, returning how many were removed
    pub fn remove_node(&mut self, node_id: NodeId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|pair, _| !pair.involves_node(node_id));
        before - self.entries.len()
    }

    /// Drop entries whose edge no longer exists in `graph`
    pub fn retain_live(&mut self, graph: &Graph) -> usize {
        let before = self.entries.len();
        self.entries.retain(|pair, _| graph.has_relationship(pair));
        before - self.entries.len()
    }
}

impl<V> Default for RelationshipMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use egui::Pos2;
    use std::collections::HashMap;

    #[test]
    fn test_pair_equality() {
        let (a, b, c) = (NodeId::new(), NodeId::new(), NodeId::new());
        let pair = NodePair::new(a, b, 0);
        assert_eq!(pair, NodePair::new(a, b, 0));
        assert_ne!(pair, NodePair::new(c, b, 0));
        assert_ne!(pair, NodePair::new(a, c, 0));
        assert_ne!(pair, NodePair::new(a, b, 1));
        assert_ne!(pair, NodePair::new(b, a, 0));
    }

    #[test]
    fn test_pair_as_map_key() {
        let (a, b) = (NodeId::new(), NodeId::new());
        let mut curves = HashMap::new();
        curves.insert(NodePair::new(a, b, 0), "first");
        curves.insert(NodePair::new(a, b, 1), "second");
        curves.insert(NodePair::new(a, b, 0), "replaced");
        assert_eq!(curves.len(), 2);
        assert_eq!(curves[&NodePair::new(a, b, 0)], "replaced");
    }

    #[test]
    fn test_remove_node_entries() {
        let (a, b, c) = (NodeId::new(), NodeId::new(), NodeId::new());
        let mut map = RelationshipMap::new();
        map.insert(NodePair::new(a, b, 0), 1);
        map.insert(NodePair::new(b, c, 0), 2);
        map.insert(NodePair::new(a, c, 1), 3);

        assert_eq!(map.remove_node(a), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&NodePair::new(b, c, 0)), Some(&2));
    }

    #[test]
    fn test_retain_live() {
        let mut graph = Graph::default();
        let a = graph.add_node(Node::new("A", Pos2::ZERO));
        let b = graph.add_node(Node::new("B", Pos2::ZERO).with_input_slots(2));
        graph.set_input(b, 0, Some(a)).unwrap();

        let mut map = RelationshipMap::new();
        map.insert(NodePair::new(a, b, 0), ());
        map.insert(NodePair::new(a, b, 1), ());

        assert_eq!(map.retain_live(&graph), 1);
        assert!(map.contains(&NodePair::new(a, b, 0)));

        graph.set_input(b, 0, None).unwrap();
        assert_eq!(map.retain_live(&graph), 1);
        assert!(map.is_empty());
    }
}
