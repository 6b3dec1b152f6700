// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the canvas.

use egui::Pos2;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves node IDs against an externally owned collection
pub trait NodeLookup {
    /// Get a node by ID
    fn lookup(&self, id: NodeId) -> Option<&Node>;
}

impl NodeLookup for [Node] {
    fn lookup(&self, id: NodeId) -> Option<&Node> {
        self.iter().find(|n| n.id == id)
    }
}

impl NodeLookup for Vec<Node> {
    fn lookup(&self, id: NodeId) -> Option<&Node> {
        self.as_slice().lookup(id)
    }
}

/// A node on the canvas.
///
/// Equality and hashing use the ID only, so two nodes with the same name and
/// position are still distinct. `inputs` holds non-owning references into the
/// same collection: an empty vector means the node has no input list, otherwise
/// there is one entry per slot and `None` marks an unconnected slot.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    /// Display name
    pub name: String,
    /// Position on the canvas
    pub position: Pos2,
    /// Number of input rows the node exposes
    pub num_input_slots: usize,
    /// Upstream node per input slot
    pub inputs: Vec<Option<NodeId>>,
}

impl Node {
    /// Create a new node with no input slots
    pub fn new(name: impl Into<String>, position: Pos2) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            position,
            num_input_slots: 0,
            inputs: Vec::new(),
        }
    }

    /// Set the number of input slots, all unconnected
    pub fn with_input_slots(mut self, count: usize) -> Self {
        self.set_num_input_slots(count);
        self
    }

    /// The node's identity
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Resize the input slots, dropping connections past the new count
    pub fn set_num_input_slots(&mut self, count: usize) {
        self.num_input_slots = count;
        if count == 0 {
            self.inputs.clear();
        } else {
            self.inputs.resize(count, None);
        }
    }

    /// Get the node connected to an input slot
    pub fn input(&self, index: usize) -> Option<NodeId> {
        self.inputs.get(index).copied().flatten()
    }

    /// Iterate over connected slots as `(index, upstream)`
    pub fn connected_inputs(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.inputs
            .iter()
            .enumerate()
            .filter_map(|(index, input)| input.map(|id| (index, id)))
    }

    /// Check whether `candidate` is reachable through this node's inputs.
    ///
    /// Walks direct inputs, then their inputs, and so on, returning as soon as
    /// `candidate` is found. Each node is expanded at most once, so inputs that
    /// loop back on themselves terminate. IDs missing from `nodes` are leaves.
    pub fn is_ascendant<L>(&self, candidate: NodeId, nodes: &L) -> bool
    where
        L: NodeLookup + ?Sized,
    {
        let mut visited = HashSet::from([self.id]);
        let mut stack: Vec<NodeId> = self.inputs.iter().flatten().copied().collect();

        while let Some(id) = stack.pop() {
            if id == candidate {
                return true;
            }
            if !visited.insert(id) {
                continue;
            }
            match nodes.lookup(id) {
                Some(node) => stack.extend(node.inputs.iter().flatten().copied()),
                None => tracing::warn!("Dangling input reference {:?} from {:?}", id, self.id),
            }
        }

        false
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(node: &Node) -> u64 {
        let mut hasher = DefaultHasher::new();
        node.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_node_identity() {
        let a = Node::new("Same", Pos2::ZERO);
        let b = Node::new("Same", Pos2::ZERO);
        assert_ne!(a, b);
        assert_ne!(hash_of(&a), hash_of(&b));
        assert_eq!(a, a.clone());
        assert_eq!(hash_of(&a), hash_of(&a.clone()));
    }

    #[test]
    fn test_identity_ignores_mutable_fields() {
        let a = Node::new("Before", Pos2::ZERO);
        let mut moved = a.clone();
        moved.name = "After".to_string();
        moved.position = Pos2::new(40.0, 12.0);
        assert_eq!(a, moved);
        assert_eq!(hash_of(&a), hash_of(&moved));
    }

    #[test]
    fn test_new_node_defaults() {
        let node = Node::new("Blur", Pos2::new(10.0, 20.0));
        assert_eq!(node.num_input_slots, 0);
        assert!(node.inputs.is_empty());
        assert_eq!(node.position, Pos2::new(10.0, 20.0));
    }

    #[test]
    fn test_resize_input_slots() {
        let source = Node::new("Source", Pos2::ZERO);
        let mut node = Node::new("Mix", Pos2::ZERO).with_input_slots(3);
        node.inputs[2] = Some(source.id());

        node.set_num_input_slots(2);
        assert_eq!(node.inputs, vec![None, None]);

        node.set_num_input_slots(0);
        assert!(node.inputs.is_empty());
    }

    #[test]
    fn test_connected_inputs() {
        let a = Node::new("A", Pos2::ZERO);
        let mut b = Node::new("B", Pos2::ZERO).with_input_slots(3);
        b.inputs[1] = Some(a.id());
        assert_eq!(b.connected_inputs().collect::<Vec<_>>(), vec![(1, a.id())]);
        assert_eq!(b.input(1), Some(a.id()));
        assert_eq!(b.input(0), None);
        assert_eq!(b.input(7), None);
    }

    #[test]
    fn test_ascendant_without_inputs() {
        let a = Node::new("A", Pos2::ZERO);
        let b = Node::new("B", Pos2::ZERO);
        let nodes = vec![a.clone(), b.clone()];
        assert!(!a.is_ascendant(b.id(), &nodes));
        assert!(!a.is_ascendant(a.id(), &nodes));
    }

    #[test]
    fn test_ascendant_direct_and_transitive() {
        let c = Node::new("C", Pos2::ZERO);
        let mut b = Node::new("B", Pos2::ZERO).with_input_slots(1);
        b.inputs[0] = Some(c.id());
        let mut a = Node::new("A", Pos2::ZERO).with_input_slots(2);
        a.inputs[1] = Some(b.id());
        let unrelated = Node::new("D", Pos2::ZERO);
        let nodes = vec![a.clone(), b.clone(), c.clone(), unrelated.clone()];

        assert!(a.is_ascendant(b.id(), &nodes));
        assert!(a.is_ascendant(c.id(), &nodes));
        assert!(!a.is_ascendant(unrelated.id(), &nodes));
        assert!(!c.is_ascendant(a.id(), &nodes));
        assert!(!b.is_ascendant(a.id(), &nodes));
    }

    #[test]
    fn test_ascendant_long_chain() {
        let mut chain: Vec<Node> = Vec::new();
        for i in 0..200 {
            let mut node = Node::new(format!("N{i}"), Pos2::ZERO).with_input_slots(1);
            node.inputs[0] = chain.last().map(Node::id);
            chain.push(node);
        }
        let first = chain[0].id();
        let last = chain[199].clone();
        assert!(last.is_ascendant(first, &chain));
        assert!(!chain[0].is_ascendant(last.id(), &chain));
    }

    #[test]
    fn test_ascendant_terminates_on_cycle() {
        let mut a = Node::new("A", Pos2::ZERO).with_input_slots(1);
        let mut b = Node::new("B", Pos2::ZERO).with_input_slots(1);
        let outside = Node::new("Outside", Pos2::ZERO);
        a.inputs[0] = Some(b.id());
        b.inputs[0] = Some(a.id());
        let nodes = vec![a.clone(), b.clone(), outside.clone()];

        assert!(!a.is_ascendant(outside.id(), &nodes));
        assert!(a.is_ascendant(a.id(), &nodes));
        assert!(b.is_ascendant(a.id(), &nodes));
    }

    #[test]
    fn test_ascendant_skips_dangling_inputs() {
        let missing = Node::new("Deleted", Pos2::ZERO);
        let mut a = Node::new("A", Pos2::ZERO).with_input_slots(1);
        a.inputs[0] = Some(missing.id());
        let nodes = vec![a.clone()];
        assert!(a.is_ascendant(missing.id(), &nodes));
        assert!(!a.is_ascendant(NodeId::new(), &nodes));
    }
}
