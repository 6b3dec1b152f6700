// SPDX-License-Identifier: MIT OR Apache-2.0
//! Contract between the canvas and its host.
//!
//! The host supplies data and renderers through [`NodeDataSource`] and receives
//! user intents through [`NodeEventSink`]. Queries take `&self` and must not
//! change state; events take `&mut self` and update the authoritative graph.
//! The canvas checks [`NodeDataSource::relationship_candidate`] before it fires
//! [`NodeEventSink::relationship_toggled`], so event handlers can assume the
//! proposal was valid.

use crate::graph::Graph;
use crate::node::NodeId;
use crate::renderer::{InputRowRenderer, ItemRenderer, OutputRowRenderer};
use egui::{Pos2, Vec2};

/// Data and renderer queries
pub trait NodeDataSource {
    /// Nodes to display, or `None` when there is no data
    fn data_provider(&self) -> Option<&Graph>;

    /// Create a renderer bound to `node`
    fn item_renderer(&self, node: NodeId) -> Box<dyn ItemRenderer>;

    /// Create a renderer bound to input slot `index` of `parent`
    fn input_row_renderer(
        &self,
        input: Option<NodeId>,
        parent: NodeId,
        index: usize,
    ) -> Box<dyn InputRowRenderer>;

    /// Create a renderer bound to the output of `node`
    fn output_row_renderer(&self, node: NodeId) -> Box<dyn OutputRowRenderer>;

    /// Size hint for new nodes
    fn default_node_size(&self) -> Vec2;

    /// Whether `source` may be toggled as input `index` of `target`
    fn relationship_candidate(&self, source: NodeId, target: NodeId, index: usize) -> bool;
}

/// User intents forwarded by the canvas
pub trait NodeEventSink {
    /// Mutable access to the graph, used by the canvas to apply moves
    fn graph_mut(&mut self) -> Option<&mut Graph>;

    /// Selection changed; `None` clears it
    fn node_selected(&mut self, node: Option<NodeId>);

    /// A node's position has already been updated
    fn node_moved(&mut self, node: NodeId);

    /// The user asked for a new node at `position`
    fn node_created(&mut self, position: Pos2);

    /// The user asked to delete `node`; its edges go with it
    fn node_deleted(&mut self, node: NodeId);

    /// Connect `source` to `target.inputs[index]` if absent, disconnect if present
    fn relationship_toggled(&mut self, source: NodeId, target: NodeId, index: usize);
}

/// A host implementing both halves of the contract
pub trait NodeDelegate: NodeDataSource + NodeEventSink {}

impl<T: NodeDataSource + NodeEventSink> NodeDelegate for T {}

/// Default cycle-free candidacy rule over `graph`.
///
/// Rejects unknown nodes, self links, slots past the target's declared count
/// and links that would make `target` its own ancestor. An already existing
/// link is a candidate so it can be toggled off.
pub fn acyclic_candidate(graph: &Graph, source: NodeId, target: NodeId, index: usize) -> bool {
    if source == target {
        return false;
    }
    let (Some(source_node), Some(target_node)) = (graph.node(source), graph.node(target)) else {
        return false;
    };
    if index >= target_node.num_input_slots {
        return false;
    }
    if target_node.input(index) == Some(source) {
        return true;
    }
    !source_node.is_ascendant(target, graph)
}
