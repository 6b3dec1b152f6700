// SPDX-License-Identifier: MIT OR Apache-2.0
//! Default host-side delegate backed by a [`Graph`].

use crate::config::EditorConfig;
use crate::delegate::{acyclic_candidate, NodeDataSource, NodeEventSink};
use crate::graph::Graph;
use crate::node::{Node, NodeId};
use crate::renderer::{InputRowRenderer, ItemRenderer, OutputRowRenderer};
use crate::ui::{LabelInputRowRenderer, LabelItemRenderer, LabelOutputRowRenderer};
use egui::{Pos2, Vec2};

/// A graph plus the editing state the canvas reports to its host
pub struct GraphDocument {
    graph: Graph,
    config: EditorConfig,
    selection: Option<NodeId>,
    created: usize,
}

impl GraphDocument {
    /// Create a document around an existing graph
    pub fn new(graph: Graph, config: EditorConfig) -> Self {
        Self {
            graph,
            config,
            selection: None,
            created: 0,
        }
    }

    /// The underlying graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The active configuration
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Currently selected node
    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }
}

impl Default for GraphDocument {
    fn default() -> Self {
        Self::new(Graph::default(), EditorConfig::default())
    }
}

impl NodeDataSource for GraphDocument {
    fn data_provider(&self) -> Option<&Graph> {
        Some(&self.graph)
    }

    fn item_renderer(&self, node: NodeId) -> Box<dyn ItemRenderer> {
        Box::new(LabelItemRenderer::new(node, self.config.node_size()))
    }

    fn input_row_renderer(
        &self,
        input: Option<NodeId>,
        parent: NodeId,
        index: usize,
    ) -> Box<dyn InputRowRenderer> {
        Box::new(LabelInputRowRenderer::new(index, input, parent))
    }

    fn output_row_renderer(&self, node: NodeId) -> Box<dyn OutputRowRenderer> {
        Box::new(LabelOutputRowRenderer::new(node, self.config.node_size().x))
    }

    fn default_node_size(&self) -> Vec2 {
        self.config.node_size()
    }

    fn relationship_candidate(&self, source: NodeId, target: NodeId, index: usize) -> bool {
        acyclic_candidate(&self.graph, source, target, index)
    }
}

impl NodeEventSink for GraphDocument {
    fn graph_mut(&mut self) -> Option<&mut Graph> {
        Some(&mut self.graph)
    }

    fn node_selected(&mut self, node: Option<NodeId>) {
        tracing::debug!("Selection changed to {:?}", node);
        self.selection = node;
    }

    fn node_moved(&mut self, node: NodeId) {
        if let Some(moved) = self.graph.node(node) {
            tracing::debug!("Moved {:?} to {:?}", moved.name, moved.position);
        }
    }

    fn node_created(&mut self, position: Pos2) {
        self.created += 1;
        let name = format!("{} {}", self.config.new_node_prefix, self.created);
        let node = Node::new(name, position).with_input_slots(self.config.default_input_slots);
        tracing::info!("Created node {:?} at {:?}", node.name, position);
        self.graph.add_node(node);
    }

    fn node_deleted(&mut self, node: NodeId) {
        if self.graph.remove_node(node).is_some() {
            tracing::info!("Deleted node {:?}", node);
        }
        if self.selection == Some(node) {
            self.selection = None;
        }
    }

    fn relationship_toggled(&mut self, source: NodeId, target: NodeId, index: usize) {
        let current = self.graph.node(target).and_then(|n| n.input(index));
        let next = if current == Some(source) {
            None
        } else {
            Some(source)
        };

        match self.graph.set_input(target, index, next) {
            Ok(_) if next.is_some() => {
                tracing::info!("Connected {:?} -> {:?}[{}]", source, target, index);
            }
            Ok(_) => tracing::info!("Disconnected {:?} -> {:?}[{}]", source, target, index),
            Err(e) => tracing::warn!("Relationship toggle failed: {}", e),
        }
    }
}
