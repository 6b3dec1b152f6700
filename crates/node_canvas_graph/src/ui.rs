// SPDX-License-Identifier: MIT OR Apache-2.0
//! Basic egui renderers.
//!
//! Each renderer caches what it needs to paint on `reload`, so painting never
//! touches the graph.

use crate::node::{Node, NodeId, NodeLookup};
use crate::renderer::{InputRowRenderer, ItemRenderer, OutputRowRenderer};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

/// Node visual dimensions
const NODE_HEADER_HEIGHT: f32 = 24.0;
const PORT_HEIGHT: f32 = 22.0;
const PORT_RADIUS: f32 = 6.0;
const PORT_PADDING: f32 = 12.0;
const NODE_ROUNDING: f32 = 6.0;
const NODE_SHADOW_OFFSET: f32 = 3.0;

const NODE_FILL: Color32 = Color32::from_rgb(45, 45, 48);
const HEADER_FILL: Color32 = Color32::from_rgb(70, 90, 120);
const PORT_CONNECTED: Color32 = Color32::from_rgb(80, 200, 80);
const PORT_IDLE: Color32 = Color32::from_rgb(150, 150, 150);

/// Canvas position of input slot `index` on `node`
pub fn input_anchor(node: &Node, index: usize) -> Pos2 {
    node.position + Vec2::new(0.0, NODE_HEADER_HEIGHT + PORT_HEIGHT * (index as f32 + 0.5))
}

/// Canvas position of the output port on a `node` box `width` wide
pub fn output_anchor(node: &Node, width: f32) -> Pos2 {
    // output row sits below the last input row
    node.position
        + Vec2::new(
            width,
            NODE_HEADER_HEIGHT + PORT_HEIGHT * (node.num_input_slots as f32 + 0.5),
        )
}

/// Draws a node as a titled box sized for its slots
#[derive(Debug, Clone)]
pub struct LabelItemRenderer {
    node: NodeId,
    min_size: Vec2,
    title: String,
    position: Pos2,
    slots: usize,
}

impl LabelItemRenderer {
    /// Create a renderer for `node` with a minimum box size
    pub fn new(node: NodeId, min_size: Vec2) -> Self {
        Self {
            node,
            min_size,
            title: String::new(),
            position: Pos2::ZERO,
            slots: 0,
        }
    }

    /// Title as of the last reload
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Canvas rectangle covered by the node
    pub fn rect(&self) -> Rect {
        // header, one row per input, one output row
        let rows_height = NODE_HEADER_HEIGHT + PORT_HEIGHT * (self.slots + 1) as f32;
        let size = Vec2::new(self.min_size.x, self.min_size.y.max(rows_height));
        Rect::from_min_size(self.position, size)
    }

    /// Paint the node body, offset by `pan`
    pub fn paint(&self, painter: &Painter, pan: Vec2) {
        let rect = self.rect().translate(pan);
        painter.rect_filled(
            rect.translate(Vec2::splat(NODE_SHADOW_OFFSET)),
            NODE_ROUNDING,
            Color32::from_black_alpha(80),
        );
        painter.rect_filled(rect, NODE_ROUNDING, NODE_FILL);

        let header = Rect::from_min_size(rect.min, Vec2::new(rect.width(), NODE_HEADER_HEIGHT));
        painter.rect_filled(header, NODE_ROUNDING, HEADER_FILL);
        painter.text(
            header.left_center() + Vec2::new(PORT_PADDING, 0.0),
            Align2::LEFT_CENTER,
            &self.title,
            FontId::proportional(14.0),
            Color32::WHITE,
        );
    }
}

impl ItemRenderer for LabelItemRenderer {
    fn node(&self) -> NodeId {
        self.node
    }

    fn reload(&mut self, nodes: &dyn NodeLookup) {
        let Some(node) = nodes.lookup(self.node) else {
            tracing::warn!("Item renderer bound to missing node {:?}", self.node);
            return;
        };
        self.title = node.name.clone();
        self.position = node.position;
        self.slots = node.num_input_slots;
    }
}

/// Draws one input slot with the name of its upstream node
#[derive(Debug, Clone)]
pub struct LabelInputRowRenderer {
    index: usize,
    parent: NodeId,
    input: Option<NodeId>,
    label: String,
    anchor: Pos2,
}

impl LabelInputRowRenderer {
    /// Create a renderer for slot `index` of `parent`
    pub fn new(index: usize, input: Option<NodeId>, parent: NodeId) -> Self {
        Self {
            index,
            parent,
            input,
            label: String::new(),
            anchor: Pos2::ZERO,
        }
    }

    /// Label as of the last reload
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Canvas position of the slot's port
    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    /// Paint the row, offset by `pan`
    pub fn paint(&self, painter: &Painter, pan: Vec2) {
        let anchor = self.anchor + pan;
        let color = if self.input.is_some() {
            PORT_CONNECTED
        } else {
            PORT_IDLE
        };
        painter.circle_filled(anchor, PORT_RADIUS, color);
        painter.text(
            anchor + Vec2::new(PORT_PADDING, 0.0),
            Align2::LEFT_CENTER,
            &self.label,
            FontId::proportional(12.0),
            Color32::LIGHT_GRAY,
        );
    }
}

impl InputRowRenderer for LabelInputRowRenderer {
    fn index(&self) -> usize {
        self.index
    }

    fn parent(&self) -> NodeId {
        self.parent
    }

    fn input_node(&self) -> Option<NodeId> {
        self.input
    }

    fn reload(&mut self, nodes: &dyn NodeLookup) {
        let Some(parent) = nodes.lookup(self.parent) else {
            tracing::warn!("Input row bound to missing node {:?}", self.parent);
            return;
        };
        self.input = parent.input(self.index);
        self.anchor = input_anchor(parent, self.index);

        let source = self
            .input
            .and_then(|id| nodes.lookup(id))
            .map_or("unconnected", |n| n.name.as_str());
        self.label = format!("Input {}: {}", self.index + 1, source);
    }
}

/// Draws the output slot of a node
#[derive(Debug, Clone)]
pub struct LabelOutputRowRenderer {
    node: NodeId,
    width: f32,
    label: String,
    anchor: Pos2,
}

impl LabelOutputRowRenderer {
    /// Create a renderer for the output of `node` in a box `width` wide
    pub fn new(node: NodeId, width: f32) -> Self {
        Self {
            node,
            width,
            label: String::new(),
            anchor: Pos2::ZERO,
        }
    }

    /// Label as of the last reload
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Canvas position of the output port
    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    /// Paint the row, offset by `pan`
    pub fn paint(&self, painter: &Painter, pan: Vec2) {
        let anchor = self.anchor + pan;
        painter.circle(anchor, PORT_RADIUS, PORT_IDLE, Stroke::new(1.0, Color32::WHITE));
        painter.text(
            anchor - Vec2::new(PORT_PADDING, 0.0),
            Align2::RIGHT_CENTER,
            &self.label,
            FontId::proportional(12.0),
            Color32::LIGHT_GRAY,
        );
    }
}

impl OutputRowRenderer for LabelOutputRowRenderer {
    fn node(&self) -> NodeId {
        self.node
    }

    fn reload(&mut self, nodes: &dyn NodeLookup) {
        let Some(node) = nodes.lookup(self.node) else {
            tracing::warn!("Output row bound to missing node {:?}", self.node);
            return;
        };
        self.label = format!("{} out", node.name);
        self.anchor = output_anchor(node, self.width);
    }
}
