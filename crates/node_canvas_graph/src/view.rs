// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless editor surface.
//!
//! [`NodeCanvas`] owns the renderers it pulls from the delegate, the single
//! selection and the relationship curves. User intents go through the
//! delegate's event methods; the canvas only writes node positions itself.

use crate::connection::{NodePair, RelationshipMap};
use crate::delegate::{NodeDataSource, NodeDelegate};
use crate::error::{CanvasError, GraphError};
use crate::graph::Graph;
use crate::node::NodeId;
use crate::renderer::{InputRowRenderer, ItemRenderer, OutputRowRenderer};
use crate::ui::{input_anchor, output_anchor};
use egui::{Pos2, Vec2};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Result type for canvas operations
pub type Result<T> = std::result::Result<T, CanvasError>;

/// Connection visual parameters
const BEZIER_CURVATURE: f32 = 50.0;
const CURVE_SEGMENTS: usize = 32;

/// Renderers created for one node
pub struct NodeRenderers {
    /// Node body
    pub item: Box<dyn ItemRenderer>,
    /// Output slot
    pub output: Box<dyn OutputRowRenderer>,
    /// One renderer per input slot, in slot order
    pub inputs: Vec<Box<dyn InputRowRenderer>>,
}

/// Cached geometry of a relationship curve
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipCurve {
    /// Source output anchor
    pub start: Pos2,
    /// Target input anchor
    pub end: Pos2,
    /// Sampled bezier points from `start` to `end`
    pub points: Vec<Pos2>,
}

impl RelationshipCurve {
    fn between(start: Pos2, end: Pos2) -> Self {
        let distance = (end.x - start.x).abs();
        let curvature = BEZIER_CURVATURE.min(distance * 0.5);
        let ctrl1 = Pos2::new(start.x + curvature, start.y);
        let ctrl2 = Pos2::new(end.x - curvature, end.y);
        Self {
            start,
            end,
            points: bezier_points(start, ctrl1, ctrl2, end, CURVE_SEGMENTS),
        }
    }
}

/// Headless node canvas driven by a [`NodeDelegate`]
pub struct NodeCanvas {
    renderers: IndexMap<NodeId, NodeRenderers>,
    curves: RelationshipMap<RelationshipCurve>,
    selected: Option<NodeId>,
    node_size: Vec2,
}

impl NodeCanvas {
    /// Create an empty canvas
    pub fn new() -> Self {
        Self {
            renderers: IndexMap::new(),
            curves: RelationshipMap::new(),
            selected: None,
            node_size: Vec2::ZERO,
        }
    }

    /// Drop all renderers and rebuild them from the delegate
    pub fn reload_data<D: NodeDelegate + ?Sized>(&mut self, delegate: &mut D) -> Result<()> {
        self.renderers.clear();
        self.curves.clear();
        self.refresh(delegate)
    }

    /// Renderers for a node
    pub fn renderers(&self, node: NodeId) -> Option<&NodeRenderers> {
        self.renderers.get(&node)
    }

    /// Nodes with renderers, in display order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.renderers.keys().copied()
    }

    /// Curves for every displayed relationship
    pub fn curves(&self) -> &RelationshipMap<RelationshipCurve> {
        &self.curves
    }

    /// Currently selected node
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Change the selection, notifying the delegate if it changed
    pub fn select<D: NodeDelegate + ?Sized>(&mut self, delegate: &mut D, node: Option<NodeId>) {
        if self.selected == node {
            return;
        }
        self.selected = node;
        delegate.node_selected(node);
    }

    /// Move a node, then notify the delegate
    pub fn move_node<D: NodeDelegate + ?Sized>(
        &mut self,
        delegate: &mut D,
        node: NodeId,
        position: Pos2,
    ) -> Result<()> {
        let graph = delegate.graph_mut().ok_or(CanvasError::NoData)?;
        graph
            .node_mut(node)
            .ok_or(GraphError::NodeNotFound(node))?
            .position = position;
        delegate.node_moved(node);
        self.refresh(delegate)
    }

    /// Ask the delegate to create a node at `position`, then select it.
    ///
    /// Returns the new node's ID, or `None` if the delegate added nothing.
    pub fn create_node<D: NodeDelegate + ?Sized>(
        &mut self,
        delegate: &mut D,
        position: Pos2,
    ) -> Result<Option<NodeId>> {
        let before: HashSet<NodeId> = delegate
            .data_provider()
            .ok_or(CanvasError::NoData)?
            .node_ids()
            .collect();

        delegate.node_created(position);
        self.refresh(delegate)?;

        let created = self.node_ids().find(|id| !before.contains(id));
        if created.is_some() {
            self.select(delegate, created);
        }
        Ok(created)
    }

    /// Ask the delegate to delete a node and its relationships
    pub fn delete_node<D: NodeDelegate + ?Sized>(
        &mut self,
        delegate: &mut D,
        node: NodeId,
    ) -> Result<()> {
        if self.selected == Some(node) {
            self.select(delegate, None);
        }
        delegate.node_deleted(node);
        self.curves.remove_node(node);
        self.refresh(delegate)
    }

    /// Toggle `source` as input `index` of `target` if the delegate allows it
    pub fn toggle_relationship<D: NodeDelegate + ?Sized>(
        &mut self,
        delegate: &mut D,
        source: NodeId,
        target: NodeId,
        index: usize,
    ) -> Result<()> {
        if !delegate.relationship_candidate(source, target, index) {
            tracing::warn!("Rejected relationship {:?} -> {:?}[{}]", source, target, index);
            return Err(CanvasError::RelationshipRejected {
                upstream: source,
                target,
                index,
            });
        }
        delegate.relationship_toggled(source, target, index);
        self.refresh(delegate)
    }

    /// Sync with the delegate and clear a selection whose node has gone
    fn refresh<D: NodeDelegate + ?Sized>(&mut self, delegate: &mut D) -> Result<()> {
        self.sync(&*delegate)?;
        if self.selected.is_some_and(|id| !self.renderers.contains_key(&id)) {
            self.select(delegate, None);
        }
        Ok(())
    }

    /// Bring renderers and curves in line with the delegate's graph
    fn sync<D: NodeDataSource + ?Sized>(&mut self, delegate: &D) -> Result<()> {
        let graph = delegate.data_provider().ok_or(CanvasError::NoData)?;
        self.node_size = delegate.default_node_size();

        // rebuilt in graph order; renderers of removed nodes are dropped
        let mut previous = std::mem::take(&mut self.renderers);
        for node in graph.nodes() {
            let id = node.id();
            let mut renderers = previous.swap_remove(&id).unwrap_or_else(|| {
                tracing::debug!("Creating renderers for {:?}", node.name);
                NodeRenderers {
                    item: delegate.item_renderer(id),
                    output: delegate.output_row_renderer(id),
                    inputs: Vec::new(),
                }
            });

            // Slot bindings are fixed, so only add or drop rows at the end
            renderers.inputs.truncate(node.num_input_slots);
            for index in renderers.inputs.len()..node.num_input_slots {
                renderers
                    .inputs
                    .push(delegate.input_row_renderer(node.input(index), id, index));
            }

            renderers.item.reload(graph);
            renderers.output.reload(graph);
            for row in renderers.inputs.iter_mut() {
                row.reload(graph);
            }
            self.renderers.insert(id, renderers);
        }

        self.curves.retain_live(graph);
        for pair in graph.relationships() {
            if let Some(curve) = self.curve_for(graph, &pair) {
                self.curves.insert(pair, curve);
            }
        }

        Ok(())
    }

    fn curve_for(&self, graph: &Graph, pair: &NodePair) -> Option<RelationshipCurve> {
        let source = graph.node(pair.source)?;
        let target = graph.node(pair.target)?;
        let start = output_anchor(source, self.node_size.x);
        let end = input_anchor(target, pair.target_index);
        Some(RelationshipCurve::between(start, end))
    }
}

impl Default for NodeCanvas {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a cubic bezier curve
fn bezier_points(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    let mut points = Vec::with_capacity(segments + 1);
    for i in 0..=segments {
        let t = i as f32 / segments as f32;
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        let x = mt3 * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t3 * p3.x;
        let y = mt3 * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t3 * p3.y;

        points.push(Pos2::new(x, y));
    }
    points
}
