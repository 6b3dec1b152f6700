// SPDX-License-Identifier: MIT OR Apache-2.0
//! Renderer roles used by the canvas.
//!
//! A renderer is bound to its data when it is constructed and is never rebound;
//! the canvas creates a new renderer when a binding has to change. Bindings are
//! node IDs into the host's collection, so a renderer never owns the node it
//! presents. `reload` re-reads the bound data through a [`NodeLookup`].

use crate::node::{NodeId, NodeLookup};

/// Presents a single node
///
/// Every renderer has to implement `reload`; there is no fallback:
///
/// ```compile_fail
/// use node_canvas_graph::{ItemRenderer, NodeId};
///
/// struct Title(NodeId);
///
/// impl ItemRenderer for Title {
///     fn node(&self) -> NodeId {
///         self.0
///     }
/// }
/// ```
pub trait ItemRenderer {
    /// The bound node
    fn node(&self) -> NodeId;

    /// Refresh from the node's current name, position and slots
    fn reload(&mut self, nodes: &dyn NodeLookup);
}

/// Presents the output slot of a node
pub trait OutputRowRenderer {
    /// The node owning the output
    fn node(&self) -> NodeId;

    /// Refresh from the node's current state
    fn reload(&mut self, nodes: &dyn NodeLookup);
}

/// Presents one input slot and its connected upstream node
pub trait InputRowRenderer {
    /// Slot position, fixed for the renderer's lifetime
    fn index(&self) -> usize;

    /// The node owning the slot
    fn parent(&self) -> NodeId;

    /// Upstream node as of the last reload
    fn input_node(&self) -> Option<NodeId>;

    /// Refresh by re-reading `parent.inputs[index]`
    fn reload(&mut self, nodes: &dyn NodeLookup);
}
