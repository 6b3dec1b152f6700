// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph data model and rendering contract for a node canvas.
//!
//! ## Architecture
//!
//! - [`Node`]s live in a host-owned [`Graph`] and refer to their inputs by
//!   [`NodeId`], so every upstream reference is non-owning
//! - [`NodePair`] keys per-relationship data such as curve geometry
//! - Renderer traits present a node, one of its input rows, or its output row
//! - The host implements [`NodeDataSource`] (queries) and [`NodeEventSink`]
//!   (user intents); [`NodeCanvas`] drives both
//! - [`GraphDocument`] is a ready-made host with a cycle-free candidacy rule

pub mod config;
pub mod connection;
pub mod delegate;
pub mod document;
pub mod error;
pub mod graph;
pub mod node;
pub mod renderer;
pub mod ui;
pub mod view;

pub use config::EditorConfig;
pub use connection::{NodePair, RelationshipMap};
pub use delegate::{NodeDataSource, NodeDelegate, NodeEventSink};
pub use document::GraphDocument;
pub use error::{CanvasError, ConfigError, GraphError};
pub use graph::Graph;
pub use node::{Node, NodeId, NodeLookup};
pub use renderer::{InputRowRenderer, ItemRenderer, OutputRowRenderer};
pub use view::{NodeCanvas, RelationshipCurve};
