// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the node canvas.

use crate::node::NodeId;

/// Error when reading or mutating the node collection
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Input slot index past the node's declared slot count
    #[error("Input slot {index} out of range for node {node:?} ({slots} slots)")]
    SlotOutOfRange {
        /// Node owning the slot
        node: NodeId,
        /// Requested slot
        index: usize,
        /// Declared slot count
        slots: usize,
    },

    /// Inputs form a cycle through the given node
    #[error("Graph contains a cycle through {0:?}")]
    CycleDetected(NodeId),
}

/// Error raised by the editor surface
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    /// The delegate has no data to display
    #[error("Delegate has no data provider")]
    NoData,

    /// The delegate refused the proposed relationship
    #[error("Relationship {upstream:?} -> {target:?}[{index}] rejected")]
    RelationshipRejected {
        /// Upstream node
        upstream: NodeId,
        /// Node receiving the input
        target: NodeId,
        /// Target input slot
        index: usize,
    },

    /// Graph error
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Error when loading editor configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),
}
