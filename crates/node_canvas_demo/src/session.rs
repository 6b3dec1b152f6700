// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scripted editing session.

use egui::pos2;
use node_canvas_graph::{
    CanvasError, EditorConfig, Graph, GraphDocument, GraphError, Node, NodeCanvas, NodeId,
};
use thiserror::Error;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Canvas rejected an operation
    #[error("Canvas error: {0}")]
    Canvas(#[from] CanvasError),

    /// Graph left in an invalid state
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

/// Final state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Nodes left in the graph
    pub nodes: usize,
    /// Connected input slots left in the graph
    pub relationships: usize,
}

/// Toggle a relationship, logging instead of failing when it is rejected
fn toggle_or_log(
    canvas: &mut NodeCanvas,
    doc: &mut GraphDocument,
    source: NodeId,
    target: NodeId,
    index: usize,
) -> Result<bool, SessionError> {
    match canvas.toggle_relationship(doc, source, target, index) {
        Ok(()) => Ok(true),
        Err(e @ CanvasError::RelationshipRejected { .. }) => {
            tracing::info!("{e}");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

/// Build a small graph, edit it through the canvas and report what is left
pub fn run(config: EditorConfig) -> Result<Summary, SessionError> {
    let mut graph = Graph::new("Demo");
    let source = graph.add_node(Node::new("Source", pos2(0.0, 0.0)));
    let blur = graph.add_node(Node::new("Blur", pos2(250.0, 0.0)).with_input_slots(1));
    let blend = graph.add_node(Node::new("Blend", pos2(500.0, 0.0)).with_input_slots(2));

    let mut doc = GraphDocument::new(graph, config);
    let mut canvas = NodeCanvas::new();
    canvas.reload_data(&mut doc)?;

    toggle_or_log(&mut canvas, &mut doc, source, blur, 0)?;
    toggle_or_log(&mut canvas, &mut doc, blur, blend, 0)?;
    toggle_or_log(&mut canvas, &mut doc, source, blend, 1)?;

    // Blend already depends on Blur
    if toggle_or_log(&mut canvas, &mut doc, blend, blur, 0)? {
        tracing::warn!("Cycle-creating relationship was accepted");
    }

    canvas.select(&mut doc, Some(blur));
    canvas.move_node(&mut doc, blur, pos2(250.0, 150.0))?;

    if let Some(output) = canvas.create_node(&mut doc, pos2(750.0, 0.0))? {
        toggle_or_log(&mut canvas, &mut doc, blend, output, 0)?;
    }

    // second toggle removes the link
    toggle_or_log(&mut canvas, &mut doc, source, blend, 1)?;
    canvas.delete_node(&mut doc, source)?;

    doc.graph().validate()?;

    for id in canvas.node_ids() {
        let (Some(node), Some(renderers)) = (doc.graph().node(id), canvas.renderers(id)) else {
            continue;
        };
        let connected = renderers
            .inputs
            .iter()
            .filter(|row| row.input_node().is_some())
            .count();
        tracing::info!(
            "{} at {:?}: {}/{} inputs connected",
            node.name,
            node.position,
            connected,
            renderers.inputs.len()
        );
    }

    Ok(Summary {
        nodes: doc.graph().node_count(),
        relationships: doc.graph().relationships().count(),
    })
}
