// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node canvas demo.
//!
//! Runs a scripted editing session against the default delegate and logs
//! every event. Pass a RON editor config path as the first argument to
//! override the defaults.

mod session;

use node_canvas_graph::EditorConfig;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("node_canvas_graph=debug,node_canvas_demo=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting node canvas demo v{}", env!("CARGO_PKG_VERSION"));

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match EditorConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Failed to load config {:?}: {e}", path);
                std::process::exit(1);
            }
        },
        None => EditorConfig::default(),
    };

    match session::run(config) {
        Ok(summary) => tracing::info!(
            "Session finished with {} nodes and {} relationships",
            summary.nodes,
            summary.relationships
        ),
        Err(e) => {
            tracing::error!("Session failed: {e}");
            std::process::exit(1);
        }
    }
}
