//! # Capability Wiring
//!
//! Registers every host capability on a `CompositionGraph`. Registration
//! order is persistence, repositories, analytics, then encodings; the graph
//! orders construction by the declared dependencies, not by this order.

mod analytics;
mod encoding;
mod persistence;
mod repositories;

use crate::capabilities::SAVING_IDEA_SETTINGS;
use crate::settings::SavingIdeaSettings;
use host_config::FeatureSwitches;
use service_graph::{CompositionGraph, GraphError};
use std::sync::Arc;

/// Register the settings instance and all capabilities built from it.
pub fn register_all(
    graph: &mut CompositionGraph,
    settings: SavingIdeaSettings,
    switches: FeatureSwitches,
) -> Result<(), GraphError> {
    graph.add_instance(SAVING_IDEA_SETTINGS, Arc::new(settings))?;

    persistence::register(graph, switches)?;
    repositories::register(graph)?;
    analytics::register(graph)?;
    encoding::register(graph, switches)?;

    Ok(())
}
