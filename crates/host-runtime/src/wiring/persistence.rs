//! Persistence options (singleton) and data context (scoped)

use crate::capabilities::{DATA_CONTEXT, PERSISTENCE_OPTIONS, SAVING_IDEA_SETTINGS};
use crate::persistence::{PersistenceContextOptions, SavingIdeaDataContext};
use host_config::FeatureSwitches;
use service_graph::{CompositionGraph, GraphError};
use std::sync::Arc;
use tracing::debug;

pub(super) fn register(graph: &mut CompositionGraph, switches: FeatureSwitches) -> Result<(), GraphError> {
    graph.add_singleton(PERSISTENCE_OPTIONS, &[SAVING_IDEA_SETTINGS.id()], move |resolver| {
        let settings = resolver.get(SAVING_IDEA_SETTINGS)?;
        let options = PersistenceContextOptions::resolve(&settings, resolver.configuration(), switches)?;
        debug!(
            query_tracking = %options.query_tracking(),
            sensitive_data_logging = options.sensitive_data_logging(),
            "Persistence options resolved"
        );
        Ok(Arc::new(options))
    })?;

    graph.add_scoped(DATA_CONTEXT, &[PERSISTENCE_OPTIONS.id()], |resolver| {
        let options = resolver.get(PERSISTENCE_OPTIONS)?;
        Ok(Arc::new(SavingIdeaDataContext::new(options)))
    })
}
