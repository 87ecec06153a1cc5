//! Transient repositories over the scoped data context

use crate::adapters::{AuditRepositoryAdapter, SavingIdeaRepositoryAdapter};
use crate::capabilities::{AUDIT_REPOSITORY, DATA_CONTEXT, SAVING_IDEA_REPOSITORY};
use crate::ports::{AuditRepository, SavingIdeaRepository};
use service_graph::{CompositionGraph, GraphError};
use std::sync::Arc;

pub(super) fn register(graph: &mut CompositionGraph) -> Result<(), GraphError> {
    graph.add_transient(SAVING_IDEA_REPOSITORY, &[DATA_CONTEXT.id()], |resolver| {
        let repository: Arc<dyn SavingIdeaRepository> =
            Arc::new(SavingIdeaRepositoryAdapter::new(resolver.get(DATA_CONTEXT)?));
        Ok(repository)
    })?;

    graph.add_transient(AUDIT_REPOSITORY, &[DATA_CONTEXT.id()], |resolver| {
        let repository: Arc<dyn AuditRepository> = Arc::new(AuditRepositoryAdapter::new(resolver.get(DATA_CONTEXT)?));
        Ok(repository)
    })
}
