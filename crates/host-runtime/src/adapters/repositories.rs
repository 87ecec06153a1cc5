//! Repositories over the scoped data context

use crate::persistence::SavingIdeaDataContext;
use crate::ports::{AuditRepository, SavingIdeaRepository};
use std::sync::Arc;
use tracing::debug;

pub struct SavingIdeaRepositoryAdapter {
    context: Arc<SavingIdeaDataContext>,
}

impl SavingIdeaRepositoryAdapter {
    pub fn new(context: Arc<SavingIdeaDataContext>) -> Self {
        Self { context }
    }
}

impl SavingIdeaRepository for SavingIdeaRepositoryAdapter {
    fn data_context(&self) -> &Arc<SavingIdeaDataContext> {
        &self.context
    }

    fn add_idea(&self, title: &str) -> usize {
        if self.context.options().sensitive_data_logging() {
            debug!(context = %self.context.id(), title, "Staging idea");
        }
        self.context.track(format!("idea:{title}"));
        self.context.pending_changes().len()
    }
}

pub struct AuditRepositoryAdapter {
    context: Arc<SavingIdeaDataContext>,
}

impl AuditRepositoryAdapter {
    pub fn new(context: Arc<SavingIdeaDataContext>) -> Self {
        Self { context }
    }
}

impl AuditRepository for AuditRepositoryAdapter {
    fn data_context(&self) -> &Arc<SavingIdeaDataContext> {
        &self.context
    }

    fn record(&self, user: &str, action: &str) -> usize {
        if self.context.options().sensitive_data_logging() {
            debug!(context = %self.context.id(), user, action, "Staging audit record");
        }
        self.context.track(format!("audit:{user}:{action}"));
        self.context.pending_changes().len()
    }
}
