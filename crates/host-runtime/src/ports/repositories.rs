//! Repository ports
//!
//! Repositories are transient: each resolution gets a fresh repository over
//! the data context of the current scope.

use crate::persistence::SavingIdeaDataContext;
use std::sync::Arc;

pub trait SavingIdeaRepository: Send + Sync {
    /// Unit of work this repository writes through.
    fn data_context(&self) -> &Arc<SavingIdeaDataContext>;

    /// Stage a new idea. Returns the number of pending changes.
    fn add_idea(&self, title: &str) -> usize;
}

pub trait AuditRepository: Send + Sync {
    fn data_context(&self) -> &Arc<SavingIdeaDataContext>;

    /// Stage an audit record for `action` by `user`.
    fn record(&self, user: &str, action: &str) -> usize;
}
