//! Default implementations of the collaborator ports.

pub mod qlik_sense;
pub mod repositories;

pub use qlik_sense::{QlikSenseAppDataAdapter, QlikSenseServicesAdapter, QlikSenseSheetDataAdapter};
pub use repositories::{AuditRepositoryAdapter, SavingIdeaRepositoryAdapter};
