//! Application services: classification and layered resolution

pub mod classifier;
pub mod resolver;

pub use classifier::EnvironmentClassifier;
pub use resolver::{resolve, ConfigurationResolver, SourceLayout};
