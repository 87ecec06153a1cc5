//! Adapters for configuration sources and host access

pub mod environment_variables;
pub mod json_file;
pub mod memory;
pub mod process_host;

pub use environment_variables::EnvironmentVariablesSource;
pub use json_file::JsonFileSource;
pub use memory::MemorySource;
pub use process_host::{ProcessHost, StaticHost};
