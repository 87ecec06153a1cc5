//! Domain module for host configuration
//!
//! Environment labels, the feature gate, the configuration tree and the
//! resolved configuration. No I/O happens here.

pub mod environment;
pub mod errors;
pub mod feature_gate;
pub mod key_path;
pub mod resolved;
pub mod tree;

pub use environment::*;
pub use errors::*;
pub use feature_gate::*;
pub use key_path::*;
pub use resolved::*;
pub use tree::*;
