//! # Saving-Ideas Host Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── layered_configuration.rs   # classifier + resolver + feature gate
//!     ├── composition_graph.rs       # graph validation across crates
//!     └── startup_flow.rs            # orchestrator end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p composition-tests
//! cargo test -p composition-tests integration::startup_flow
//! cargo bench -p composition-tests
//! ```

pub mod integration;
