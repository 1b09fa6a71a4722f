//! Common test utilities for artwork-table integration tests

#[allow(dead_code)]
pub mod assertions;
#[allow(dead_code)]
pub mod mock_api;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use mock_api::*;
