//! flingo/crates/fl-core/src/lib.rs
//!
//! Domain logic and interface definitions for Flingo: share a text or a
//! file, get a 6-character code back, redeem the code later.

pub mod code;
pub mod error;
pub mod models;
pub mod services;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exporting for easier access in other crates
pub use code::*;
pub use error::*;
pub use models::*;
pub use services::*;
pub use traits::*;
