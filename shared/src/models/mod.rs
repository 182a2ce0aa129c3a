//! Data models
//!
//! Shared between the backend API and the client screens. The backend owns
//! persistence; these types only mirror its wire format.

pub mod leave;
pub mod role;
pub mod staff;

// Re-exports
pub use leave::*;
pub use role::*;
pub use staff::*;
