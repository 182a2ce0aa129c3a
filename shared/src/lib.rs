//! Shared types for the Heron HR client
//!
//! Common types used across the client crates: domain models, auth DTOs
//! and the backend response envelope.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use response::ApiEnvelope;
