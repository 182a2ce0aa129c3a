//! Heron Client - front-end core for the Heron HR backend
//!
//! Everything the HR screens need short of rendering: the persisted session
//! store, the route access policy and guard, the leave list controller with
//! its confirmation and banner state, and the form validator. All business
//! rules beyond form-level checks live in the backend; this crate is the
//! presentation-side glue over its REST API.

pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod leave;
pub mod policy;
pub mod session;
pub mod validate;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use guard::{AppState, Navigation, Navigator};
pub use http::HttpClient;
pub use leave::{Banner, LeaveListController, PendingAction};
pub use session::{Session, SessionEvent, SessionStore};
pub use validate::{FieldErrors, LeaveFormData};

// Re-export shared types for convenience
pub use shared::client::{LoginRequest, LoginResponse, UserInfo};
pub use shared::models::{
    LeaveCreate, LeaveRecord, LeaveStatus, LeaveType, LeaveUpdate, Role, StaffMember,
};
pub use shared::response::ApiEnvelope;
