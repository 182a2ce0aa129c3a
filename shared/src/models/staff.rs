//! Staff Model

use serde::{Deserialize, Serialize};

/// Staff directory entry, used to label staff ids on the submission form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub staff_id: String,
    pub name: String,
    #[serde(default)]
    pub department: Option<String>,
}
