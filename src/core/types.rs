//! Domain records persisted as JSON arrays, one file per collection.
//!
//! Field optionality mirrors the wire contract: request fields are never
//! required, so absent inputs are stored as explicit JSON `null`s rather than
//! missing keys.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Patient,
    Practitioner,
    /// Pass-through for values outside the known set. The user collection is
    /// read-only here and may be hand-edited, so an unrecognized role must
    /// not invalidate the whole file.
    #[serde(untagged)]
    Other(String),
}

/// Read-only reference data; no action ever mutates the user collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub role: Role,
}

/// The only two values any action writes. Hand-edited files carrying other
/// statuses fail deserialization and fall under the store's corruption policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub appointment_id: Option<String>,
    pub patient_id: Option<String>,
    pub practitioner_id: Option<String>,
    pub scheduled_at: Option<String>,
    pub status: AppointmentStatus,
    pub created_by: Option<String>,
    pub cancelled_by: Option<String>,
    pub cancellation_reason: Option<String>,
    pub escalated_to: Option<String>,
    pub escalation_reason: Option<String>,
    /// Present in the data model but not set or read by any current action.
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Freeform operator log entry, independent of the audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminActionEntry {
    pub ts: String,
    pub actor: Option<String>,
    pub action: Option<String>,
    pub target: Option<String>,
    pub meta: Value,
}

/// One entry per state-changing action, carrying the resulting record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub ts: String,
    pub event: String,
    pub data: Value,
}
