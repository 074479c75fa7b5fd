//! Record mutation service: one method per action.
//!
//! Every mutation is a full read-modify-write cycle over a collection file —
//! load the whole JSON array, append or update one record, write the whole
//! array back atomically, then append one audit entry. There are no partial
//! updates or field-level patches.
//!
//! The read-modify-write cycle itself is not isolated across processes; see
//! the note on `storage::store`. Within a process, callers serialize access
//! (the web layer holds the service behind a mutex).

use crate::core::types::{AdminActionEntry, Appointment, AppointmentStatus, AuditLogEntry, User};
use crate::core::{StoreError, now_ist};
use crate::storage::{DataPaths, JsonStore};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("appointment not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

// ============================================================================
// Typed action requests
// ============================================================================

// Every field is optional on the wire; absent inputs become explicit nulls in
// the stored record rather than silently-missing keys. Each field is read
// independently from the loose parameter object, so one malformed field never
// discards its siblings.

/// Reads one string field from a parameter object. Absent keys and
/// non-string values both become `None`.
fn string_field(params: &Value, key: &str) -> Option<String> {
    params.get(key).and_then(Value::as_str).map(ToOwned::to_owned)
}

#[derive(Debug, Clone, Default)]
pub struct CreateAppointmentRequest {
    pub appointment_id: Option<String>,
    pub patient_id: Option<String>,
    pub practitioner_id: Option<String>,
    pub scheduled_at: Option<String>,
    pub created_by: Option<String>,
}

impl CreateAppointmentRequest {
    pub fn from_params(params: &Value) -> Self {
        Self {
            appointment_id: string_field(params, "appointment_id"),
            patient_id: string_field(params, "patient_id"),
            practitioner_id: string_field(params, "practitioner_id"),
            scheduled_at: string_field(params, "scheduled_at"),
            created_by: string_field(params, "created_by"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CancelAppointmentRequest {
    pub appointment_id: Option<String>,
    pub by: Option<String>,
    pub reason: Option<String>,
}

impl CancelAppointmentRequest {
    pub fn from_params(params: &Value) -> Self {
        Self {
            appointment_id: string_field(params, "appointment_id"),
            by: string_field(params, "by"),
            reason: string_field(params, "reason"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EscalateAppointmentRequest {
    pub appointment_id: Option<String>,
    pub escalated_to: Option<String>,
    pub reason: Option<String>,
}

impl EscalateAppointmentRequest {
    pub fn from_params(params: &Value) -> Self {
        Self {
            appointment_id: string_field(params, "appointment_id"),
            escalated_to: string_field(params, "escalated_to"),
            reason: string_field(params, "reason"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdminActionRequest {
    pub actor: Option<String>,
    pub action: Option<String>,
    pub target: Option<String>,
    pub meta: Value,
}

impl AdminActionRequest {
    pub fn from_params(params: &Value) -> Self {
        Self {
            actor: string_field(params, "actor"),
            action: string_field(params, "action"),
            target: string_field(params, "target"),
            // Absent means empty; an explicit null stays null.
            meta: params.get("meta").cloned().unwrap_or_else(empty_meta),
        }
    }
}

impl Default for AdminActionRequest {
    fn default() -> Self {
        Self {
            actor: None,
            action: None,
            target: None,
            meta: empty_meta(),
        }
    }
}

fn empty_meta() -> Value {
    Value::Object(Map::new())
}

// ============================================================================
// Record Service
// ============================================================================

pub struct RecordService {
    store: JsonStore,
    paths: DataPaths,
}

impl RecordService {
    pub fn new(store: JsonStore, paths: DataPaths) -> Self {
        Self { store, paths }
    }

    /// Full user collection, unmodified. Reference data only.
    pub fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.store.read_or_default(&self.paths.users, Vec::new())?)
    }

    /// Full appointment collection, unmodified.
    pub fn list_appointments(&self) -> ServiceResult<Vec<Appointment>> {
        Ok(self
            .store
            .read_or_default(&self.paths.appointments, Vec::new())?)
    }

    /// Appends a new pending appointment. No uniqueness check against
    /// existing `appointment_id` values — that is the caller's problem.
    pub fn create_appointment(
        &self,
        req: CreateAppointmentRequest,
    ) -> ServiceResult<Appointment> {
        let mut appointments: Vec<Appointment> = self
            .store
            .read_or_default(&self.paths.appointments, Vec::new())?;
        let item = Appointment {
            appointment_id: req.appointment_id,
            patient_id: req.patient_id,
            practitioner_id: req.practitioner_id,
            scheduled_at: req.scheduled_at,
            status: AppointmentStatus::Pending,
            created_by: req.created_by,
            cancelled_by: None,
            cancellation_reason: None,
            escalated_to: None,
            escalation_reason: None,
            is_deleted: false,
            created_at: now_ist(),
            updated_at: now_ist(),
        };
        appointments.push(item.clone());
        self.store.write_atomic(&self.paths.appointments, &appointments)?;
        self.append_audit("create_appointment", &item)?;
        debug!(appointment_id = ?item.appointment_id, "appointment created");
        Ok(item)
    }

    /// Cancels the first appointment matching the requested id, in insertion
    /// order; later duplicates are untouched.
    pub fn cancel_appointment(
        &self,
        req: CancelAppointmentRequest,
    ) -> ServiceResult<Appointment> {
        let mut appointments: Vec<Appointment> = self
            .store
            .read_or_default(&self.paths.appointments, Vec::new())?;
        let found = appointments
            .iter_mut()
            .find(|a| a.appointment_id == req.appointment_id)
            .ok_or(ServiceError::NotFound)?;
        found.status = AppointmentStatus::Cancelled;
        found.cancelled_by = req.by;
        found.cancellation_reason = req.reason;
        found.updated_at = now_ist();
        let updated = found.clone();
        self.store.write_atomic(&self.paths.appointments, &appointments)?;
        self.append_audit("cancel_appointment", &updated)?;
        debug!(appointment_id = ?updated.appointment_id, "appointment cancelled");
        Ok(updated)
    }

    /// Records an escalation on the first matching appointment. Status is
    /// left unchanged.
    pub fn escalate_appointment(
        &self,
        req: EscalateAppointmentRequest,
    ) -> ServiceResult<Appointment> {
        let mut appointments: Vec<Appointment> = self
            .store
            .read_or_default(&self.paths.appointments, Vec::new())?;
        let found = appointments
            .iter_mut()
            .find(|a| a.appointment_id == req.appointment_id)
            .ok_or(ServiceError::NotFound)?;
        found.escalated_to = req.escalated_to;
        found.escalation_reason = req.reason;
        found.updated_at = now_ist();
        let updated = found.clone();
        self.store.write_atomic(&self.paths.appointments, &appointments)?;
        self.append_audit("escalate_appointment", &updated)?;
        debug!(appointment_id = ?updated.appointment_id, "appointment escalated");
        Ok(updated)
    }

    /// Appends a freeform entry to the admin-action log. Touches no
    /// appointment record.
    pub fn record_admin_action(&self, req: AdminActionRequest) -> ServiceResult<()> {
        let entry = AdminActionEntry {
            ts: now_ist(),
            actor: req.actor,
            action: req.action,
            target: req.target,
            meta: req.meta,
        };
        let mut log: Vec<AdminActionEntry> = self
            .store
            .read_or_default(&self.paths.admin_actions, Vec::new())?;
        log.push(entry.clone());
        self.store.write_atomic(&self.paths.admin_actions, &log)?;
        self.append_audit("admin_action", &entry)?;
        Ok(())
    }

    fn append_audit<T: serde::Serialize>(&self, event: &str, data: &T) -> ServiceResult<()> {
        let data = serde_json::to_value(data).map_err(|e| StoreError::Serialize(e.to_string()))?;
        let mut log: Vec<AuditLogEntry> = self
            .store
            .read_or_default(&self.paths.audit_log, Vec::new())?;
        log.push(AuditLogEntry {
            ts: now_ist(),
            event: event.to_string(),
            data,
        });
        self.store.write_atomic(&self.paths.audit_log, &log)?;
        Ok(())
    }
}
