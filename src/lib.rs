// ============================================================================
// Clinicfile Library
// ============================================================================

pub mod core;
pub mod service;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use crate::core::types::{
    AdminActionEntry, Appointment, AppointmentStatus, AuditLogEntry, Role, User,
};
pub use crate::core::{Result, StoreError};
pub use crate::service::{
    AdminActionRequest, CancelAppointmentRequest, CreateAppointmentRequest,
    EscalateAppointmentRequest, RecordService, ServiceError,
};
pub use crate::storage::{CorruptPolicy, DataPaths, JsonStore};
