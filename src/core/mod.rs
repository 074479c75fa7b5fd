pub mod error;
pub mod time;
pub mod types;

pub use error::{Result, StoreError};
pub use time::now_ist;
pub use types::{AdminActionEntry, Appointment, AppointmentStatus, AuditLogEntry, Role, User};
