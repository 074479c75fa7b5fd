use std::path::{Path, PathBuf};

/// Locations of the four collection files, derived from one data directory.
///
/// Carried as an explicit value rather than process-wide constants so tests
/// can point a service at a temporary directory.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub users: PathBuf,
    pub appointments: PathBuf,
    pub admin_actions: PathBuf,
    pub audit_log: PathBuf,
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            users: data_dir.join("users.json"),
            appointments: data_dir.join("appointments.json"),
            admin_actions: data_dir.join("admin_actions.json"),
            audit_log: data_dir.join("audit_log.json"),
        }
    }
}
