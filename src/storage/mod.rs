pub mod paths;
pub mod store;

pub use paths::DataPaths;
pub use store::{CorruptPolicy, JsonStore};
