pub mod config_io;
pub mod logging;
pub mod sqlite_store;
pub mod store;

pub use sqlite_store::SqliteStore;
pub use store::{EntityKind, EntityStore, StoreError};
