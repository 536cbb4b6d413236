pub mod config;
pub mod error;
pub mod postgres;
pub mod routes;
pub mod store;

pub use config::{Backend, ServerConfig};
pub use error::{ApiError, ConfigError, StorageError};
pub use postgres::PgSummaryStore;
pub use routes::{AppState, StorageStatus, router};
pub use store::{ArchiveStore, ArchivedSource, FsArchiveStore, MemoryStore, StoredSummary, SummaryStore, archive_key};
