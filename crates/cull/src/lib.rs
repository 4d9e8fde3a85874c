pub mod audit;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod fs;
pub mod select;
pub mod session;
pub mod space;
pub mod util;

pub use audit::AuditLog;
pub use catalog::{
    import_directory, Asset, AssetSource, ImportOptions, ImportStats, RecordStore, SqliteCatalog,
    REJECTED_RATING,
};
pub use config::{Config, Overrides};
pub use engine::{DeletionEngine, DeletionOutcome, FailedDeletion, Progress, SessionReport};
pub use error::{CullError, Result};
pub use fs::{probe_size, Filesystem, LocalFs, SidecarResolver};
pub use select::select_rejected;
pub use session::{Cleaner, CollectionInfo, DeleteOutcome, RunGuard, RunStatus};
pub use space::DryRunReport;
