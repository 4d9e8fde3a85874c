pub mod format;
pub mod progress;

pub use format::{format_bytes, format_elapsed, format_timestamp};
pub use progress::{advance, deletion_progress, import_spinner};
