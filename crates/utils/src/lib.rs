mod bytes;
pub mod datetime;
mod path;

pub use bytes::format_bytes;
pub use path::disk_usage;
