pub mod access;
mod attributes;
mod directory;
mod export;

pub use access::{ScopedAccess, Unsandboxed};
pub use attributes::describe;
pub use directory::{list_directory, sort_entries};
pub use export::{default_export_name, write_report};
