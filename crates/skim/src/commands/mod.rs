//! CLI command implementations

pub mod kinds;
pub mod list;
pub mod version;
