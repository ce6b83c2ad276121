//! CLI command implementations.

pub mod extract;
pub mod serve;
pub mod summary;
pub mod validate;
