//! CLI command implementations

pub mod compute;
pub mod json_output;
pub mod mixture;
pub mod note;
pub mod rank;

mod environment;
mod table;

pub use environment::Environment;
