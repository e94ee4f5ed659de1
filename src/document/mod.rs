pub mod handlers;
pub mod models;
pub mod workflow;

#[cfg(test)]
mod mod_tests;

pub use models::*;
pub use workflow::{Actor, WorkflowError};
