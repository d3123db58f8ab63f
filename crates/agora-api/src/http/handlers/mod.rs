//! REST API handlers.

pub mod agent;
pub mod message;
pub mod summary;
pub mod thread;
