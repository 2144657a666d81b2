//! Blog services.

pub mod service;

pub use service::{BlogPayload, BlogService};
