//! Post services.

pub mod service;

pub use service::{PostPayload, PostService};
