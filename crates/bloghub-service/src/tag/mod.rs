//! Tag services.

pub mod service;

pub use service::{TagPayload, TagService};
