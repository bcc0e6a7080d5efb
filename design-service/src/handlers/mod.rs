//! HTTP handlers for the design service.

pub mod designs;
pub mod fallback;
pub mod health;
pub mod metrics;
pub mod suggestions;
