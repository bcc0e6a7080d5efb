pub mod metrics;
pub mod providers;

pub use providers::{Generation, ProviderError, TextProvider};
