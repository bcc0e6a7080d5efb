pub mod design;
pub mod suggestion;

pub use design::{DesignSaveResult, DesignSubmission};
pub use suggestion::{SuggestionRequest, SuggestionResponse};
