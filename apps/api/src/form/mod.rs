// Form URL Builder
// Implements: prefilled link encoding, example-link decoding, deployment form defaults.
// Pure, synchronous transforms; the HTTP layer lives in handlers.

pub mod builder;
pub mod defaults;
pub mod handlers;
pub mod models;
pub mod template;

pub use models::{FieldMapping, FieldValue, FieldValues, FormError};
