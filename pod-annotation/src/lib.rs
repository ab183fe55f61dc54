use std::fmt;

use constcat::concat;

pub use field::FieldError;
pub use field::FieldErrorList;
pub use field::FieldErrorType;
pub use field::FieldPath;
pub use invalid::GroupKind;
pub use invalid::InvalidError;

pub mod webhook;

mod field;
mod invalid;

/// Annotation every admitted Pod must carry.
pub const ANNOTATION_KEY: &str = "hitsumabushi845.github.io/sample-annotation";

/// Environment variable injected into single-container Pods.
pub const SAMPLE_ENV: &str = "SAMPLE_ENV";

pub const ANNOTATION_REQUIRED_MESSAGE: &str =
    concat!("Annotation ", ANNOTATION_KEY, " must be defined.");
