use std::fmt::{self, Display};

/// Errors produced when parsing model identifiers from strings.
///
/// Color coercion never goes through this type; it is only surfaced by the
/// strict `FromStr` implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownColor(String),
    UnknownTemplate(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownColor(raw) => {
                write!(f, "unsupported color token: {raw:?}")
            }
            ModelError::UnknownTemplate(raw) => {
                write!(f, "unknown template id: {raw:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
