use std::borrow::Cow;

/// A raw parameter input that does not satisfy its declared rule.
#[tforge_derive::forge_error]
#[derive(PartialEq, Eq)]
pub enum ParameterError {
    #[error(
        "Invalid value for '{name}'{}: expected {expected}, got '{value}'",
        format_context(.context)
    )]
    Invalid {
        name: String,
        expected: &'static str,
        value: String,
        context: Option<Cow<'static, str>>,
    },

    #[error("Value {value} for '{name}' is out of range{}: allowed {min}..={max}", format_context(.context))]
    OutOfRange { name: String, value: u128, min: u128, max: u128, context: Option<Cow<'static, str>> },

    #[error("Missing value for required parameter '{name}'{}", format_context(.context))]
    Missing { name: String, context: Option<Cow<'static, str>> },

    #[error(
        "Value for '{name}' does not match pattern{}: /{pattern}/",
        format_context(.context)
    )]
    PatternMismatch { name: String, pattern: String, context: Option<Cow<'static, str>> },
}

impl ParameterError {
    /// Name of the parameter the error refers to.
    #[must_use]
    pub fn parameter(&self) -> &str {
        match self {
            Self::Invalid { name, .. }
            | Self::OutOfRange { name, .. }
            | Self::Missing { name, .. }
            | Self::PatternMismatch { name, .. } => name,
        }
    }
}
