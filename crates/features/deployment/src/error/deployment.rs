use crate::error::{ParameterError, RegistryError};
use std::borrow::Cow;

/// Errors of the deployment wizard: template lookup, parameter input and finalization.
#[tforge_derive::forge_error]
pub enum DeploymentError {
    #[error("Feature registry error{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },

    #[error("Parameter error{}: {source}", format_context(.context))]
    Parameter { source: ParameterError, context: Option<Cow<'static, str>> },

    #[error("Unknown template{}: '{id}'", format_context(.context))]
    UnknownTemplate { id: String, context: Option<Cow<'static, str>> },

    #[error("Unknown feature{}: '{id}'", format_context(.context))]
    UnknownFeature { id: String, context: Option<Cow<'static, str>> },

    #[error("Unknown parameter{}: '{feature}' has no parameter '{name}'", format_context(.context))]
    UnknownParameter { feature: String, name: String, context: Option<Cow<'static, str>> },

    #[error("Invalid feature selection{}: {}", format_context(.context), joined(.errors))]
    InvalidSelection { errors: Vec<String>, context: Option<Cow<'static, str>> },

    #[error("Internal deployment error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn joined(errors: &[String]) -> String {
    errors.join("; ")
}
