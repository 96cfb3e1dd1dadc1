use std::borrow::Cow;

/// Errors raised while assembling a feature registry.
#[tforge_derive::forge_error]
pub enum RegistryError {
    #[error("Duplicate feature{}: '{id}' is already registered", format_context(.context))]
    DuplicateFeature { id: String, context: Option<Cow<'static, str>> },

    #[error("Self reference{}: '{id}' lists itself as a {relation}", format_context(.context))]
    SelfReference { id: String, relation: &'static str, context: Option<Cow<'static, str>> },

    /// A feature that both requires and excludes the same id can never be selected validly.
    #[error(
        "Unsatisfiable feature{}: '{id}' both depends on and conflicts with '{other}'",
        format_context(.context)
    )]
    Unsatisfiable { id: String, other: String, context: Option<Cow<'static, str>> },

    #[error(
        "Unknown reference{}: '{id}' names unregistered {relation} '{reference}'",
        format_context(.context)
    )]
    UnknownReference {
        id: String,
        reference: String,
        relation: &'static str,
        context: Option<Cow<'static, str>>,
    },

    #[error("Feature table is not valid JSON{}: {source}", format_context(.context))]
    Json { source: serde_json::Error, context: Option<Cow<'static, str>> },

    #[error("Feature table could not be read{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },
}
