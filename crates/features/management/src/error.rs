use std::borrow::Cow;

/// Errors of the contract management slice.
#[tforge_derive::forge_error]
pub enum ManagementError {
    #[error("Invalid function selector{}: '{value}'", format_context(.context))]
    InvalidSelector { value: String, context: Option<Cow<'static, str>> },

    /// Bytecode that is not hex (an optional `0x` prefix is accepted).
    #[error("Invalid bytecode{}: {source}", format_context(.context))]
    InvalidBytecode { source: hex::FromHexError, context: Option<Cow<'static, str>> },

    /// An allowance that is neither decimal nor `0x`-prefixed hex.
    #[error("Invalid allowance{}: '{value}'", format_context(.context))]
    InvalidAllowance { value: String, context: Option<Cow<'static, str>> },

    #[error("Unknown function{}: '{name}'", format_context(.context))]
    UnknownFunction { name: String, context: Option<Cow<'static, str>> },
}
