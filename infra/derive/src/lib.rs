#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the `TokenForge` crates.
//!
//! Right now the crate ships a single attribute, [`forge_error`], which turns a plain enum into
//! a `thiserror` error with context support. Every library crate in the workspace declares its
//! error type through it, so `?` conversions and `.context(...)` calls look the same everywhere.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for domain error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait with `.context(...)` for
///   `Result<T, Name>` and for `Result<T, Source>` of every variant that wraps a source error.
/// * **Source Conversions**: Implements `From<Source>` for such variants so `?` just works.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant
///   with a `message` field exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. A variant with a `source` field (or a field marked `#[source]`/`#[from]`) must also carry
///    a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[tforge_derive::forge_error]
/// pub enum CatalogError {
///     #[error("Catalog JSON error{}: {source}", format_context(.context))]
///     Json { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load(raw: &str) -> Result<Vec<String>, CatalogError> {
///     serde_json::from_str(raw).context("Parsing feature table")
/// }
/// ```
#[proc_macro_attribute]
pub fn forge_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
