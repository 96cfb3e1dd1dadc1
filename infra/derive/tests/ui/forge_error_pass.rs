use std::borrow::Cow;
use tforge_derive::forge_error;

#[forge_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Unknown feature{}: {id}", format_context(.context))]
    UnknownFeature { id: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let from_str: DemoError = "boom".into();
    assert!(matches!(from_str, DemoError::Internal { .. }));

    let from_string: DemoError = String::from("boom").into();
    assert_eq!(from_string.to_string(), "Internal error: boom");

    let io = std::io::Error::other("disk");
    let wrapped: DemoError = io.into();
    assert!(matches!(wrapped, DemoError::Io { context: None, .. }));
}
