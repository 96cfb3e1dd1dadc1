use std::borrow::Cow;
use tforge_derive::forge_error;

#[forge_error]
pub enum ChainError {
    #[error("Parse error{}: {source}", format_context(.context))]
    Parse { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Out of range{}: {value}", format_context(.context))]
    OutOfRange { value: u64, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u64, ChainError> {
    let value = raw.parse::<u64>().context("Parsing decimals")?;
    if value > 18 {
        return Err(ChainError::OutOfRange { value, context: None }).context("Checking decimals");
    }
    Ok(value)
}

fn main() {
    assert_eq!(parse("18").ok(), Some(18));

    let err = parse("x").unwrap_err();
    assert!(err.to_string().starts_with("Parse error (Parsing decimals)"));

    let err = parse("19").unwrap_err();
    assert_eq!(err.to_string(), "Out of range (Checking decimals): 19");
}
