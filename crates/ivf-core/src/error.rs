use std::fmt;

/// Strict parse failure for a single survey value.
///
/// Only the typed `FromStr` parsers return this; the form and transport paths
/// never fail and fall back to defaults instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    AgeRange(String),
    YesNo(String),
    Condition(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::AgeRange(v) => write!(
                f,
                "unknown age range '{v}' (expected one of under-30, 30-34, 35-37, 38-40, 41-43, above-43)"
            ),
            ParseError::YesNo(v) => write!(f, "expected 'yes' or 'no', got '{v}'"),
            ParseError::Condition(v) => write!(
                f,
                "unknown medical condition '{v}' (expected one of PCOS, Endometriosis, Low Ovarian Reserve, Male Factor Infertility)"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

pub type Result<T> = std::result::Result<T, ParseError>;
