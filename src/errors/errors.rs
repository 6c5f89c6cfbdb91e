use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A lexing diagnostic. Diagnostics never stop a scan; they describe
/// anomalies that are also visible in the returned token tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnmatchedClosingBracket { .. } => "UnmatchedClosingBracket",
            ErrorImpl::MismatchedClosingBracket { .. } => "MismatchedClosingBracket",
            ErrorImpl::UnclosedBracket { .. } => "UnclosedBracket",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnterminatedUriLiteral => "UnterminatedUriLiteral",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnmatchedClosingBracket { token } => ErrorTip::Suggestion(format!(
                "`{}` has no matching opening bracket",
                token
            )),
            ErrorImpl::MismatchedClosingBracket { expected, found } => {
                ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, found))
            }
            ErrorImpl::UnclosedBracket { token } => {
                ErrorTip::Suggestion(format!("`{}` is never closed", token))
            }
            ErrorImpl::UnterminatedString { quote } => {
                ErrorTip::Suggestion(format!("Add a closing {} to end the string", quote))
            }
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Add `:)` to end the comment"))
            }
            ErrorImpl::UnterminatedUriLiteral => {
                ErrorTip::Suggestion(String::from("Add `}` to end the braced URI literal"))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.internal_error, self.position.0)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unmatched closing bracket: {token:?}")]
    UnmatchedClosingBracket { token: String },
    #[error("mismatched closing bracket: expected {expected:?}, found {found:?}")]
    MismatchedClosingBracket { expected: char, found: char },
    #[error("unclosed bracket: {token:?}")]
    UnclosedBracket { token: String },
    #[error("unterminated string literal")]
    UnterminatedString { quote: char },
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("unterminated braced URI literal")]
    UnterminatedUriLiteral,
}
