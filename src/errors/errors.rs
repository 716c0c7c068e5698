use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A fatal lex error, positioned at the start of the offending construct.
#[derive(Debug, Clone, PartialEq, Eq)]
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

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::MalformedNumber { .. } => "MalformedNumber",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { character } => {
                ErrorTip::Suggestion(format!("Unexpected character `{}`", character.escape_default()))
            }
            ErrorImpl::UnterminatedString { quote } => ErrorTip::Suggestion(format!(
                "String opened here is never closed, expected a closing `{}`",
                quote
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Comment opened here is never closed with `*/`"))
            }
            ErrorImpl::MalformedNumber { lexeme } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, expected digits after `.` or exponent",
                lexeme
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

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

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("unterminated string literal opened with {quote:?}")]
    UnterminatedString { quote: char },
    #[error("unterminated multi-line comment")]
    UnterminatedComment,
    #[error("malformed number literal: {lexeme:?}")]
    MalformedNumber { lexeme: String },
}
