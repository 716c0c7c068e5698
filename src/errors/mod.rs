//! Error types and error handling for the lexer.
//!
//! This module defines the fatal conditions that abort a lex:
//!
//! - Error structures with source position information
//! - Specific error variants for each malformed-input case
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
