//! Lexical analysis for Jsonnet source.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - Character cursor management with line/column tracking
//! - Recognition of keywords, identifiers, strings, numbers and operators
//! - Token position tracking for error reporting
//! - Comments (`//`, `#`, `/* */`) and whitespace elision

pub mod cursor;
pub mod lexer;
pub mod tokens;
