use lazy_static::lazy_static;
use serde::{Serialize, Serializer};
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("assert", TokenKind::Assert);
        map.insert("error", TokenKind::Error);
        map.insert("if", TokenKind::If);
        map.insert("then", TokenKind::Then);
        map.insert("else", TokenKind::Else);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("function", TokenKind::Function);
        map.insert("import", TokenKind::Import);
        map.insert("importstr", TokenKind::Importstr);
        map.insert("tailstrict", TokenKind::Tailstrict);
        map.insert("in", TokenKind::In);
        map.insert("local", TokenKind::Local);
        map.insert("null", TokenKind::Null);
        map.insert("self", TokenKind::SelfKw);
        map.insert("super", TokenKind::Super);
        map
    };
}

/// Lexeme carried by the end-of-input token.
pub const EOF_LEXEME: &str = "(EOF)";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,

    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Dot,
    Semicolon,
    Colon,

    Bang,
    Dollar,
    Tilde,
    Plus,
    Minus,
    Amp,
    Pipe,
    Caret,
    Assign,
    LAngle,
    RAngle,
    Star,
    Slash,
    Perc,

    String,
    Ident,
    Number,

    // Reserved
    Assert,
    Error,
    If,
    Then,
    Else,
    True,
    False,
    For,
    Function,
    Import,
    Importstr,
    Tailstrict,
    In,
    Local,
    Null,
    SelfKw,
    Super,
}

impl TokenKind {
    /// Canonical upper-case name shared with the parser's grammar.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EOF => "EOF",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Bang => "BANG",
            TokenKind::Dollar => "DOLLAR",
            TokenKind::Tilde => "TILDE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Amp => "AMP",
            TokenKind::Pipe => "PIPE",
            TokenKind::Caret => "CARET",
            TokenKind::Assign => "ASSIGN",
            TokenKind::LAngle => "LANGLE",
            TokenKind::RAngle => "RANGLE",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Perc => "PERC",
            TokenKind::String => "STRING",
            TokenKind::Ident => "IDENT",
            TokenKind::Number => "NUMBER",
            TokenKind::Assert => "ASSERT",
            TokenKind::Error => "ERROR",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Function => "FUNCTION",
            TokenKind::Import => "IMPORT",
            TokenKind::Importstr => "IMPORTSTR",
            TokenKind::Tailstrict => "TAILSTRICT",
            TokenKind::In => "IN",
            TokenKind::Local => "LOCAL",
            TokenKind::Null => "NULL",
            TokenKind::SelfKw => "SELF",
            TokenKind::Super => "SUPER",
        }
    }

    /// Kind of a single-character punctuation or operator token.
    pub fn from_symbol(c: char) -> Option<TokenKind> {
        let kind = match c {
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '!' => TokenKind::Bang,
            '$' => TokenKind::Dollar,
            '~' => TokenKind::Tilde,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '&' => TokenKind::Amp,
            '|' => TokenKind::Pipe,
            '^' => TokenKind::Caret,
            '=' => TokenKind::Assign,
            '<' => TokenKind::LAngle,
            '>' => TokenKind::RAngle,
            '*' => TokenKind::Star,
            '%' => TokenKind::Perc,
            _ => return None,
        };

        Some(kind)
    }

    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }

    /// Whether the lexeme carries information beyond the kind itself.
    pub fn has_value(&self) -> bool {
        matches!(self, TokenKind::String | TokenKind::Ident | TokenKind::Number)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

// Positions are diagnostic data; two tokens are the same token if they
// classify the same text.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.lexeme == other.lexeme
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.kind.has_value() {
            write!(f, "{} ({})", self.kind, self.lexeme)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl Token {
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EOF
    }
}
