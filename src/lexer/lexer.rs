use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::{
    cursor::Cursor,
    tokens::{Token, TokenKind, EOF_LEXEME, RESERVED_LOOKUP},
};

lazy_static! {
    // Longest run that could be meant as a number, including a dangling
    // `.` or exponent marker so those can be rejected instead of split.
    static ref NUMBER_PREFIX: Regex = Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]*)?([eE][+-]?[0-9]*)?").unwrap();
    static ref NUMBER_LITERAL: Regex = Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?$").unwrap();
}

/// Pull-based scanner over a single source buffer.
///
/// Each call to [`Lexer::next_token`] skips whitespace and comments and
/// returns exactly one token. Once the input is exhausted every further call
/// returns another `EOF` token. Iterating the lexer yields each token up to
/// and including the first `EOF`, or stops after the first error.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    file: Rc<String>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Lexer<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            cursor: Cursor::new(source, Rc::clone(&file_name)),
            file: file_name,
            finished: false,
        }
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    /// Returns the next token in the input stream.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        loop {
            self.eat_whitespace();

            let start = self.cursor.position();

            if self.cursor.is_at_end() {
                return Ok(MK_TOKEN!(
                    TokenKind::EOF,
                    String::from(EOF_LEXEME),
                    Span {
                        start: start.clone(),
                        end: start
                    }
                ));
            }

            let c = self.cursor.current();

            let mut token = match c {
                '/' => match self.cursor.peek() {
                    '/' => {
                        self.eat_current_line();
                        continue;
                    }
                    '*' => {
                        self.eat_multi_line_comment(&start)?;
                        continue;
                    }
                    _ => self.single(TokenKind::Slash, c, start),
                },
                '#' => {
                    self.eat_current_line();
                    continue;
                }
                '"' | '\'' => self.lex_string(c, start)?,
                _ if c.is_ascii_digit() => self.lex_number(start)?,
                _ if is_identifier_first(c) => self.lex_identifier(start),
                _ => match TokenKind::from_symbol(c) {
                    Some(kind) => self.single(kind, c, start),
                    None => {
                        return Err(self.error(ErrorImpl::UnrecognisedCharacter { character: c }, start))
                    }
                },
            };

            // Every scanner leaves the cursor on the last character of its lexeme.
            self.cursor.advance();
            token.span.end = self.cursor.position();

            trace!(
                kind = %token.kind,
                lexeme = %token.lexeme,
                line = token.span.start.line,
                column = token.span.start.column,
                "token"
            );

            return Ok(token);
        }
    }

    /// Drains the remaining input, returning every token up to and including `EOF`.
    pub fn lex(&mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = vec![];

        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);

            if done {
                self.finished = true;
                return Ok(tokens);
            }
        }
    }

    fn single(&self, kind: TokenKind, c: char, start: Position) -> Token {
        MK_TOKEN!(
            kind,
            c.to_string(),
            Span {
                start: start.clone(),
                end: start
            }
        )
    }

    fn lex_string(&mut self, quote: char, start: Position) -> Result<Token, Error> {
        // Skip the opening quote
        self.cursor.advance();
        let content_start = self.cursor.offset();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(ErrorImpl::UnterminatedString { quote }, start));
            }

            if self.cursor.current() == quote {
                break;
            }

            self.cursor.advance();
        }

        Ok(MK_TOKEN!(
            TokenKind::String,
            String::from(self.cursor.slice_from(content_start)),
            Span {
                start: start.clone(),
                end: start
            }
        ))
    }

    fn lex_identifier(&mut self, start: Position) -> Token {
        let mut lexeme = String::from(self.cursor.current());

        while is_identifier(self.cursor.peek()) {
            self.cursor.advance();
            lexeme.push(self.cursor.current());
        }

        let kind = RESERVED_LOOKUP
            .get(lexeme.as_str())
            .copied()
            .unwrap_or(TokenKind::Ident);

        MK_TOKEN!(
            kind,
            lexeme,
            Span {
                start: start.clone(),
                end: start
            }
        )
    }

    fn lex_number(&mut self, start: Position) -> Result<Token, Error> {
        let lexeme = match NUMBER_PREFIX.find(self.cursor.remainder()) {
            Some(matched) => matched.as_str().to_string(),
            None => {
                let character = self.cursor.current();
                return Err(self.error(ErrorImpl::UnrecognisedCharacter { character }, start));
            }
        };

        if !NUMBER_LITERAL.is_match(&lexeme) {
            return Err(self.error(ErrorImpl::MalformedNumber { lexeme }, start));
        }

        // Number literals are ASCII, one byte per character.
        for _ in 1..lexeme.len() {
            self.cursor.advance();
        }

        Ok(MK_TOKEN!(
            TokenKind::Number,
            lexeme,
            Span {
                start: start.clone(),
                end: start
            }
        ))
    }

    fn eat_whitespace(&mut self) {
        self.cursor
            .advance_while(|c| matches!(c, ' ' | '\t' | '\n' | '\r'));
    }

    fn eat_current_line(&mut self) {
        let line = self.cursor.position().line;
        self.cursor.advance_while(|c| c != '\n');
        self.cursor.advance();
        trace!(line, "skipped line comment");
    }

    fn eat_multi_line_comment(&mut self, start: &Position) -> Result<(), Error> {
        // Skip the opening `/*`
        self.cursor.advance();
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error(ErrorImpl::UnterminatedComment, start.clone()));
            }

            if self.cursor.current() == '*' && self.cursor.peek() == '/' {
                self.cursor.advance();
                self.cursor.advance();
                trace!(
                    from = start.line,
                    to = self.cursor.position().line,
                    "skipped block comment"
                );
                return Ok(());
            }

            self.cursor.advance();
        }
    }

    fn error(&mut self, error_impl: ErrorImpl, position: Position) -> Error {
        self.finished = true;
        let error = Error::new(error_impl, position);
        debug!(%error, "lexing aborted");
        error
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();

        if let Ok(token) = &result {
            if token.is_eof() {
                self.finished = true;
            }
        }

        Some(result)
    }
}

pub fn is_identifier_first(c: char) -> bool {
    c.is_uppercase() || c.is_lowercase() || c == '_'
}

pub fn is_identifier(c: char) -> bool {
    is_identifier_first(c) || c.is_numeric()
}

/// Lexes a whole source buffer into a token stream terminated by one `EOF`.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    debug!(file = %lex.file(), bytes = source.len(), "tokenizing");

    let tokens = lex.lex()?;

    debug!(file = %lex.file(), tokens = tokens.len(), "tokenized");

    Ok(tokens)
}
