//! Helper macros shared by the lexer.

/// Builds a [`Token`](crate::lexer::tokens::Token) from a kind, its lexeme
/// and the span it covers.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Ident, String::from("name"), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $lexeme:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            lexeme: $lexeme,
            span: $span,
        }
    };
}
