use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};

pub(crate) type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub(crate) fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

/// Every byte of the input belongs to exactly one token, so spans can be
/// copied back into the output verbatim.
#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[token("d")]
    Die,
    #[token("+")]
    Plus,
    #[token("b")]
    Brutal,

    #[regex(r"[^0-9d+b]+")]
    Text,

    #[error]
    Error,
}
