//! Markup tokenizer.
//!
//! A single token set serves both tag interiors and text content: the
//! parser knows which side of a `<` it is on and simply ignores word-like
//! tokens that occur in text. Comments, doctypes and processing
//! instructions are consumed whole so their contents cannot be mistaken
//! for tags. Lexing never fails; bytes that match nothing surface as
//! error items the parser skips.

use logos::{Lexer, Logos};

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Token {
    /// A `<!-- ... -->` comment, consumed in one token.
    #[token("<!--", lex_comment)]
    Comment,

    /// A doctype or processing instruction, consumed up to the next `>`.
    #[regex(r"<[!?]", lex_decl)]
    Decl,

    #[token("</")]
    CloseTagStart,

    #[token("<")]
    TagStart,

    #[token("/>")]
    SelfCloseEnd,

    #[token(">")]
    TagEnd,

    #[token("=")]
    Equals,

    #[token("/")]
    Slash,

    /// Quoted values exclude `<`/`>` so prose apostrophes and quotes in
    /// text content cannot swallow real tags.
    #[regex(r#""[^"<>]*""#)]
    DoubleQuoted,

    #[regex(r"'[^'<>]*'")]
    SingleQuoted,

    /// Tag/attribute names and unquoted attribute values.
    #[regex(r"[A-Za-z0-9_][A-Za-z0-9_:.\-]*")]
    Name,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    Whitespace,
}

fn lex_comment(lex: &mut Lexer<'_, Token>) {
    match lex.remainder().find("-->") {
        Some(end) => lex.bump(end + 3),
        None => lex.bump(lex.remainder().len()),
    }
}

fn lex_decl(lex: &mut Lexer<'_, Token>) {
    match lex.remainder().find('>') {
        Some(end) => lex.bump(end + 1),
        None => lex.bump(lex.remainder().len()),
    }
}
