//! Tokenizer for the benchmarked subset using logos
//!
//! Logos produces the flat token stream; indentation is resolved afterwards
//! by turning line breaks into `Newline`, `Indent` and `Dedent` tokens.

use std::ops::Range;

use logos::Logos;

use crate::error::{BaselineError, Result};

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token<'a> {
    // Keywords
    #[token("def")]
    Def,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("import")]
    Import,
    #[token("range")]
    Range,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("True")]
    True,
    #[token("False")]
    False,
    #[token("None")]
    NoneLiteral,

    // Type keywords
    #[token("int")]
    IntType,
    #[token("float")]
    FloatType,
    #[token("str")]
    StrType,
    #[token("bool")]
    BoolType,

    // Literals
    #[regex(r"[0-9]+\.[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Integer(i64),

    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    Str(&'a str),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident(&'a str),

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("<=")]
    LessEq,
    #[token(">=")]
    GreaterEq,
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusAssign,
    #[token("-=")]
    MinusAssign,
    #[token("*=")]
    StarAssign,
    #[token("/=")]
    SlashAssign,
    #[token("%=")]
    PercentAssign,
    #[token("->")]
    Arrow,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    /// Line break; carries the indentation width of the following line
    #[regex(r"\n[ \t]*", |lex| lex.slice().len() - 1)]
    Newline(usize),

    // Synthesized by the layout pass
    Indent,
    Dedent,
}

/// A token with its byte range in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<'a> {
    pub token: Token<'a>,
    pub span: Range<usize>,
}

/// Tokenize `source`, resolving indentation into block tokens.
///
/// Blank and comment-only lines produce no tokens. Every logical line
/// ends with a `Newline`, and all open blocks are closed at end of input.
pub fn tokenize(source: &str) -> Result<Vec<Spanned<'_>>> {
    let mut lexer = Token::lexer(source);
    let mut raw = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => raw.push(Spanned { token, span }),
            Err(()) => {
                return Err(BaselineError::UnexpectedCharacter {
                    position: span.start,
                    text: lexer.slice().to_string(),
                })
            }
        }
    }

    layout(raw, source.len())
}

fn layout(raw: Vec<Spanned<'_>>, end: usize) -> Result<Vec<Spanned<'_>>> {
    let mut out: Vec<Spanned<'_>> = Vec::with_capacity(raw.len() + 16);
    let mut indents = vec![0usize];
    let mut iter = raw.into_iter().peekable();

    while let Some(item) = iter.next() {
        let Token::Newline(width) = item.token else {
            out.push(item);
            continue;
        };

        // Only the last line break before real content decides indentation
        if matches!(
            iter.peek(),
            None | Some(Spanned {
                token: Token::Newline(_),
                ..
            })
        ) {
            continue;
        }

        let at = item.span.end;
        if ends_logical_line(&out) {
            out.push(Spanned {
                token: Token::Newline(width),
                span: item.span.clone(),
            });
        }

        let current = indents.last().copied().unwrap_or(0);
        if width > current {
            indents.push(width);
            out.push(Spanned {
                token: Token::Indent,
                span: at..at,
            });
            continue;
        }

        while width < indents.last().copied().unwrap_or(0) {
            indents.pop();
            out.push(Spanned {
                token: Token::Dedent,
                span: at..at,
            });
        }
        if width != indents.last().copied().unwrap_or(0) {
            return Err(BaselineError::InconsistentDedent { position: at });
        }
    }

    if ends_logical_line(&out) {
        out.push(Spanned {
            token: Token::Newline(0),
            span: end..end,
        });
    }
    while indents.len() > 1 {
        indents.pop();
        out.push(Spanned {
            token: Token::Dedent,
            span: end..end,
        });
    }

    Ok(out)
}

/// Whether a `Newline` is needed to terminate the current line
fn ends_logical_line(out: &[Spanned<'_>]) -> bool {
    match out.last() {
        None => false,
        Some(last) => !matches!(
            last.token,
            Token::Newline(_) | Token::Indent | Token::Dedent
        ),
    }
}
