//! Closed lexical vocabulary of the benchmarked language
//!
//! Every surface form appears in exactly one category, so sampling the
//! union is the same as sampling distinct surface forms.

use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexemeCategory {
    Keyword,
    Operator,
    Identifier,
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
}

/// A surface form and the category it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Lexeme {
    pub text: &'static str,
    pub category: LexemeCategory,
}

const fn lexeme(text: &'static str, category: LexemeCategory) -> Lexeme {
    Lexeme { text, category }
}

use LexemeCategory::*;

pub const KEYWORDS: [Lexeme; 22] = [
    lexeme("bool", Keyword),
    lexeme("False", Keyword),
    lexeme("int", Keyword),
    lexeme("float", Keyword),
    lexeme("str", Keyword),
    lexeme("if", Keyword),
    lexeme("else", Keyword),
    lexeme("elif", Keyword),
    lexeme("range", Keyword),
    lexeme("while", Keyword),
    lexeme("for", Keyword),
    lexeme("break", Keyword),
    lexeme("import", Keyword),
    lexeme("continue", Keyword),
    lexeme("def", Keyword),
    lexeme("return", Keyword),
    lexeme("or", Keyword),
    lexeme("and", Keyword),
    lexeme("not", Keyword),
    lexeme("in", Keyword),
    lexeme("True", Keyword),
    lexeme("None", Keyword),
];

// Brackets are left out: unbalanced ones make a flat stream unlexable
pub const OPERATORS: [Lexeme; 14] = [
    lexeme("%", Operator),
    lexeme(".", Operator),
    lexeme(",", Operator),
    lexeme("=", Operator),
    lexeme("+", Operator),
    lexeme("-", Operator),
    lexeme("*", Operator),
    lexeme("/", Operator),
    lexeme("==", Operator),
    lexeme("!=", Operator),
    lexeme("<", Operator),
    lexeme(">", Operator),
    lexeme("<=", Operator),
    lexeme(">=", Operator),
];

pub const IDENTIFIERS: [Lexeme; 8] = [
    lexeme("Z", Identifier),
    lexeme("V", Identifier),
    lexeme("Za_Pobedy", Identifier),
    lexeme("x", Identifier),
    lexeme("y", Identifier),
    lexeme("i", Identifier),
    lexeme("foo", Identifier),
    lexeme("bar", Identifier),
];

pub const LITERALS: [Lexeme; 10] = [
    lexeme("0", IntegerLiteral),
    lexeme("1", IntegerLiteral),
    lexeme("23122", IntegerLiteral),
    lexeme("42.24", FloatLiteral),
    lexeme("1.0", FloatLiteral),
    lexeme("0.0", FloatLiteral),
    lexeme("0.3232", FloatLiteral),
    lexeme("232.0", FloatLiteral),
    lexeme("\"Hello\"", StringLiteral),
    lexeme("\"Quote2\"", StringLiteral),
];

/// Union of all categories, in catalog order
pub static ALL_LEXEMES: Lazy<Vec<Lexeme>> = Lazy::new(|| {
    OPERATORS
        .iter()
        .chain(KEYWORDS.iter())
        .chain(IDENTIFIERS.iter())
        .chain(LITERALS.iter())
        .copied()
        .collect()
});

/// Identifier pool used for function and parameter names
pub fn identifier_pool() -> impl Iterator<Item = &'static str> {
    IDENTIFIERS.iter().map(|lexeme| lexeme.text)
}

/// Find the lexeme with the given surface form
pub fn lookup(text: &str) -> Option<&'static Lexeme> {
    ALL_LEXEMES.iter().find(|lexeme| lexeme.text == text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_surface_forms_are_unique() {
        let distinct: HashSet<_> = ALL_LEXEMES.iter().map(|lexeme| lexeme.text).collect();
        assert_eq!(distinct.len(), ALL_LEXEMES.len());
    }

    #[test]
    fn test_union_covers_every_category() {
        assert_eq!(ALL_LEXEMES.len(), 22 + 14 + 8 + 10);
        for category in [
            Keyword,
            Operator,
            Identifier,
            IntegerLiteral,
            FloatLiteral,
            StringLiteral,
        ] {
            assert!(ALL_LEXEMES.iter().any(|lexeme| lexeme.category == category));
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Za_Pobedy").map(|l| l.category), Some(Identifier));
        assert_eq!(lookup("0.3232").map(|l| l.category), Some(FloatLiteral));
        assert!(lookup("lambda").is_none());
    }

    #[test]
    fn test_every_lexeme_is_a_single_baseline_token() {
        for lexeme in ALL_LEXEMES.iter() {
            let tokens = pybench_baseline::tokenize(lexeme.text).unwrap();
            // the token itself plus the closing newline
            assert_eq!(tokens.len(), 2, "{:?}", lexeme.text);
        }
    }
}
