//! logos-based declaration-list tokenizer.
//!
//! Inline style strings are split into declaration fragments. Both `;` and `,`
//! end a declaration; everything between two separators is one fragment.
//! Fragments are returned untrimmed, whitespace handling belongs to the parser.

use logos::Logos;

/// Token of an inline declaration list.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `;` or `,`.
    #[regex(r"[;,]")]
    Separator,

    /// Any run of characters up to the next separator.
    #[regex(r"[^;,]+")]
    Fragment,
}

/// Split a declaration list into its fragments.
///
/// Empty fragments (two separators in a row) produce nothing.
pub fn fragments(input: &str) -> Vec<&str> {
    Token::lexer(input)
        .spanned()
        .filter_map(|(result, span)| match result {
            Ok(Token::Fragment) => Some(&input[span]),
            _ => None,
        })
        .collect()
}
