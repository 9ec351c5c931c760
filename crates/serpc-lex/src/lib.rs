//! serpc-lex - Lexical analyzer for the Serpent language.
//!
//! Transforms Serpent source text into a token stream. Besides the usual
//! scanning (keywords, identifiers, numbers, strings, operators), the lexer
//! reconciles free-form tokens with the significant-whitespace layout of the
//! language: it keeps an indentation stack and synthesizes `Indent`,
//! `Dedent`, and `Newline` tokens, closing every open block before the final
//! `End` token.
//!
//! The crate surface is [`tokenize`]; the [`Lexer`] type is exported for
//! callers that want to share a [`Handler`](serpc_util::Handler) across
//! phases.
//!
//! # Example
//!
//! ```
//! use serpc_lex::{tokenize, TokenKind};
//!
//! let (tokens, errors) = tokenize("def f():\n    return 1\n");
//! assert!(errors.is_empty());
//! assert_eq!(tokens[0].kind, TokenKind::Def);
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::End);
//! ```

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token, TokenKind};

use serpc_util::{Handler, LexError};

/// Tokenize a source string.
///
/// Returns the tokens together with any lexical errors. Lexing aborts at
/// the first error, so the error vector holds at most one entry and the
/// token vector then holds the prefix scanned before the failure.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let handler = Handler::new();
    let tokens = Lexer::new(source, &handler).tokenize();
    let errors = handler
        .take()
        .into_iter()
        .map(|d| LexError::new(d.message, d.span))
        .collect();
    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_success() {
        let (tokens, errors) = tokenize("x = 1 + 2\n");
        assert!(errors.is_empty());
        assert_eq!(tokens.len(), 7); // x = 1 + 2 newline end
    }

    #[test]
    fn test_tokenize_error() {
        let (tokens, errors) = tokenize("x = ?\n");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("unknown character"));
        assert_eq!(errors[0].line, 1);
        assert_eq!(errors[0].column, 5);
        // The prefix before the failure is still returned.
        assert_eq!(tokens.len(), 2);
    }
}
