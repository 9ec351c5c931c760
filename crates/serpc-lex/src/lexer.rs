//! Lexer for Serpent source code.
//!
//! The lexer turns source text into a token vector in a single pass. On top
//! of the usual scanning work it manages the significant-whitespace layout:
//! an indentation stack synthesizes `Indent`/`Dedent` tokens at line starts,
//! every newline outside a string becomes a `Newline` token, and the stream
//! always ends with pending `Dedent`s followed by `End`.
//!
//! Errors are reported through the shared [`Handler`] and abort the scan at
//! the failing character; the returned vector holds the tokens lexed up to
//! that point.
//!
//! # Example
//!
//! ```
//! use serpc_util::Handler;
//! use serpc_lex::{Lexer, TokenKind};
//!
//! let handler = Handler::new();
//! let tokens = Lexer::new("x = 1\n", &handler).tokenize();
//!
//! assert!(!handler.has_errors());
//! assert!(matches!(tokens[0].kind, TokenKind::Ident(_)));
//! assert_eq!(tokens[1].kind, TokenKind::Eq);
//! assert_eq!(tokens[2].kind, TokenKind::Int(1));
//! ```

use serpc_util::{Handler, Span, Symbol};

use crate::cursor::Cursor;
use crate::token::{keyword_from_ident, Token, TokenKind};

/// How many columns a tab advances the indentation counter.
const TAB_WIDTH: u32 = 4;

/// The Serpent lexer.
///
/// Owns a [`Cursor`] over the source plus the indentation stack; one lexer
/// performs one translation and is consumed by [`Lexer::tokenize`].
pub struct Lexer<'a> {
    /// Character cursor over the source.
    cursor: Cursor<'a>,

    /// Diagnostic sink shared with the caller.
    handler: &'a Handler,

    /// Indentation stack in columns. The base level 0 is never popped.
    indent_stack: Vec<u32>,

    /// True when the next significant character starts a logical line.
    at_line_start: bool,

    /// Start byte offset of the token being lexed.
    token_start: usize,

    /// Start line of the token being lexed.
    token_start_line: u32,

    /// Start column of the token being lexed.
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`, reporting errors to `handler`.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            indent_stack: vec![0],
            at_line_start: true,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Scan the whole source into tokens.
    ///
    /// On success the vector ends with balancing `Dedent`s and an `End`
    /// token. On a lexical error the scan stops where it failed and the
    /// vector holds the prefix lexed so far, without the closing layout
    /// tokens.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            if self.at_line_start && !self.cursor.is_at_end() {
                if self.handle_indentation(&mut tokens).is_err() {
                    return tokens;
                }
            }

            if self.cursor.is_at_end() {
                break;
            }

            self.begin_token();
            let c = self.cursor.current_char();

            // Comments run to end of line and produce nothing.
            if c == '#' {
                self.skip_comment();
                continue;
            }

            // Newlines are significant: every one becomes a token and
            // re-arms indentation handling, blank lines included.
            if c == '\n' {
                self.cursor.advance();
                tokens.push(self.make_token(TokenKind::Newline));
                self.at_line_start = true;
                continue;
            }

            // Other whitespace between tokens is not.
            if c.is_whitespace() {
                self.skip_whitespace();
                continue;
            }

            let result = if c.is_ascii_digit() {
                self.lex_number()
            } else if c == '"'
                || c == '\''
                || (matches!(c, 'f' | 'F') && matches!(self.cursor.peek_char(1), '"' | '\''))
            {
                self.lex_string()
            } else if c.is_ascii_alphabetic() || c == '_' {
                Ok(self.lex_identifier())
            } else {
                self.lex_operator()
            };

            match result {
                Ok(kind) => tokens.push(self.make_token(kind)),
                Err(()) => return tokens,
            }
        }

        // Close any open blocks, then mark the end of the stream.
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            tokens.push(Token::new(TokenKind::Dedent, self.here()));
        }
        tokens.push(Token::new(TokenKind::End, self.here()));

        tokens
    }

    /// Measure leading whitespace and synthesize `Indent`/`Dedent` tokens.
    ///
    /// Spaces count one column, tabs count [`TAB_WIDTH`]. Lines holding only
    /// whitespace, a comment, or EOF leave the stack untouched. A dedent
    /// that does not land exactly on an enclosing level is fatal.
    fn handle_indentation(&mut self, tokens: &mut Vec<Token>) -> Result<(), ()> {
        let mut indent = 0u32;
        loop {
            match self.cursor.current_char() {
                ' ' => {
                    indent += 1;
                    self.cursor.advance();
                }
                '\t' => {
                    indent += TAB_WIDTH;
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        // Blank or comment-only line: no block structure change.
        let c = self.cursor.current_char();
        if c == '\n' || c == '#' || self.cursor.is_at_end() {
            return Ok(());
        }

        self.begin_token();
        let previous = *self.indent_stack.last().unwrap_or(&0);

        if indent > previous {
            self.indent_stack.push(indent);
            tokens.push(Token::new(TokenKind::Indent, self.here()));
        } else if indent < previous {
            while indent < *self.indent_stack.last().unwrap_or(&0) {
                self.indent_stack.pop();
                tokens.push(Token::new(TokenKind::Dedent, self.here()));
            }
            if indent != *self.indent_stack.last().unwrap_or(&0) {
                return self.fail("inconsistent indentation");
            }
        }

        self.at_line_start = false;
        Ok(())
    }

    /// Lex an identifier or keyword.
    fn lex_identifier(&mut self) -> TokenKind {
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_alphanumeric() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        keyword_from_ident(text).unwrap_or_else(|| TokenKind::Ident(Symbol::intern(text)))
    }

    /// Lex a number literal.
    ///
    /// Decimal digits, an optional `.digits` fraction, and an optional
    /// `eE[+-]?digits` exponent. Either of the latter makes it a float.
    /// An `e` not followed by (signed) digits is left for the next token.
    fn lex_number(&mut self) -> Result<TokenKind, ()> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let mut is_float = false;

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            let next = self.cursor.peek_char(1);
            let has_exponent = next.is_ascii_digit()
                || (matches!(next, '+' | '-') && self.cursor.peek_char(2).is_ascii_digit());
            if has_exponent {
                is_float = true;
                self.cursor.advance();
                if matches!(self.cursor.current_char(), '+' | '-') {
                    self.cursor.advance();
                }
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }

        let text = self.cursor.slice_from(self.token_start);
        if is_float {
            match text.parse::<f64>() {
                Ok(value) => Ok(TokenKind::Float(value)),
                Err(_) => self.fail(format!("invalid float literal '{}'", text)),
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => Ok(TokenKind::Int(value)),
                Err(_) => self.fail(format!("integer literal '{}' is too large", text)),
            }
        }
    }

    /// Lex a string literal, with an optional `f`/`F` prefix and optional
    /// triple quoting. Escapes are processed; the f-string value itself is
    /// kept verbatim for downstream consumers.
    fn lex_string(&mut self) -> Result<TokenKind, ()> {
        let f_string = matches!(self.cursor.current_char(), 'f' | 'F');
        if f_string {
            self.cursor.advance();
        }

        let quote = self.cursor.current_char();
        self.cursor.advance();

        let triple = self.cursor.current_char() == quote && self.cursor.peek_char(1) == quote;
        if triple {
            self.cursor.advance();
            self.cursor.advance();
        }

        let mut value = String::new();
        loop {
            if self.cursor.is_at_end() {
                return self.fail("unterminated string literal");
            }
            let c = self.cursor.current_char();

            if triple {
                if c == quote
                    && self.cursor.peek_char(1) == quote
                    && self.cursor.peek_char(2) == quote
                {
                    break;
                }
            } else {
                if c == quote {
                    break;
                }
                if c == '\n' {
                    return self.fail("unterminated string literal");
                }
            }

            if c == '\\' {
                value.push(self.lex_escape()?);
            } else {
                value.push(c);
                self.cursor.advance();
            }
        }

        // Closing quote(s).
        self.cursor.advance();
        if triple {
            self.cursor.advance();
            self.cursor.advance();
        }

        Ok(TokenKind::Str {
            value: Symbol::intern(&value),
            f_string,
        })
    }

    /// Lex one escape sequence inside a string.
    ///
    /// Recognized: `\n \t \r \\ \' \" \uXXXX` (exactly four hex digits).
    fn lex_escape(&mut self) -> Result<char, ()> {
        self.cursor.advance(); // backslash

        if self.cursor.is_at_end() {
            return self.fail("unterminated string literal");
        }

        let c = self.cursor.current_char();
        self.cursor.advance();

        match c {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '\\' => Ok('\\'),
            '\'' => Ok('\''),
            '"' => Ok('"'),
            'u' => {
                let mut code = 0u32;
                for _ in 0..4 {
                    let h = self.cursor.current_char();
                    let Some(digit) = h.to_digit(16) else {
                        return self.fail("malformed unicode escape sequence");
                    };
                    code = code * 16 + digit;
                    self.cursor.advance();
                }
                match char::from_u32(code) {
                    Some(ch) => Ok(ch),
                    None => self.fail(format!("invalid unicode escape '\\u{:04X}'", code)),
                }
            }
            _ => self.fail(format!("invalid escape sequence '\\{}'", c)),
        }
    }

    /// Lex an operator or punctuation token.
    ///
    /// Two-character operators match greedily. A lone `!` is an error.
    fn lex_operator(&mut self) -> Result<TokenKind, ()> {
        let c = self.cursor.current_char();
        self.cursor.advance();

        let kind = match c {
            '+' => {
                if self.cursor.match_char('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.cursor.match_char('=') {
                    TokenKind::MinusEq
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.cursor.match_char('*') {
                    TokenKind::StarStar
                } else if self.cursor.match_char('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.cursor.match_char('=') {
                    TokenKind::SlashEq
                } else if self.cursor.match_char('/') {
                    TokenKind::SlashSlash
                } else {
                    TokenKind::Slash
                }
            }
            '%' => TokenKind::Percent,
            '=' => {
                if self.cursor.match_char('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            '!' => {
                if self.cursor.match_char('=') {
                    TokenKind::NotEq
                } else {
                    return self.fail("unexpected character '!'");
                }
            }
            '<' => {
                if self.cursor.match_char('=') {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.cursor.match_char('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => return self.fail(format!("unknown character '{}'", c)),
        };

        Ok(kind)
    }

    /// Skip a `#` comment up to (not including) the newline.
    fn skip_comment(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }

    /// Skip non-newline whitespace between tokens.
    fn skip_whitespace(&mut self) {
        while !self.cursor.is_at_end() {
            let c = self.cursor.current_char();
            if c == '\n' || !c.is_whitespace() {
                break;
            }
            self.cursor.advance();
        }
    }

    /// Record the current position as the start of the next token.
    fn begin_token(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
    }

    /// Build a token spanning from the recorded start to the cursor.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            Span::new(
                self.token_start,
                self.cursor.position(),
                self.token_start_line,
                self.token_start_column,
            ),
        )
    }

    /// Zero-width span at the cursor, for synthesized layout tokens.
    fn here(&self) -> Span {
        Span::point(self.cursor.position(), self.cursor.line(), self.cursor.column())
    }

    /// Report a lexical error at the current token and abort the scan.
    fn fail<T>(&self, message: impl Into<String>) -> Result<T, ()> {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        self.handler.error(message, span);
        Err(())
    }
}
