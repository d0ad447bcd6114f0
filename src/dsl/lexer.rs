//! Lexer (tokenizer) for the module-list DSL.

use crate::error::{PulseError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the DSL.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A module name
    Identifier,
    /// A single punctuation character prefixing a module name
    Sigil,
    /// The wiring arrow `->`
    Arrow,
    /// Output list separator `,`
    Comma,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing module-list input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let start_line = self.line;
        let start_column = self.column;

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => return Ok(self.token(TokenKind::Eof, String::new(), start_line, start_column)),
        };

        let token = match ch {
            '\n' => {
                self.advance();
                self.token(TokenKind::Newline, "\n".to_string(), start_line, start_column)
            }
            ',' => {
                self.advance();
                self.token(TokenKind::Comma, ",".to_string(), start_line, start_column)
            }
            '-' => {
                self.advance();
                if self.chars.peek() != Some(&'>') {
                    return Err(PulseError::lexer(
                        start_line,
                        start_column,
                        "expected '->' after '-'",
                    ));
                }
                self.advance();
                self.token(TokenKind::Arrow, "->".to_string(), start_line, start_column)
            }
            _ if ch.is_alphanumeric() || ch == '_' => {
                let text = self.read_identifier();
                self.token(TokenKind::Identifier, text, start_line, start_column)
            }
            _ if ch.is_ascii_punctuation() => {
                self.advance();
                self.token(TokenKind::Sigil, ch.to_string(), start_line, start_column)
            }
            _ => {
                return Err(PulseError::lexer(
                    start_line,
                    start_column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(token)
    }

    fn token(&self, kind: TokenKind, text: String, line: usize, column: usize) -> Token {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            let done = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if done {
                return out;
            }
        }
    }

    #[test]
    fn test_lexer_basic() {
        let input = "broadcaster -> a, b";
        let mut lexer = Lexer::new(input);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "broadcaster");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Arrow);
        assert_eq!(tok.column, 13);
    }

    #[test]
    fn test_lexer_sigils() {
        assert_eq!(
            kinds("%a -> b\n&c -> d"),
            vec![
                TokenKind::Sigil,
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Newline,
                TokenKind::Sigil,
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_skips_comments() {
        assert_eq!(
            kinds("# header\na -> b # trailing"),
            vec![
                TokenKind::Newline,
                TokenKind::Identifier,
                TokenKind::Arrow,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lexer_rejects_lone_dash() {
        let mut lexer = Lexer::new("a - b");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, PulseError::LexerError { line: 1, column: 3, .. }));
    }
}
