//! Parser for the module-list DSL.

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{PulseError, Result};

/// Parser for module-list DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire module list.
    pub fn parse(&mut self) -> Result<NetlistAst> {
        let mut ast = NetlistAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            let def = self.parse_module()?;
            ast.modules.push(def);

            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => break,
                _ => {
                    return Err(PulseError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(PulseError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn parse_module(&mut self) -> Result<ModuleDef> {
        let line = self.current.line;

        let kind = if self.current.kind == TokenKind::Sigil {
            let sigil = self.current.text.chars().next().unwrap_or('?');
            let kind = DeclaredKind::from_sigil(sigil)
                .ok_or(PulseError::UnknownModuleKind { sigil, line })?;
            self.advance()?;
            kind
        } else {
            DeclaredKind::Relay
        };

        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::Arrow)?;

        let mut outputs = vec![self.expect(TokenKind::Identifier)?.text];
        while self.current.kind == TokenKind::Comma {
            self.advance()?;
            outputs.push(self.expect(TokenKind::Identifier)?.text);
        }

        Ok(ModuleDef {
            kind,
            name,
            outputs,
            line,
        })
    }
}
