//! DSL (Domain Specific Language) parser for module lists.
//!
//! One module per line: an optional kind sigil, the module name, an arrow,
//! and the comma-separated names it sends pulses to.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | module | empty
//! comment     = '#' { any_char }
//! module      = [sigil] name "->" name { "," name }
//!
//! sigil       = '%' | '&'
//! name        = (letter | digit | '_') { letter | digit | '_' }
//! ```
//!
//! # Module Kinds
//!
//! | Sigil | Kind | Behavior |
//! |-------|------|----------|
//! | none | Relay | forwards every pulse unchanged |
//! | `%` | FlipFlop | ignores high, toggles and emits its new state on low |
//! | `&` | Conjunction | emits low iff every input last sent high |
//!
//! Destinations that are never declared become sinks during wiring.
//!
//! # Example
//!
//! ```text
//! # Three-bit ripple with an inverter
//! broadcaster -> a, b, c
//! %a -> b
//! %b -> c
//! %c -> inv
//! &inv -> a
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a module-list string into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Read an input file, mapping I/O failures to [`PulseError::FileReadError`].
#[cfg(feature = "cli")]
pub fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| crate::error::PulseError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parse a module-list file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<NetlistAst> {
    parse(&read_file(path)?)
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::error::PulseError;

    #[test]
    fn test_missing_file_is_a_read_error() {
        let path = std::env::temp_dir().join("pulse_core_no_such_network.txt");
        let err = parse_file(&path).unwrap_err();
        match err {
            PulseError::FileReadError { path: reported, .. } => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(read_file(&path), Err(PulseError::FileReadError { .. })));
    }
}
