//! Error types for the pulse simulator.
//!
//! This module provides a unified error type [`PulseError`] that covers
//! all error conditions that can occur while parsing module lists, wiring
//! the network, and extrapolating long runs.

use thiserror::Error;

/// Result type alias using [`PulseError`].
pub type Result<T> = std::result::Result<T, PulseError>;

/// Unified error type for all pulse simulator operations.
#[derive(Error, Debug)]
pub enum PulseError {
    // ============ DSL Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Unknown module kind prefix
    #[error("Unknown module kind '{sigil}' at line {line}")]
    UnknownModuleKind { sigil: char, line: usize },

    // ============ Wiring Errors ============
    /// Module declared more than once
    #[error("Duplicate module name '{name}'")]
    DuplicateModule { name: String },

    /// Entry module was never declared
    #[error("Entry module '{name}' is not declared (expected a line '{name} -> ...')")]
    MissingEntry { name: String },

    /// Module not found in the network
    #[error("Module '{name}' not found in network")]
    ModuleNotFound { name: String },

    /// Module exists but has a different kind than the query needs
    #[error("Module '{name}' is a {actual}, expected a {expected}")]
    WrongModuleKind {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Network layout does not match what counter synchronization expects
    #[error("Network structure mismatch: {message}")]
    StructureMismatch { message: String },

    // ============ Extrapolation Errors ============
    /// Cycle detector reached its step ceiling without a repeated state
    #[error("No repeated state found after {steps} steps (raise the step ceiling to search further)")]
    NoCycleFound { steps: usize },

    /// Some counter monitors never emitted a high pulse within the press ceiling
    #[error("Monitors {monitors:?} never emitted a high pulse within {presses} presses")]
    MonitorNeverFired { monitors: Vec<String>, presses: u64 },

    /// Invalid run parameter
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    // ============ I/O Errors ============
    /// Error reading an input file
    #[error("Failed to read input file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl PulseError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a module-not-found error
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ModuleNotFound { name: name.into() }
    }

    /// Create a structure mismatch error
    pub fn structure(message: impl Into<String>) -> Self {
        Self::StructureMismatch {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }
}
