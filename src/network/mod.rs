//! Module network representation and validation.
//!
//! This module provides the internal representation of a module list after
//! parsing. The [`Network`] struct owns every module, the name index and the
//! reverse edge index in a form suitable for simulation.

mod graph;
mod types;
mod validate;

pub use graph::Network;
pub use types::*;
pub use validate::{unreachable_modules, validate_network};
