//! Abstract Syntax Tree types for the module-list DSL.

use std::fmt;

/// Complete AST representation of a parsed module list.
///
/// Declarations keep their source order; wiring relies on it for
/// deterministic module ids and conjunction input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetlistAst {
    /// Module declarations in source order
    pub modules: Vec<ModuleDef>,
}

impl NetlistAst {
    /// Create a new empty netlist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a netlist from `(descriptor, outputs)` pairs.
    ///
    /// The descriptor is a bare name (relay) or a name prefixed with `%`
    /// (flip-flop) or `&` (conjunction).
    pub fn from_pairs<I, S, O>(pairs: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = (S, O)>,
        S: AsRef<str>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        let mut ast = Self::new();
        for (idx, (descriptor, outputs)) in pairs.into_iter().enumerate() {
            let line = idx + 1;
            let descriptor = descriptor.as_ref();
            let (kind, name) = match descriptor.chars().next() {
                Some(c) if c.is_alphanumeric() || c == '_' => (DeclaredKind::Relay, descriptor),
                Some(c) => {
                    let kind = DeclaredKind::from_sigil(c)
                        .ok_or(crate::PulseError::UnknownModuleKind { sigil: c, line })?;
                    (kind, &descriptor[c.len_utf8()..])
                }
                None => return Err(crate::PulseError::parse(line, "empty module descriptor")),
            };
            if name.is_empty() {
                return Err(crate::PulseError::parse(line, "module descriptor has no name"));
            }
            ast.modules.push(ModuleDef {
                kind,
                name: name.to_string(),
                outputs: outputs.into_iter().map(Into::into).collect(),
                line,
            });
        }
        Ok(ast)
    }
}

/// A single module declaration from the DSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDef {
    /// Behavior selected by the descriptor prefix
    pub kind: DeclaredKind,
    /// Unique module name
    pub name: String,
    /// Destination names, in emission order
    pub outputs: Vec<String>,
    /// Source line number for error reporting
    pub line: usize,
}

/// Module kinds that can be declared explicitly.
///
/// Sinks are never declared; wiring creates them for undeclared destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredKind {
    /// Bare name: forwards every pulse unchanged
    Relay,
    /// `%` prefix
    FlipFlop,
    /// `&` prefix
    Conjunction,
}

impl DeclaredKind {
    /// Map a descriptor sigil to a kind.
    pub fn from_sigil(sigil: char) -> Option<Self> {
        match sigil {
            '%' => Some(Self::FlipFlop),
            '&' => Some(Self::Conjunction),
            _ => None,
        }
    }

    /// The sigil used to declare this kind, if any.
    pub fn sigil(&self) -> Option<char> {
        match self {
            Self::Relay => None,
            Self::FlipFlop => Some('%'),
            Self::Conjunction => Some('&'),
        }
    }
}

impl fmt::Display for ModuleDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(sigil) = self.kind.sigil() {
            write!(f, "{}", sigil)?;
        }
        write!(f, "{} -> {}", self.name, self.outputs.join(", "))
    }
}

impl fmt::Display for NetlistAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for def in &self.modules {
            writeln!(f, "{}", def)?;
        }
        Ok(())
    }
}
