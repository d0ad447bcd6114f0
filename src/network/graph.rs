//! Module network wiring.

use indexmap::IndexMap;
use tracing::debug;

use super::types::ModuleId;
use crate::dsl::NetlistAst;
use crate::error::{PulseError, Result};
use crate::modules::{Module, ModuleKind};

/// A wired module network ready for simulation.
///
/// Topology is fixed at construction; only module states change afterwards.
/// Every destination named anywhere resolves to a module (undeclared ones
/// become sinks), so lookups during propagation are total.
#[derive(Debug, Clone)]
pub struct Network {
    /// Modules indexed by [`ModuleId`]
    modules: Vec<Module>,

    /// Module names to ids, in id order
    index: IndexMap<String, ModuleId>,

    /// Reverse edge index: senders of each module, in declaration order
    inputs: Vec<Vec<ModuleId>>,

    /// Number of declared modules (sinks follow)
    declared: usize,

    /// The module that receives the external trigger
    entry: ModuleId,
}

impl Network {
    /// Build a network from a parsed AST.
    ///
    /// Wiring runs in two phases: the first assigns ids and builds the
    /// reverse index, the second instantiates every module with its full
    /// input set.
    pub fn from_ast(ast: &NetlistAst, entry: &str) -> Result<Self> {
        let mut index: IndexMap<String, ModuleId> = IndexMap::new();

        // Declared modules get the first ids
        for def in &ast.modules {
            if index.contains_key(&def.name) {
                return Err(PulseError::DuplicateModule {
                    name: def.name.clone(),
                });
            }
            index.insert(def.name.clone(), ModuleId(index.len()));
        }
        let declared = index.len();

        // Destinations that were never declared become sinks
        for def in &ast.modules {
            for output in &def.outputs {
                if !index.contains_key(output) {
                    index.insert(output.clone(), ModuleId(index.len()));
                }
            }
        }

        let entry = match index.get(entry) {
            Some(&id) if id.0 < declared => id,
            _ => {
                return Err(PulseError::MissingEntry {
                    name: entry.to_string(),
                })
            }
        };

        // Resolve output names and build the reverse index
        let mut outputs: Vec<Vec<ModuleId>> = Vec::with_capacity(declared);
        let mut inputs: Vec<Vec<ModuleId>> = vec![Vec::new(); index.len()];
        for (src, def) in ast.modules.iter().enumerate() {
            let resolved: Vec<ModuleId> = def.outputs.iter().map(|name| index[name.as_str()]).collect();
            for dst in &resolved {
                inputs[dst.0].push(ModuleId(src));
            }
            outputs.push(resolved);
        }

        // Instantiate with the full input set known
        let mut modules = Vec::with_capacity(index.len());
        for ((def, outs), id) in ast.modules.iter().zip(outputs).zip((0..declared).map(ModuleId)) {
            let mut seed = inputs[id.0].clone();
            if id == entry {
                seed.push(ModuleId::BUTTON);
            }
            let kind = ModuleKind::from_declared(def.kind, &seed);
            modules.push(Module::new(id, def.name.clone(), outs, kind));
        }
        for (name, &id) in index.iter().skip(declared) {
            modules.push(Module::sink(id, name.clone()));
        }

        debug!(
            declared,
            sinks = modules.len() - declared,
            entry = %ast.modules[entry.0].name,
            "Wired module network"
        );

        Ok(Network {
            modules,
            index,
            inputs,
            declared,
            entry,
        })
    }

    /// Find a module id by name.
    pub fn find(&self, name: &str) -> Option<ModuleId> {
        self.index.get(name).copied()
    }

    /// Find a module id by name, failing with [`PulseError::ModuleNotFound`].
    pub fn require(&self, name: &str) -> Result<ModuleId> {
        self.find(name).ok_or_else(|| PulseError::not_found(name))
    }

    /// Get the name of a module.
    pub fn name(&self, id: ModuleId) -> &str {
        if id.is_button() {
            return "button";
        }
        &self.modules[id.0].name
    }

    /// Get a module by id.
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.0]
    }

    pub(crate) fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.0]
    }

    /// All modules in id order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub(crate) fn modules_mut(&mut self) -> &mut [Module] {
        &mut self.modules
    }

    /// Senders wired into a module, in declaration order.
    pub fn inputs(&self, id: ModuleId) -> &[ModuleId] {
        &self.inputs[id.0]
    }

    /// Destinations of a module, in emission order.
    pub fn outputs(&self, id: ModuleId) -> &[ModuleId] {
        &self.modules[id.0].outputs
    }

    /// The module that receives the external trigger.
    pub fn entry(&self) -> ModuleId {
        self.entry
    }

    /// Total number of modules, sinks included.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of modules declared in the source.
    pub fn declared_count(&self) -> usize {
        self.declared
    }

    /// Modules created for undeclared destinations.
    pub fn sinks(&self) -> &[Module] {
        &self.modules[self.declared..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl;
    use crate::network::Level;

    fn wire(input: &str) -> Result<Network> {
        Network::from_ast(&dsl::parse(input)?, "broadcaster")
    }

    #[test]
    fn test_undeclared_destination_becomes_sink() {
        let net = wire("broadcaster -> a\n%a -> output").unwrap();
        assert_eq!(net.len(), 3);
        assert_eq!(net.declared_count(), 2);
        let output = net.find("output").unwrap();
        assert_eq!(net.module(output).kind, ModuleKind::Sink);
        assert_eq!(net.sinks().len(), 1);
    }

    #[test]
    fn test_reverse_index_in_declaration_order() {
        let net = wire("broadcaster -> a, b\n%a -> con\n%b -> con\n&con -> rx").unwrap();
        let con = net.find("con").unwrap();
        let names: Vec<&str> = net.inputs(con).iter().map(|&id| net.name(id)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_conjunction_seeded_with_every_input() {
        let net = wire("broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output").unwrap();
        let con = net.module(net.find("con").unwrap()).as_conjunction().unwrap();
        let seeded: Vec<(&str, Level)> = con.inputs().map(|(id, l)| (net.name(id), l)).collect();
        assert_eq!(seeded, vec![("a", Level::Low), ("b", Level::Low)]);
    }

    #[test]
    fn test_forward_references_resolve() {
        // `inv` is used before its declaration line
        let net = wire("broadcaster -> inv\n&inv -> broadcaster").unwrap();
        let inv = net.find("inv").unwrap();
        assert!(net.module(inv).is_conjunction());
        assert!(net.sinks().is_empty());
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let err = wire("broadcaster -> a\n%a -> b\n&a -> b").unwrap_err();
        assert!(matches!(err, PulseError::DuplicateModule { name } if name == "a"));
    }

    #[test]
    fn test_missing_entry_rejected() {
        let err = wire("%a -> b").unwrap_err();
        assert!(matches!(err, PulseError::MissingEntry { .. }));

        // Referenced but never declared does not count
        let err = wire("%a -> broadcaster").unwrap_err();
        assert!(matches!(err, PulseError::MissingEntry { .. }));
    }

    #[test]
    fn test_custom_entry_name() {
        let ast = dsl::parse("start -> a\n%a -> out").unwrap();
        let net = Network::from_ast(&ast, "start").unwrap();
        assert_eq!(net.name(net.entry()), "start");
    }
}
