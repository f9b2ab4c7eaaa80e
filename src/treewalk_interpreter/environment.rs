use super::errors::{RuntimeError, RuntimeResult};
use super::value::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Name bindings for one run: freely rebindable variables and write-once
/// constants.
#[derive(Debug, Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
    constants: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    /// Add or replace a variable binding.
    pub fn set_var(&mut self, name: String, value: Value) {
        tracing::trace!(name = %name, value = %value, "bind variable");
        self.variables.insert(name, value);
    }

    /// Bind a constant, refusing to rebind an existing one.
    pub fn set_const(&mut self, name: String, value: Value) -> RuntimeResult<()> {
        match self.constants.entry(name) {
            Entry::Occupied(o) => Err(RuntimeError::DefinitionConflict(o.key().clone())),
            Entry::Vacant(v) => {
                tracing::trace!(name = %v.key(), value = %value, "bind constant");
                v.insert(value);
                Ok(())
            }
        }
    }

    /// Variables shadow constants of the same name.
    pub fn get_var(&self, name: &str) -> RuntimeResult<Value> {
        self.variables
            .get(name)
            .or_else(|| self.constants.get(name))
            .cloned()
            .ok_or_else(|| RuntimeError::NameResolution(name.to_owned()))
    }

    #[cfg(test)]
    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }
}
