//! Variable naming.
//!
//! Names are optional and need not be unique. Lookup by name returns the
//! lowest-id variable currently carrying it.

use std::collections::{BTreeMap, HashMap};

use vecmodel_expr::ids::VariableId;

use crate::model::Model;
use crate::model::error::ModelError;

#[derive(Debug, Clone, Default)]
pub(crate) struct VariableNames {
    by_id: BTreeMap<VariableId, String>,
    by_name: HashMap<String, VariableId>,
}

impl VariableNames {
    fn insert(&mut self, id: VariableId, name: String) {
        if let Some(previous) = self.by_id.insert(id, name.clone()) {
            self.release(id, &previous);
        }
        self.by_name
            .entry(name)
            .and_modify(|holder| *holder = (*holder).min(id))
            .or_insert(id);
    }

    /// Re-point `name` after `id` stopped carrying it.
    fn release(&mut self, id: VariableId, name: &str) {
        if self.by_name.get(name) != Some(&id) {
            return;
        }
        let next = self
            .by_id
            .iter()
            .find_map(|(other, other_name)| (other_name == name).then_some(*other));
        match next {
            Some(other) => {
                self.by_name.insert(name.to_string(), other);
            }
            None => {
                self.by_name.remove(name);
            }
        }
    }

    fn get(&self, id: VariableId) -> Option<&str> {
        self.by_id.get(&id).map(String::as_str)
    }

    fn find(&self, name: &str) -> Option<VariableId> {
        self.by_name.get(name).copied()
    }

    fn len(&self) -> usize {
        self.by_id.len()
    }
}

impl Model {
    /// Attach a display name to a variable, replacing any earlier name.
    pub fn set_variable_name(&mut self, id: VariableId, name: String) -> Result<(), ModelError> {
        self.ensure_variable_exists(id)?;
        tracing::trace!(
            component = "model",
            operation = "set_variable_name",
            status = "success",
            var_id = id.inner(),
            name = %name,
            "Named variable"
        );
        self.variable_names.insert(id, name);
        Ok(())
    }

    pub fn get_variable_name(&self, id: VariableId) -> Option<&str> {
        self.variable_names.get(id)
    }

    /// Lowest-id variable named `name`.
    pub fn get_variable_by_name(&self, name: &str) -> Option<VariableId> {
        self.variable_names.find(name)
    }

    /// Number of variables that carry a name.
    pub fn num_named_variables(&self) -> usize {
        self.variable_names.len()
    }
}
