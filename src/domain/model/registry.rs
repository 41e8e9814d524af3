//! SchemaRegistry for mapping entity names to ResourceModel implementations.

use crate::domain::model::{catalog, EntitySchema, MatchModel, ResourceModel};
use crate::error::{ConsoleError, ConsoleResult};
use std::collections::HashMap;
use std::sync::Arc;

/// A registry that maps entity names to their ResourceModel implementations.
pub struct SchemaRegistry {
    models: HashMap<String, Arc<dyn ResourceModel>>,
}

impl SchemaRegistry {
    /// Creates a new empty SchemaRegistry.
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
        }
    }

    /// Registry holding the eight built-in tournament entities.
    pub fn with_catalog() -> ConsoleResult<Self> {
        let mut reg = Self::new();
        for schema in [
            catalog::users(),
            catalog::teams(),
            catalog::coaches(),
            catalog::judges(),
            catalog::tournaments(),
            catalog::categories(),
            catalog::players(),
        ] {
            reg.register_schema(schema)?;
        }
        catalog::matches().validate()?;
        reg.register(MatchModel::new());
        Ok(reg)
    }

    /// Builds a registry from a JSON array of schemas.
    ///
    /// Every schema is validated; the first invalid one fails the whole table.
    pub fn from_json(json: &str) -> ConsoleResult<Self> {
        let schemas: Vec<EntitySchema> = serde_json::from_str(json)
            .map_err(|e| ConsoleError::InvalidSchema(format!("schema table: {}", e)))?;
        let mut reg = Self::new();
        for schema in schemas {
            reg.register_schema(schema)?;
        }
        Ok(reg)
    }

    /// Registers a model implementation under its entity name.
    pub fn register<M: ResourceModel + 'static>(&mut self, model: M) {
        self.models
            .insert(model.entity_name().to_string(), Arc::new(model));
    }

    /// Validates and registers a declarative schema.
    pub fn register_schema(&mut self, schema: EntitySchema) -> ConsoleResult<()> {
        schema.validate()?;
        self.register(schema);
        Ok(())
    }

    /// Retrieves a model implementation by name.
    /// Returns None if the model is not registered.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ResourceModel>> {
        self.models.get(name).cloned()
    }

    /// Like `get`, but reports an unknown entity as an error.
    pub fn require(&self, name: &str) -> ConsoleResult<Arc<dyn ResourceModel>> {
        self.get(name)
            .ok_or_else(|| ConsoleError::UnknownEntity(name.to_string()))
    }

    /// Returns all registered entity names, sorted.
    pub fn list_models(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
