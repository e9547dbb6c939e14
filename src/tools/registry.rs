//! Registry of the tools the server exposes.
//!
//! A [`ToolDefinition`] is created once at startup and never mutated. The
//! registry owns every definition; the dispatcher borrows one by name for the
//! duration of a call. Registration order defines the order of the
//! `tools/list` capability listing, which always equals the registered set.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::{json, Value};
use thiserror::Error;

use crate::tools::schema::{FieldSpec, ValidatedArgs};
use crate::tools::ToolResult;
use crate::AppState;

pub type ToolFuture = Pin<Box<dyn Future<Output = anyhow::Result<ToolResult>> + Send>>;
pub type ToolHandler = Arc<dyn Fn(Arc<AppState>, ValidatedArgs) -> ToolFuture + Send + Sync>;

/// One named, schema-validated operation.
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// Parameter specs in declaration order; validation follows this order.
    pub input_schema: Vec<(String, FieldSpec)>,
    pub handler: ToolHandler,
}

impl ToolDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: Vec<(String, FieldSpec)>,
        handler: ToolHandler,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
            handler,
        }
    }

    /// JSON Schema object describing the tool input, for `tools/list`.
    pub fn input_schema_json(&self) -> Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();
        for (name, spec) in &self.input_schema {
            properties.insert(name.clone(), spec.to_json_schema());
            if spec.required {
                required.push(Value::String(name.clone()));
            }
        }
        json!({
            "type": "object",
            "properties": Value::Object(properties),
            "required": required,
            "additionalProperties": false
        })
    }
}

impl std::fmt::Debug for ToolDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool '{0}' is already registered")]
    DuplicateName(String),
}

/// Name -> definition mapping with stable registration order.
#[derive(Default)]
pub struct ToolRegistry {
    order: Vec<String>,
    tools: HashMap<String, ToolDefinition>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool; names are unique for the process lifetime.
    pub fn register(&mut self, tool: ToolDefinition) -> Result<(), RegistryError> {
        if self.tools.contains_key(&tool.name) {
            return Err(RegistryError::DuplicateName(tool.name.clone()));
        }
        self.order.push(tool.name.clone());
        self.tools.insert(tool.name.clone(), tool);
        Ok(())
    }

    /// O(1) lookup by name.
    pub fn lookup(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.order.iter().filter_map(|name| self.tools.get(name))
    }

    /// Registered tool names in registration order. This is the advertised
    /// capability list; it always equals the registered set.
    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
