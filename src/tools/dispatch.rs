//! Tool dispatch.
//!
//! One call moves through lookup, validation, and execution. Every failure on
//! that path ends as an error-text [`ToolResult`]; `dispatch` never returns an
//! error to its caller, so the transport always delivers a structurally valid
//! response and failure is communicated in-band.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::tools::registry::ToolRegistry;
use crate::tools::schema::{validate, ValidatedArgs};
use crate::tools::ToolResult;
use crate::AppState;

pub struct Dispatcher {
    registry: ToolRegistry,
    state: Arc<AppState>,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, state: Arc<AppState>) -> Self {
        Self { registry, state }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Tool descriptors for the `tools/list` capability listing, in
    /// registration order.
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema_json(),
                })
            })
            .collect()
    }

    /// Runs the named tool against `raw_args`.
    ///
    /// Unknown names and validation failures short-circuit without touching
    /// the handler. Handler errors are caught here and stringified; nothing
    /// escapes past this boundary.
    pub async fn dispatch(&self, name: &str, raw_args: &Value) -> ToolResult {
        let tool = match self.registry.lookup(name) {
            Some(tool) => tool,
            None => {
                warn!(tool = name, "unknown tool requested");
                return ToolResult::failure(format!("Tool not found: '{name}'"));
            }
        };

        let mut args = ValidatedArgs::default();
        for (field, spec) in &tool.input_schema {
            match validate(field, spec, raw_args.get(field)) {
                Ok(Some(value)) => args.insert(field, value),
                Ok(None) => {}
                Err(err) => {
                    debug!(tool = name, field = %field, error = %err, "argument rejected");
                    return ToolResult::failure(err.to_string());
                }
            }
        }

        debug!(tool = name, "executing");
        match (tool.handler)(self.state.clone(), args).await {
            Ok(result) => result,
            Err(err) => {
                warn!(tool = name, error = %err, "tool execution failed");
                ToolResult::failure(format!("❌ Tool '{name}' failed.\n\nError: {err}"))
            }
        }
    }
}
