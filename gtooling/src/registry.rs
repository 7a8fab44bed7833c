//! Name-keyed tool registry, built once at startup and then shared read-only.
//!
//! ```rust
//! use gprovider::{ParameterKind, ToolDefinition};
//! use gtooling::{ToolErrorKind, ToolRegistry};
//!
//! let definition = ToolDefinition::new("add", "Adds two numbers")
//!     .param("a", ParameterKind::Number, "First operand")
//!     .param("b", ParameterKind::Number, "Second operand");
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(definition.clone(), |_args, _ctx| Ok("3".to_string()))
//!     .expect("first registration");
//!
//! let err = registry
//!     .register_sync_fn(definition, |_args, _ctx| Ok("3".to_string()))
//!     .expect_err("duplicate name");
//! assert_eq!(err.kind, ToolErrorKind::Configuration);
//! ```

use std::future::Future;
use std::sync::Arc;

use gcommon::Registry;
use gprovider::ToolDefinition;

use crate::{FunctionTool, Tool, ToolError, ToolExecutionContext};

#[derive(Default)]
pub struct ToolRegistry {
    tools: Registry<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with `Configuration` if a tool with the same name is already present.
    pub fn register<T>(&mut self, tool: T) -> Result<(), ToolError>
    where
        T: Tool + 'static,
    {
        let name = tool.definition().name.clone();
        if name.trim().is_empty() {
            return Err(ToolError::configuration("tool name must not be empty"));
        }

        self.tools
            .insert_unique(name, Arc::new(tool))
            .map_err(|name| {
                ToolError::configuration(format!("tool '{name}' is already registered"))
                    .with_tool_name(name)
            })
    }

    pub fn register_fn<F, Fut>(&mut self, definition: ToolDefinition, handler: F) -> Result<(), ToolError>
    where
        F: Fn(String, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        self.register(FunctionTool::new(definition, handler))
    }

    pub fn register_sync_fn<F>(&mut self, definition: ToolDefinition, handler: F) -> Result<(), ToolError>
    where
        F: Fn(String, ToolExecutionContext) -> Result<String, ToolError> + Send + Sync + 'static,
    {
        self.register_fn(definition, move |args_json, context| {
            let output = handler(args_json, context);
            async move { output }
        })
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Every tool's declaration, ascending by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| tool.definition().clone())
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
