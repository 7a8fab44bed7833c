//! Tool registry, argument helpers, and the runtime that dispatches tool calls.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use gprovider::{ParameterKind, ToolDefinition};
//! use gtooling::{DefaultToolRuntime, ToolRegistry, parse_json_object, required_f64};
//!
//! let mut registry = ToolRegistry::new();
//! registry
//!     .register_sync_fn(
//!         ToolDefinition::new("double", "Doubles a number").param(
//!             "value",
//!             ParameterKind::Number,
//!             "Number to double",
//!         ),
//!         |args, _ctx| {
//!             let args = parse_json_object(&args)?;
//!             Ok((required_f64(&args, "value")? * 2.0).to_string())
//!         },
//!     )
//!     .expect("unique name");
//!
//! let _runtime = DefaultToolRuntime::new(Arc::new(registry));
//! ```

mod args;
mod error;
mod hooks;
mod registry;
mod runtime;
mod tool;
mod types;

pub mod prelude {
    pub use crate::{
        DefaultToolRuntime, Tool, ToolError, ToolErrorKind, ToolExecutionContext,
        ToolExecutionResult, ToolFuture, ToolRegistry, ToolRuntime, ToolRuntimeHooks,
    };
}

pub use args::{parse_json_object, parse_json_value, required_f64, required_i64, required_string};
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{CompositeToolRuntimeHooks, NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use runtime::{DefaultToolRuntime, ToolRuntime};
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use types::{ToolExecutionContext, ToolExecutionResult};
