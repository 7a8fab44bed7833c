//! What a registered tool is: a declaration the model sees, plus the code
//! that answers a call to it.
//!
//! Most tools are closures registered through [`ToolRegistry::register_fn`];
//! implement [`Tool`] directly when the tool owns state.
//!
//! ```rust
//! use gprovider::{ParameterKind, ToolDefinition};
//! use gtooling::{FunctionTool, Tool, parse_json_object, required_i64};
//!
//! let lookup = FunctionTool::new(
//!     ToolDefinition::new("stock_level", "Units on hand for a product").param(
//!         "product_no",
//!         ParameterKind::Integer,
//!         "Catalog product number",
//!     ),
//!     |args, _ctx| async move {
//!         let args = parse_json_object(&args)?;
//!         Ok(format!("{} units", required_i64(&args, "product_no")? % 7))
//!     },
//! );
//!
//! assert_eq!(lookup.definition().name, "stock_level");
//! assert_eq!(lookup.definition().parameters.len(), 1);
//! ```
//!
//! [`ToolRegistry::register_fn`]: crate::ToolRegistry::register_fn

use std::future::Future;

use gcommon::BoxFuture;
use gprovider::ToolDefinition;

use crate::{ToolError, ToolExecutionContext};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    /// Declaration advertised to the model and to MCP clients.
    fn definition(&self) -> &ToolDefinition;

    /// Runs one call. `args_json` is the raw argument object as the model sent it.
    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>>;
}

type BoxedHandler =
    Box<dyn Fn(String, ToolExecutionContext) -> ToolFuture<'static, Result<String, ToolError>> + Send + Sync>;

/// A [`Tool`] backed by an async closure over owned arguments.
pub struct FunctionTool {
    definition: ToolDefinition,
    run: BoxedHandler,
}

impl FunctionTool {
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(String, ToolExecutionContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, ToolError>> + Send + 'static,
    {
        Self {
            definition,
            run: Box::new(move |args, context| Box::pin(handler(args, context))),
        }
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.definition.name)
            .finish_non_exhaustive()
    }
}

impl Tool for FunctionTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn invoke<'a>(
        &'a self,
        args_json: &'a str,
        context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<String, ToolError>> {
        (self.run)(args_json.to_owned(), context.clone())
    }
}
