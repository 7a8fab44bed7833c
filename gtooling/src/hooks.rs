//! Runtime hooks for tool execution lifecycle events.
//!
//! ```rust
//! use gtooling::{NoopToolRuntimeHooks, ToolRuntimeHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = NoopToolRuntimeHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::sync::Arc;
use std::time::Duration;

use gprovider::ToolCall;

use crate::{ToolError, ToolExecutionContext, ToolExecutionResult};

/// Observer for tool executions. Inline argument errors count as successes
/// with `result.is_error` set.
pub trait ToolRuntimeHooks: Send + Sync {
    fn on_execution_start(&self, _tool_call: &ToolCall, _context: &ToolExecutionContext) {}

    fn on_execution_success(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _result: &ToolExecutionResult,
        _elapsed: Duration,
    ) {
    }

    fn on_execution_failure(
        &self,
        _tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        _error: &ToolError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopToolRuntimeHooks;

impl ToolRuntimeHooks for NoopToolRuntimeHooks {}

/// Fans every event out to each inner hook in order.
#[derive(Clone, Default)]
pub struct CompositeToolRuntimeHooks {
    hooks: Vec<Arc<dyn ToolRuntimeHooks>>,
}

impl CompositeToolRuntimeHooks {
    pub fn new(hooks: Vec<Arc<dyn ToolRuntimeHooks>>) -> Self {
        Self { hooks }
    }

    pub fn push(&mut self, hook: Arc<dyn ToolRuntimeHooks>) {
        self.hooks.push(hook);
    }
}

impl ToolRuntimeHooks for CompositeToolRuntimeHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        for hook in &self.hooks {
            hook.on_execution_start(tool_call, context);
        }
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        for hook in &self.hooks {
            hook.on_execution_success(tool_call, context, result, elapsed);
        }
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        for hook in &self.hooks {
            hook.on_execution_failure(tool_call, context, error, elapsed);
        }
    }
}
