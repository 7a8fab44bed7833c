//! `tracing` events for each tool execution phase.
//!
//! ```rust
//! use gobserve::TracingObservabilityHooks;
//! use gtooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! accepts_tool_hooks(&TracingObservabilityHooks);
//! ```

use std::time::Duration;

use gprovider::ToolCall;
use gtooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            request_id = %context.request_id
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        if result.is_error {
            tracing::warn!(
                phase = "tool",
                event = "execution_inline_error",
                tool_name = tool_call.name,
                tool_call_id = tool_call.id,
                request_id = %context.request_id,
                elapsed_ms = elapsed.as_millis() as u64,
                output = result.output
            );
            return;
        }

        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            request_id = %context.request_id,
            elapsed_ms = elapsed.as_millis() as u64,
            output_len = result.output.len()
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::error!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            request_id = %context.request_id,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            user_error = error.is_user_error(),
            error = %error
        );
    }
}
