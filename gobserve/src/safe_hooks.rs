use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use gprovider::ToolCall;
use gtooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

/// Swallows panics raised by the wrapped hooks.
pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        guard("execution_start", || {
            self.inner.on_execution_start(tool_call, context)
        });
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        guard("execution_success", || {
            self.inner
                .on_execution_success(tool_call, context, result, elapsed)
        });
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        guard("execution_failure", || {
            self.inner
                .on_execution_failure(tool_call, context, error, elapsed)
        });
    }
}

fn guard(event: &'static str, hook: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(hook)).is_err() {
        tracing::warn!(phase = "tool", event, "observability hook panicked");
    }
}
