//! `metrics` counters and histograms for tool execution.
//!
//! Counters: `gadgets_tool_execution_{start,success,inline_error,failure}_total`.
//! Histogram: `gadgets_tool_execution_duration_seconds`, labelled by `status`.

use std::time::Duration;

use gprovider::ToolCall;
use gtooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
        metrics::counter!(
            "gadgets_tool_execution_start_total",
            "tool_name" => tool_call.name.clone()
        )
        .increment(1);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        let (counter, status) = if result.is_error {
            ("gadgets_tool_execution_inline_error_total", "inline_error")
        } else {
            ("gadgets_tool_execution_success_total", "success")
        };

        metrics::counter!(counter, "tool_name" => tool_call.name.clone()).increment(1);
        metrics::histogram!(
            "gadgets_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => status
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        _context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "gadgets_tool_execution_failure_total",
            "tool_name" => tool_call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "gadgets_tool_execution_duration_seconds",
            "tool_name" => tool_call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
