//! Observability hooks for tool execution.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use gobserve::standard_tool_hooks;
//! use gtooling::{DefaultToolRuntime, ToolRegistry};
//!
//! let runtime = DefaultToolRuntime::new(Arc::new(ToolRegistry::new()))
//!     .with_hooks(Arc::new(standard_tool_hooks()));
//! # let _ = runtime;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

use std::sync::Arc;

use gtooling::CompositeToolRuntimeHooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::SafeToolHooks;
pub use tracing_hooks::TracingObservabilityHooks;

/// Tracing and metrics hooks, each isolated so a panicking observer cannot
/// fail a tool call.
pub fn standard_tool_hooks() -> CompositeToolRuntimeHooks {
    CompositeToolRuntimeHooks::new(vec![
        Arc::new(SafeToolHooks::new(TracingObservabilityHooks)),
        Arc::new(SafeToolHooks::new(MetricsObservabilityHooks)),
    ])
}

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeToolHooks, TracingObservabilityHooks, standard_tool_hooks,
    };
}
