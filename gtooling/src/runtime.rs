//! Tool runtime trait and default registry-backed executor.

use std::sync::Arc;
use std::time::Instant;

use gprovider::ToolCall;

use crate::{
    NoopToolRuntimeHooks, ToolError, ToolErrorKind, ToolExecutionContext, ToolExecutionResult,
    ToolFuture, ToolRegistry, ToolRuntimeHooks,
};

pub trait ToolRuntime: Send + Sync {
    fn execute<'a>(
        &'a self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>>;

    /// Declarations of every executable tool.
    fn definitions(&self) -> Vec<gprovider::ToolDefinition>;
}

/// Executes registry tools. Argument errors come back as successful results
/// carrying `Error: <message>` with `is_error` set; other failures are `Err`.
#[derive(Clone)]
pub struct DefaultToolRuntime {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl DefaultToolRuntime {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }
}

impl ToolRuntime for DefaultToolRuntime {
    fn execute<'a>(
        &'a self,
        tool_call: ToolCall,
        context: ToolExecutionContext,
    ) -> ToolFuture<'a, Result<ToolExecutionResult, ToolError>> {
        Box::pin(async move {
            let started = Instant::now();
            self.hooks.on_execution_start(&tool_call, &context);

            let outcome = match self.registry.get(&tool_call.name) {
                Some(tool) => tool.invoke(&tool_call.arguments, &context).await,
                None => Err(ToolError::not_found(format!(
                    "tool '{}' is not registered",
                    tool_call.name
                ))),
            };

            let outcome = match outcome {
                Ok(output) => Ok(ToolExecutionResult::from_call(&tool_call, output)),
                Err(error) if error.kind == ToolErrorKind::InvalidArguments => Ok(
                    ToolExecutionResult::inline_error(&tool_call, error.inline_text()),
                ),
                Err(error) => Err(error
                    .with_tool_name(tool_call.name.clone())
                    .with_tool_call_id(tool_call.id.clone())),
            };

            match &outcome {
                Ok(result) => {
                    self.hooks
                        .on_execution_success(&tool_call, &context, result, started.elapsed())
                }
                Err(error) => {
                    self.hooks
                        .on_execution_failure(&tool_call, &context, error, started.elapsed())
                }
            }

            outcome
        })
    }

    fn definitions(&self) -> Vec<gprovider::ToolDefinition> {
        self.registry.definitions()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use gprovider::{ParameterKind, ToolCall, ToolDefinition};

    use super::*;
    use crate::{Tool, ToolErrorKind, required_string};

    struct EchoTool {
        definition: ToolDefinition,
    }

    impl EchoTool {
        fn new() -> Self {
            Self {
                definition: ToolDefinition::new("echo", "Echoes text").param(
                    "text",
                    ParameterKind::String,
                    "Text to echo",
                ),
            }
        }
    }

    impl Tool for EchoTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        fn invoke<'a>(
            &'a self,
            args_json: &'a str,
            context: &'a ToolExecutionContext,
        ) -> ToolFuture<'a, Result<String, ToolError>> {
            Box::pin(async move {
                let args = crate::parse_json_object(args_json)?;
                let text = required_string(&args, "text")?;
                Ok(format!("request={} text={text}", context.request_id))
            })
        }
    }

    struct BrokenTool {
        definition: ToolDefinition,
    }

    impl BrokenTool {
        fn new() -> Self {
            Self {
                definition: ToolDefinition::new("broken", "Always fails"),
            }
        }
    }

    impl Tool for BrokenTool {
        fn definition(&self) -> &ToolDefinition {
            &self.definition
        }

        fn invoke<'a>(
            &'a self,
            _args_json: &'a str,
            _context: &'a ToolExecutionContext,
        ) -> ToolFuture<'a, Result<String, ToolError>> {
            Box::pin(async move { Err(ToolError::execution("tool exploded")) })
        }
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl ToolRuntimeHooks for RecordingHooks {
        fn on_execution_start(&self, tool_call: &ToolCall, _context: &ToolExecutionContext) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{}", tool_call.name));
        }

        fn on_execution_success(
            &self,
            tool_call: &ToolCall,
            _context: &ToolExecutionContext,
            result: &ToolExecutionResult,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{}:{}", tool_call.name, result.is_error));
        }

        fn on_execution_failure(
            &self,
            tool_call: &ToolCall,
            _context: &ToolExecutionContext,
            error: &ToolError,
            _elapsed: Duration,
        ) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("failure:{}:{:?}", tool_call.name, error.kind));
        }
    }

    fn call(name: &str, arguments: &str) -> ToolCall {
        ToolCall {
            id: format!("call_{name}"),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }

    fn runtime(hooks: Arc<RecordingHooks>) -> DefaultToolRuntime {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool::new()).expect("echo registers");
        registry.register(BrokenTool::new()).expect("broken registers");
        DefaultToolRuntime::new(Arc::new(registry)).with_hooks(hooks)
    }

    #[tokio::test]
    async fn runtime_executes_registered_tool() {
        let runtime = runtime(Arc::new(RecordingHooks::default()));

        let result = runtime
            .execute(call("echo", r#"{"text":"hi"}"#), ToolExecutionContext::new("req-1"))
            .await
            .expect("execution should succeed");

        assert_eq!(result.tool_call_id, "call_echo");
        assert_eq!(result.output, "request=req-1 text=hi");
        assert!(!result.is_error);
    }

    #[tokio::test]
    async fn malformed_arguments_render_inline() {
        let hooks = Arc::new(RecordingHooks::default());
        let runtime = runtime(hooks.clone());

        let result = runtime
            .execute(call("echo", "{not json"), ToolExecutionContext::new("req-2"))
            .await
            .expect("argument errors do not fail the call");

        assert!(result.is_error);
        assert!(result.output.starts_with("Error: invalid JSON arguments"));
        assert_eq!(
            *hooks.events.lock().expect("events lock"),
            vec!["start:echo".to_string(), "success:echo:true".to_string()]
        );
    }

    #[tokio::test]
    async fn runtime_returns_not_found_for_unknown_tool() {
        let hooks = Arc::new(RecordingHooks::default());
        let runtime = runtime(hooks.clone());

        let error = runtime
            .execute(call("missing", "{}"), ToolExecutionContext::new("req-3"))
            .await
            .expect_err("execution should fail");

        assert_eq!(error.kind, ToolErrorKind::NotFound);
        assert_eq!(error.tool_call_id.as_deref(), Some("call_missing"));
        assert_eq!(
            hooks.events.lock().expect("events lock").last().cloned(),
            Some("failure:missing:NotFound".to_string())
        );
    }

    #[tokio::test]
    async fn runtime_propagates_tool_execution_error() {
        let runtime = runtime(Arc::new(RecordingHooks::default()));

        let error = runtime
            .execute(call("broken", "{}"), ToolExecutionContext::new("req-4"))
            .await
            .expect_err("execution should fail");

        assert_eq!(error.kind, ToolErrorKind::Execution);
        assert_eq!(error.message, "tool exploded");
    }

    #[test]
    fn registry_lists_definitions_by_name_and_rejects_duplicates() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(EchoTool::new()).expect("echo registers");
        registry.register(BrokenTool::new()).expect("broken registers");
        let duplicate = registry.register(EchoTool::new()).expect_err("duplicate fails");

        assert_eq!(duplicate.kind, ToolErrorKind::Configuration);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("echo"));
        assert_eq!(registry.names(), vec!["broken".to_string(), "echo".to_string()]);
        assert_eq!(registry.definitions()[1].parameters[0].name, "text");
    }
}
