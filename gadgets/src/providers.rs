//! Startup errors and completion backend selection.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use gcatalog::Storefront;
use gcatalog::scripted::{HELP_TEXT, storefront_rules};
use gprovider::adapters::mock::{MockProvider, SimulatedLatency};
use gprovider::adapters::openai_compat::OpenAiCompatProvider;
use gprovider::{ModelProvider, ProviderError, SecretString};
use gtooling::ToolError;

use crate::config::{Backend, BackendArgs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupErrorKind {
    /// Missing or malformed connection settings.
    Configuration,
    /// The selected backend could not be constructed.
    Provider,
    /// A tool registry could not be built, e.g. a duplicate tool name.
    Tooling,
}

/// Failure while wiring the application together. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupError {
    pub kind: SetupErrorKind,
    pub message: String,
}

impl SetupError {
    pub fn new(kind: SetupErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(SetupErrorKind::Configuration, message)
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(SetupErrorKind::Provider, message)
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(SetupErrorKind::Tooling, message)
    }
}

impl Display for SetupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for SetupError {}

impl From<ProviderError> for SetupError {
    fn from(value: ProviderError) -> Self {
        Self::provider(value.to_string())
    }
}

impl From<ToolError> for SetupError {
    fn from(value: ToolError) -> Self {
        Self::tooling(value.to_string())
    }
}

/// Builds the one completion backend selected by `args`.
pub fn build_provider(
    args: &BackendArgs,
    storefront: Arc<Storefront>,
) -> Result<Arc<dyn ModelProvider>, SetupError> {
    let provider: Arc<dyn ModelProvider> = match args.backend {
        Backend::Mock => Arc::new(mock_provider(storefront, args.mock_latency)),
        Backend::Ollama => {
            let base_url = require_http_url("ollama url", &args.ollama_url)?;
            let model = require_value("ollama model", &args.ollama_model)?;
            Arc::new(OpenAiCompatProvider::ollama(base_url, model)?)
        }
        Backend::Openai => {
            let api_key = args
                .openai_api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .ok_or_else(|| {
                    SetupError::configuration(
                        "hosted backend requires an API key (--openai-api-key or GADGETS_OPENAI_API_KEY)",
                    )
                })?;
            let base_url = require_http_url("hosted base url", &args.openai_base_url)?;
            let model = require_value("hosted model", &args.openai_model)?;
            Arc::new(OpenAiCompatProvider::openai(
                SecretString::new(api_key),
                model,
                base_url,
            )?)
        }
    };

    tracing::info!(
        phase = "setup",
        event = "backend_selected",
        provider = %provider.id()
    );
    Ok(provider)
}

/// Keyword-rule backend answering from the demo storefront.
pub fn mock_provider(storefront: Arc<Storefront>, simulate_latency: bool) -> MockProvider {
    let latency = if simulate_latency {
        SimulatedLatency::demo()
    } else {
        SimulatedLatency::none()
    };

    MockProvider::new(HELP_TEXT)
        .with_rules(storefront_rules(storefront))
        .with_latency(latency)
}

fn require_value<'a>(name: &str, value: &'a str) -> Result<&'a str, SetupError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SetupError::configuration(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn require_http_url<'a>(name: &str, value: &'a str) -> Result<&'a str, SetupError> {
    let value = require_value(name, value)?;
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(SetupError::configuration(format!(
            "{name} must start with http:// or https://, got '{value}'"
        )));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use gprovider::ProviderId;

    use super::*;

    fn storefront() -> Arc<Storefront> {
        let as_of = NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|date| date.and_hms_opt(9, 30, 0))
            .expect("valid timestamp");
        Arc::new(Storefront::demo(as_of))
    }

    fn args(backend: Backend) -> BackendArgs {
        BackendArgs {
            backend,
            ..BackendArgs::default()
        }
    }

    fn setup_error(result: Result<Arc<dyn ModelProvider>, SetupError>) -> SetupError {
        match result {
            Ok(provider) => panic!("expected setup error, built {}", provider.id()),
            Err(err) => err,
        }
    }

    #[test]
    fn each_backend_builds_exactly_its_provider() {
        let mock = build_provider(&args(Backend::Mock), storefront()).expect("mock builds");
        assert_eq!(mock.id(), ProviderId::Mock);

        let ollama = build_provider(&args(Backend::Ollama), storefront()).expect("ollama builds");
        assert_eq!(ollama.id(), ProviderId::Ollama);

        let hosted = build_provider(
            &BackendArgs {
                openai_api_key: Some("sk-test".to_string()),
                ..args(Backend::Openai)
            },
            storefront(),
        )
        .expect("hosted builds");
        assert_eq!(hosted.id(), ProviderId::OpenAi);
    }

    #[test]
    fn hosted_backend_without_key_is_a_configuration_error() {
        let err = setup_error(build_provider(&args(Backend::Openai), storefront()));
        assert_eq!(err.kind, SetupErrorKind::Configuration);
        assert!(err.message.contains("API key"));

        let blank = BackendArgs {
            openai_api_key: Some("   ".to_string()),
            ..args(Backend::Openai)
        };
        let err = setup_error(build_provider(&blank, storefront()));
        assert_eq!(err.kind, SetupErrorKind::Configuration);
    }

    #[test]
    fn malformed_endpoint_is_a_configuration_error() {
        let bad_url = BackendArgs {
            ollama_url: "localhost:11434".to_string(),
            ..args(Backend::Ollama)
        };
        let err = setup_error(build_provider(&bad_url, storefront()));
        assert_eq!(err.kind, SetupErrorKind::Configuration);

        let blank_model = BackendArgs {
            ollama_model: " ".to_string(),
            ..args(Backend::Ollama)
        };
        let err = setup_error(build_provider(&blank_model, storefront()));
        assert_eq!(err.kind, SetupErrorKind::Configuration);
        assert_eq!(err.message, "ollama model must not be empty");
    }

    #[test]
    fn tool_errors_become_tooling_setup_errors() {
        let err = SetupError::from(ToolError::configuration("tool 'add' is already registered"));
        assert_eq!(err.kind, SetupErrorKind::Tooling);
        assert!(err.message.contains("already registered"));
    }
}
