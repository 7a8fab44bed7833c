//! Failures raised while registering or running tools.
//!
//! Only `Configuration` is fatal, and only at startup. Everything else is
//! turned into an `Error: ...` string that the model reads like any other
//! tool output.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// No tool is registered under the requested name.
    NotFound,
    /// The caller's arguments could not be used.
    InvalidArguments,
    Execution,
    /// The registry could not be built, e.g. a duplicate tool name.
    Configuration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub tool_name: Option<String>,
    pub tool_call_id: Option<String>,
}

macro_rules! kind_constructors {
    ($($fn_name:ident => $kind:ident),+ $(,)?) => {
        $(
            pub fn $fn_name(message: impl Into<String>) -> Self {
                Self::new(ToolErrorKind::$kind, message)
            }
        )+
    };
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tool_name: None,
            tool_call_id: None,
        }
    }

    kind_constructors! {
        not_found => NotFound,
        invalid_arguments => InvalidArguments,
        execution => Execution,
        configuration => Configuration,
    }

    pub fn with_tool_name(self, tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            ..self
        }
    }

    pub fn with_tool_call_id(self, tool_call_id: impl Into<String>) -> Self {
        Self {
            tool_call_id: Some(tool_call_id.into()),
            ..self
        }
    }

    /// The caller asked for something wrong, as opposed to the tool breaking.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.kind,
            ToolErrorKind::InvalidArguments | ToolErrorKind::NotFound
        )
    }

    /// Text handed back to the model in place of a tool output.
    pub fn inline_text(&self) -> String {
        format!("Error: {}", self.message)
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(tool_name) = &self.tool_name {
            write!(f, "tool '{tool_name}'")?;
            if let Some(call_id) = &self.tool_call_id {
                write!(f, " (call {call_id})")?;
            }
            f.write_str(": ")?;
        }
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ToolError {}
