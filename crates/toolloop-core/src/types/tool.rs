//! Tool/function calling types

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

/// A tool advertised by the tool-hosting server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name, unique within one catalog
    pub name: String,
    /// Human readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the input arguments
    #[serde(rename = "inputSchema", default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

impl ToolDescriptor {
    /// Create a descriptor with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the input schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// Function definition inside a [`FunctionSchema`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub parameters: Value,
}

/// Tool definition in the chat-completions function-calling format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
    /// Always `"function"`
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDefinition,
}

impl FunctionSchema {
    /// Create a function schema
    pub fn function(name: impl Into<String>, description: Option<String>, parameters: Value) -> Self {
        Self {
            kind: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description,
                parameters,
            },
        }
    }

    /// Name of the function this schema describes
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// Function name and raw arguments of a requested call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// Arguments as the model produced them (a JSON string, not yet parsed)
    #[serde(default)]
    pub arguments: String,
}

/// Tool call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Correlation id, unique within one assistant message
    pub id: String,
    #[serde(rename = "type", default = "function_kind")]
    pub kind: String,
    pub function: FunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

/// Why a tool call's argument payload could not be used
#[derive(Error, Debug)]
pub enum ArgumentDecodeError {
    #[error("arguments are not valid JSON: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("arguments must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl ToolCallRequest {
    /// Create a tool call request
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: function_kind(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    /// Name of the tool being called
    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// Parse the raw argument payload into an argument map
    pub fn parse_arguments(&self) -> Result<Map<String, Value>, ArgumentDecodeError> {
        match serde_json::from_str::<Value>(&self.function.arguments)? {
            Value::Object(map) => Ok(map),
            Value::Null => Err(ArgumentDecodeError::NotAnObject("null")),
            Value::Bool(_) => Err(ArgumentDecodeError::NotAnObject("a boolean")),
            Value::Number(_) => Err(ArgumentDecodeError::NotAnObject("a number")),
            Value::String(_) => Err(ArgumentDecodeError::NotAnObject("a string")),
            Value::Array(_) => Err(ArgumentDecodeError::NotAnObject("an array")),
        }
    }
}

/// Tool choice sent with requests that offer tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// Let the model decide whether to use tools
    #[default]
    Auto,
}

/// What the tool-hosting server returned for one call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationResult {
    /// Content items tagged by `type`, or a structured value
    pub content: Value,
    /// Whether the host flagged the result as an error
    #[serde(rename = "isError", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolInvocationResult {
    /// Result made of the given content items
    pub fn from_items(items: Vec<Value>) -> Self {
        Self {
            content: Value::Array(items),
            is_error: false,
        }
    }

    /// Result with a single text item
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_items(vec![json!({ "type": "text", "text": text.into() })])
    }

    /// Result carrying a structured value instead of content items
    pub fn structured(value: Value) -> Self {
        Self {
            content: value,
            is_error: false,
        }
    }

    /// Mark the result as an error
    pub fn with_error(mut self) -> Self {
        self.is_error = true;
        self
    }
}
