//! Tool catalog adapter
//!
//! Converts the tool server's descriptors into the function-calling schema
//! the chat-completion API expects.

use std::collections::HashSet;

use serde_json::{json, Value};

use crate::types::{FunctionSchema, ToolDescriptor};

/// Schema used for tools that declare no input schema
pub fn empty_parameters_schema() -> Value {
    json!({ "type": "object", "properties": {} })
}

/// Convert one descriptor into a function schema
pub fn to_function_schema(tool: &ToolDescriptor) -> FunctionSchema {
    FunctionSchema::function(
        tool.name.clone(),
        tool.description.clone(),
        tool.input_schema.clone().unwrap_or_else(empty_parameters_schema),
    )
}

/// Convert a catalog, keeping only the tools the filter allows
pub fn adapt_catalog(tools: &[ToolDescriptor], filter: &ToolFilter) -> Vec<FunctionSchema> {
    tools
        .iter()
        .filter(|tool| filter.allows(&tool.name))
        .map(to_function_schema)
        .collect()
}

/// Narrows which tools are offered to the model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    /// If set, only include tools with these names
    pub include: Option<HashSet<String>>,
    /// Exclude tools with these names
    pub exclude: HashSet<String>,
}

impl ToolFilter {
    /// A filter that allows every tool
    pub fn new() -> Self {
        Self::default()
    }

    /// Include only specific tools
    pub fn with_include(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.include = Some(names.into_iter().collect());
        self
    }

    /// Exclude specific tools
    pub fn with_exclude(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.exclude = names.into_iter().collect();
        self
    }

    /// Check if a tool name passes this filter
    pub fn allows(&self, name: &str) -> bool {
        if self.exclude.contains(name) {
            return false;
        }

        match &self.include {
            Some(include) => include.contains(name),
            None => true,
        }
    }
}
