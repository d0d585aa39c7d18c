//! Tool result normalizer
//!
//! Every tool result must become plain conversation text. Text items are
//! joined; anything else (images, resources, structured objects) falls back
//! to its JSON serialization.

use serde_json::Value;

use crate::types::ToolInvocationResult;

/// Text of one content item; missing or null text is empty
fn item_text(item: &Value) -> String {
    match item.get("text") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Reduce tool content to a single string
///
/// Items tagged `"type": "text"` are joined with newlines, skipping empty
/// ones. If no text survives, the whole content is serialized as JSON.
pub fn normalize_content(content: &Value) -> String {
    let texts: Vec<String> = content
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter(|item| item.get("type").and_then(Value::as_str) == Some("text"))
                .map(item_text)
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if texts.is_empty() {
        content.to_string()
    } else {
        texts.join("\n")
    }
}

/// Reduce a tool invocation result to a single string
pub fn normalize_tool_result(result: &ToolInvocationResult) -> String {
    normalize_content(&result.content)
}
