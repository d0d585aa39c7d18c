//! Tool catalog and tool result handling
//!
//! ```text
//! MCP tools/list ──► ToolDescriptor ──► ToolFilter ──► FunctionSchema (to the model)
//! MCP tools/call ──► ToolInvocationResult ──► normalize_tool_result ──► tool message
//! ```

mod catalog;
mod normalize;

pub use catalog::{adapt_catalog, to_function_schema, empty_parameters_schema, ToolFilter};
pub use normalize::{normalize_content, normalize_tool_result};
