//! Core types shared by the chat transport, the tool host and the agent loop

mod message;
mod outcome;
mod tool;

pub use message::{ChatMessage, MessageRole};
pub use outcome::RunOutcome;
pub use tool::{
    ArgumentDecodeError, FunctionCall, FunctionDefinition, FunctionSchema, ToolCallRequest,
    ToolChoice, ToolDescriptor, ToolInvocationResult,
};
