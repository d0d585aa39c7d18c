//! Agent loop
//!
//! Seeds a conversation, alternates model rounds with tool execution, and
//! stops on a plain answer or when the round budget is spent.

mod agent_loop;
mod prompt;

pub use agent_loop::{AgentLoop, ROUND_LIMIT_ANSWER};
pub use prompt::{seed_conversation, timestamp_message, SYSTEM_INSTRUCTION};
