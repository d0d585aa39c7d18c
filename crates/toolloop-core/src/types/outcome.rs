//! Run outcome

use serde::{Deserialize, Serialize};

/// Final result of one assistant run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Final answer text (possibly empty)
    pub answer: String,
    /// Number of tool invocations executed during the run
    #[serde(rename = "toolCalls")]
    pub tool_calls: usize,
}

impl RunOutcome {
    pub fn new(answer: impl Into<String>, tool_calls: usize) -> Self {
        Self {
            answer: answer.into(),
            tool_calls,
        }
    }
}
