//! Conversation seed

use chrono::{DateTime, SecondsFormat, Utc};

use crate::types::ChatMessage;

/// Instruction opening every conversation
pub const SYSTEM_INSTRUCTION: &str = "You are an assistant that manages the user's schedule and records \
through the tools provided. Prefer calling a tool for every action the request involves instead of \
answering from memory. Before creating anything that could conflict with an existing record, check \
availability with the relevant tool first. When the user gives a relative time such as \"tomorrow at \
3pm\", pass it to the tools literally and do not convert it between timezones. Once you have what you \
need, answer briefly.";

/// System message stating the current time
pub fn timestamp_message(now: DateTime<Utc>) -> ChatMessage {
    ChatMessage::system(format!(
        "Current timestamp: {}",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    ))
}

/// Build the opening conversation for `prompt`
pub fn seed_conversation(prompt: &str, now: DateTime<Utc>) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_INSTRUCTION),
        timestamp_message(now),
        ChatMessage::user(prompt),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageRole;
    use chrono::TimeZone;

    #[test]
    fn test_seed_conversation() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();
        let conversation = seed_conversation("List my events for tomorrow", now);

        let roles: Vec<_> = conversation.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::System, MessageRole::System, MessageRole::User]);
        assert_eq!(
            conversation[1].content.as_deref(),
            Some("Current timestamp: 2026-10-16T09:30:00.000Z")
        );
        assert_eq!(conversation[2].content.as_deref(), Some("List my events for tomorrow"));
    }
}
