//! Rules chat helpers.
//!
//! A teacher agrees on a marking scheme by chatting with the model; the model's
//! latest reply is the rule list that gets attached to the evaluation.

use crate::types::{ChatMessage, ChatRole};

/// Greeting shown before the teacher has said anything.
pub const GREETING: &str = "Hello! I'm here to help you set up the evaluation rules. Please tell me how you'd like me to grade the answer sheet. For example, you can specify marks for each question, keywords to look for, or how to handle partial answers.";

/// Reply recorded in the transcript when the model could not be reached.
pub const FAILURE_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// The rules to keep: the model's last message, or `initial` when it has none.
pub fn final_rules(messages: &[ChatMessage], initial: &str) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::Model && !m.text.trim().is_empty())
        .map(|m| m.text.clone())
        .unwrap_or_else(|| initial.to_string())
}

/// Whether the transcript is ready to send: non-empty and ending with the teacher.
pub fn awaiting_model(messages: &[ChatMessage]) -> bool {
    messages
        .last()
        .is_some_and(|m| m.role == ChatRole::User && !m.text.trim().is_empty())
}
