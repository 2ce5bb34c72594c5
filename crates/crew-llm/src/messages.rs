//! Conversation messages
//!
//! A message is a role plus an ordered list of content blocks. Assistant
//! messages may carry [`ToolCall`]s; the reply to them is a user message of
//! tool-result blocks.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
///
/// The system prompt travels on the request, not as a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A request from the model to run one named tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned id, echoed back on the result
    pub id: String,
    pub name: String,
    /// Arguments, already decoded from the provider's wire format
    pub input: serde_json::Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

/// One piece of message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },

    ToolUse(ToolCall),

    ToolResult {
        tool_use_id: String,
        content: String,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        is_error: bool,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: false,
        }
    }

    pub fn tool_error(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
            is_error: true,
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::text(text)],
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::text(text)],
        }
    }

    pub fn assistant_blocks(content: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            content,
        }
    }

    /// User message answering one or more tool calls
    pub fn tool_results(results: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content: results,
        }
    }

    /// All text blocks joined with newlines, `None` when there is no text
    pub fn text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } if !text.is_empty() => Some(text.as_str()),
                _ => None,
            })
            .collect();

        (!parts.is_empty()).then(|| parts.join("\n"))
    }

    /// Tool calls requested by this message, in order
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse(call) => Some(call),
                _ => None,
            })
            .collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_joins_blocks() {
        let msg = Message::assistant_blocks(vec![
            ContentBlock::text("Trend is up."),
            ContentBlock::ToolUse(ToolCall::new("c1", "stock_price", json!({}))),
            ContentBlock::text("Checking news next."),
        ]);
        assert_eq!(
            msg.text().as_deref(),
            Some("Trend is up.\nChecking news next.")
        );
        assert_eq!(msg.tool_calls().len(), 1);
    }

    #[test]
    fn test_empty_text_is_none() {
        let msg = Message::assistant("");
        assert!(msg.text().is_none());
        assert!(!msg.has_tool_calls());
    }

    #[test]
    fn test_tool_call_wire_shape() {
        let block = ContentBlock::ToolUse(ToolCall::new(
            "call_1",
            "news_search",
            json!({"query": "AAPL"}),
        ));
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "tool_use");
        assert_eq!(value["name"], "news_search");
        assert_eq!(value["input"]["query"], "AAPL");

        let back: ContentBlock = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }

    #[test]
    fn test_tool_error_flag_serialization() {
        let ok = serde_json::to_value(ContentBlock::tool_result("c1", "fine")).unwrap();
        assert!(ok.get("is_error").is_none());

        let err = serde_json::to_value(ContentBlock::tool_error("c1", "bad")).unwrap();
        assert_eq!(err["is_error"], true);
    }
}
