//! Conversation messages exchanged between the agent, the model and tools.

use serde::{Deserialize, Serialize};

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Identifier correlating this call with its tool output message.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// JSON-encoded arguments.
    pub arguments: String,
}

impl ToolCallRequest {
    pub fn new(id: &str, name: &str, arguments: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            arguments: arguments.to_string(),
        }
    }
}

/// One message in the agent's conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Message {
    System {
        content: String,
    },
    User {
        content: String,
    },
    Assistant {
        #[serde(default)]
        content: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCallRequest>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl Message {
    pub fn system(content: &str) -> Self {
        Message::System {
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Message::User {
            content: content.to_string(),
        }
    }

    /// Assistant message carrying only text.
    pub fn assistant(content: &str) -> Self {
        Message::Assistant {
            content: Some(content.to_string()),
            tool_calls: Vec::new(),
        }
    }

    /// Assistant message requesting tool calls.
    pub fn assistant_tool_calls(tool_calls: Vec<ToolCallRequest>) -> Self {
        Message::Assistant {
            content: None,
            tool_calls,
        }
    }

    pub fn tool(tool_call_id: &str, content: &str) -> Self {
        Message::Tool {
            tool_call_id: tool_call_id.to_string(),
            content: content.to_string(),
        }
    }

    /// Text content of the message, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Message::System { content } | Message::User { content } => Some(content.as_str()),
            Message::Tool { content, .. } => Some(content.as_str()),
            Message::Assistant { content, .. } => content.as_deref(),
        }
    }

    /// Tool calls requested by this message. Empty for non-assistant messages.
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            Message::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    /// Whether this is an assistant message that asks for at least one tool.
    pub fn requests_tools(&self) -> bool {
        !self.tool_calls().is_empty()
    }
}
