//! Chat model abstraction and the OpenAI implementation.

use super::message::{Message, ToolCallRequest};
use crate::error::{MedAppointError, Result};
use crate::openai::create_client_with_timeout;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall,
    FunctionObject,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// A tool exposed to the model: name, description and JSON schema of its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Trait for models that produce the next assistant message.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Produce one assistant message given the conversation so far.
    async fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<Message>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}

/// Chat model backed by the OpenAI chat completions API.
pub struct OpenAIChatModel {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
}

impl OpenAIChatModel {
    /// Create a model client with the given request timeout.
    pub fn new(model: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(timeout)?,
            model: model.to_string(),
        })
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    #[instrument(skip(self, messages, tools), fields(model = %self.model, messages = messages.len()))]
    async fn complete(&self, messages: &[Message], tools: &[ToolDefinition]) -> Result<Message> {
        let request_messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(request_messages)
            .tools(tools.iter().map(to_openai_tool).collect::<Vec<_>>())
            .build()
            .map_err(|e| MedAppointError::Agent(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| MedAppointError::OpenAI(format!("Chat API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| MedAppointError::Agent("No response from model".to_string()))?;

        let tool_calls: Vec<ToolCallRequest> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCallRequest {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        debug!("Model returned {} tool call(s)", tool_calls.len());

        Ok(Message::Assistant {
            content: choice.message.content,
            tool_calls,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

fn to_request_message(message: &Message) -> Result<ChatCompletionRequestMessage> {
    let built: ChatCompletionRequestMessage = match message {
        Message::System { content } => ChatCompletionRequestSystemMessageArgs::default()
            .content(content.as_str())
            .build()
            .map_err(|e| MedAppointError::Agent(e.to_string()))?
            .into(),
        Message::User { content } => ChatCompletionRequestUserMessageArgs::default()
            .content(content.as_str())
            .build()
            .map_err(|e| MedAppointError::Agent(e.to_string()))?
            .into(),
        Message::Assistant {
            content,
            tool_calls,
        } => {
            let mut args = ChatCompletionRequestAssistantMessageArgs::default();
            if let Some(text) = content {
                args.content(text.as_str());
            }
            if !tool_calls.is_empty() {
                args.tool_calls(
                    tool_calls
                        .iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id.clone(),
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name.clone(),
                                arguments: call.arguments.clone(),
                            },
                        })
                        .collect::<Vec<_>>(),
                );
            }
            args.build()
                .map_err(|e| MedAppointError::Agent(e.to_string()))?
                .into()
        }
        Message::Tool {
            tool_call_id,
            content,
        } => ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(tool_call_id.as_str())
            .content(content.as_str())
            .build()
            .map_err(|e| MedAppointError::Agent(e.to_string()))?
            .into(),
    };

    Ok(built)
}

fn to_openai_tool(tool: &ToolDefinition) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: tool.name.clone(),
            description: Some(tool.description.clone()),
            parameters: Some(tool.parameters.clone()),
            strict: None,
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_conversion() {
        let tool = ToolDefinition {
            name: "book_appointment".to_string(),
            description: "Book".to_string(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
        };
        let converted = to_openai_tool(&tool);
        assert_eq!(converted.function.name, "book_appointment");
        assert_eq!(converted.function.description.as_deref(), Some("Book"));
    }

    #[test]
    fn test_message_conversion() {
        let messages = vec![
            Message::system("You book appointments."),
            Message::user("Any cardiology slots?"),
            Message::assistant_tool_calls(vec![ToolCallRequest::new(
                "call_1",
                "get_available_slots",
                r#"{"speciality":"Cardiology","day":"20-03-2030"}"#,
            )]),
            Message::tool("call_1", r#"["10:00 AM"]"#),
            Message::assistant("10:00 AM is free."),
        ];

        let converted: Vec<_> = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(converted.len(), 5);
        assert!(matches!(converted[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(converted[1], ChatCompletionRequestMessage::User(_)));
        match &converted[2] {
            ChatCompletionRequestMessage::Assistant(msg) => {
                let calls = msg.tool_calls.as_ref().unwrap();
                assert_eq!(calls[0].id, "call_1");
                assert_eq!(calls[0].function.name, "get_available_slots");
            }
            other => panic!("Expected assistant message, got {:?}", other),
        }
        match &converted[3] {
            ChatCompletionRequestMessage::Tool(msg) => assert_eq!(msg.tool_call_id, "call_1"),
            other => panic!("Expected tool message, got {:?}", other),
        }
    }
}
