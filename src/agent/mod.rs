//! Appointment agent with tool calling.
//!
//! The agent alternates between asking the model for the next message and
//! running the tools it requests, until the model answers without asking for
//! a tool. The model sits behind the [`ChatModel`] trait.

mod message;
mod model;
mod runner;
mod tools;

pub use message::{Message, ToolCallRequest};
pub use model::{ChatModel, OpenAIChatModel, ToolDefinition};
pub use runner::{
    agent_text, should_continue, Agent, AgentResponse, AgentState, Node, Route, StepOutput,
    ToolCallRecord, DEFAULT_MAX_ITERATIONS,
};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext};

#[cfg(test)]
pub(crate) use model::testing;
