//! Agent graph: a model node and a tool node joined by a conditional edge.
//!
//! Execution starts at [`Node::Agent`]. After each model call the latest
//! message is inspected; if it requests tools the graph moves to
//! [`Node::Tools`] and then back to the model, otherwise it ends. Every step
//! appends its output to the [`AgentState`] and is recorded as a
//! [`StepOutput`].

use super::message::{Message, ToolCallRequest};
use super::model::{ChatModel, OpenAIChatModel};
use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::appointments::DATE_FORMAT;
use crate::config::{Prompts, Settings};
use crate::error::{MedAppointError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default cap on model calls per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// Graph nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Calls the model.
    Agent,
    /// Runs the tools the model asked for.
    Tools,
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Agent => write!(f, "agent"),
            Node::Tools => write!(f, "tools"),
        }
    }
}

/// Where to go after the agent node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Tools,
    End,
}

/// Conversation state for one run. Messages are only ever appended.
#[derive(Debug, Clone, Default)]
pub struct AgentState {
    messages: Vec<Message>,
}

impl AgentState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn append(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.messages.extend(messages);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Conditional edge out of the agent node.
pub fn should_continue(state: &AgentState) -> Route {
    match state.last() {
        Some(message) if message.requests_tools() => Route::Tools,
        _ => Route::End,
    }
}

/// Messages produced by one node execution.
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub node: Node,
    pub messages: Vec<Message>,
}

/// Agent that books appointments through tool calls.
pub struct Agent {
    model: Arc<dyn ChatModel>,
    tools: ToolContext,
    max_iterations: usize,
    system_prompt: String,
    prompts: Prompts,
}

impl Agent {
    /// Create a new agent with the given model and tool context.
    pub fn new(model: Arc<dyn ChatModel>, tools: ToolContext) -> Self {
        let prompts = Prompts::default();
        Self {
            model,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            system_prompt: prompts.agent.system.clone(),
            prompts,
        }
    }

    /// Build an OpenAI-backed agent from settings.
    pub fn from_settings(settings: &Settings, model: Option<&str>) -> Result<Self> {
        let model_name = model.unwrap_or(settings.agent.model.as_str());
        let chat_model = OpenAIChatModel::new(
            model_name,
            Duration::from_secs(settings.agent.timeout_secs),
        )?;
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        Ok(Self::new(Arc::new(chat_model), ToolContext::new())
            .with_prompts(prompts)
            .with_max_iterations(settings.agent.max_iterations))
    }

    /// Use a prompt set; its agent system prompt becomes the template.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.system_prompt = prompts.agent.system.clone();
        self.prompts = prompts;
        self
    }

    /// Set a custom system prompt template.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Run the graph for one user message.
    #[instrument(skip(self, input), fields(model = %self.model.model_name()))]
    pub async fn run(&self, input: &str) -> Result<AgentResponse> {
        let mut state = AgentState::new(vec![
            Message::system(&self.render_system_prompt()),
            Message::user(input),
        ]);

        let tools = tool_definitions();
        let mut steps = Vec::new();
        let mut tool_calls_made = Vec::new();
        let mut iterations = 0;
        let mut node = Node::Agent;

        loop {
            match node {
                Node::Agent => {
                    iterations += 1;
                    if iterations > self.max_iterations {
                        return Err(MedAppointError::Agent(format!(
                            "Agent exceeded maximum iterations ({})",
                            self.max_iterations
                        )));
                    }

                    debug!("Agent iteration {}", iterations);

                    let reply = self.model.complete(state.messages(), &tools).await?;
                    state.append([reply.clone()]);
                    steps.push(StepOutput {
                        node: Node::Agent,
                        messages: vec![reply],
                    });

                    match should_continue(&state) {
                        Route::Tools => node = Node::Tools,
                        Route::End => break,
                    }
                }
                Node::Tools => {
                    let requested: Vec<ToolCallRequest> = state
                        .last()
                        .map(|m| m.tool_calls().to_vec())
                        .unwrap_or_default();

                    let mut outputs = Vec::with_capacity(requested.len());
                    for call in &requested {
                        let record = self.execute_tool_call(call);
                        outputs.push(Message::tool(&call.id, &record.result));
                        tool_calls_made.push(record);
                    }

                    state.append(outputs.clone());
                    steps.push(StepOutput {
                        node: Node::Tools,
                        messages: outputs,
                    });
                    node = Node::Agent;
                }
            }
        }

        info!("Agent finished after {} iteration(s)", iterations);

        Ok(AgentResponse {
            content: agent_text(&steps),
            steps,
            tool_calls: tool_calls_made,
            iterations,
            state,
        })
    }

    fn render_system_prompt(&self) -> String {
        let mut vars = HashMap::new();
        vars.insert(
            "today".to_string(),
            self.tools.today().format(DATE_FORMAT).to_string(),
        );
        self.prompts.render_with_custom(&self.system_prompt, &vars)
    }

    /// Execute a single tool call. Unparseable calls are reported back to the model as text.
    fn execute_tool_call(&self, call: &ToolCallRequest) -> ToolCallRecord {
        info!("Agent calling tool: {} with args: {}", call.name, call.arguments);

        let result = match parse_tool_call(&call.name, &call.arguments) {
            Ok(tool) => self.tools.execute(&tool),
            Err(e) => {
                warn!("Rejected tool call {}: {}", call.name, e);
                format!("Failed to parse tool call: {}", e)
            }
        };

        ToolCallRecord {
            id: call.id.clone(),
            name: call.name.clone(),
            arguments: call.arguments.clone(),
            result,
        }
    }
}

/// Concatenate the text of every message produced by agent steps.
pub fn agent_text(steps: &[StepOutput]) -> String {
    steps
        .iter()
        .filter(|step| step.node == Node::Agent)
        .flat_map(|step| step.messages.iter())
        .filter_map(Message::text)
        .collect()
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// Text produced by the agent node, concatenated in order.
    pub content: String,
    /// Every node execution, in order.
    pub steps: Vec<StepOutput>,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
    /// Final conversation state.
    pub state: AgentState,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Identifier issued by the model.
    pub id: String,
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}
