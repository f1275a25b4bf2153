//! The agent loop — one turn of the tool-calling conversation.

use crate::prompt;
use crate::reconstruct::reconstruct;
use chrono::Utc;
use concierge_core::error::ModelError;
use concierge_core::event::{ConversationEvent, FileRef, UserId};
use concierge_core::model::{ModelClient, OutputItem};
use concierge_core::store::{ReasoningRecord, TurnStore};
use concierge_core::task::spawn_logged;
use concierge_core::tool::{ToolContext, ToolRegistry};
use concierge_core::turn::{Termination, TurnResult};
use concierge_telemetry::{ModelRates, round_micros};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default cap on model round-trips per turn.
const MAX_ITERATIONS: u32 = 3;

/// The orchestrator for one conversation turn.
pub struct AgentLoop {
    model: Arc<dyn ModelClient>,
    tools: Arc<ToolRegistry>,
    store: Arc<dyn TurnStore>,
    rates: ModelRates,
    system_template: String,
    max_iterations: u32,
}

impl AgentLoop {
    pub fn new(
        model: Arc<dyn ModelClient>,
        tools: Arc<ToolRegistry>,
        store: Arc<dyn TurnStore>,
        rates: ModelRates,
    ) -> Self {
        Self {
            model,
            tools,
            store,
            rates,
            system_template: prompt::DEFAULT_SYSTEM_TEMPLATE.to_string(),
            max_iterations: MAX_ITERATIONS,
        }
    }

    /// Override the maximum number of model round-trips per turn.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Override the system prompt template.
    pub fn with_system_template(mut self, template: impl Into<String>) -> Self {
        self.system_template = template.into();
        self
    }

    /// Run one turn.
    ///
    /// `prior_history` must not contain the current user message; the
    /// reconstructor appends it. Model-call failures propagate as hard
    /// turn failures; tool failures come back to the model as tagged
    /// result strings and never abort the turn.
    pub async fn run(
        &self,
        user_input: &str,
        prior_history: Vec<ConversationEvent>,
        file: Option<FileRef>,
        user: Option<UserId>,
    ) -> concierge_core::Result<TurnResult> {
        let mut events = reconstruct(
            prior_history,
            prompt::render(&self.system_template, Utc::now()),
            user_input,
            file,
        );

        // Captured once: the same schema goes to every submission in
        // this turn.
        let tool_schema = self.tools.definitions();
        let ctx = ToolContext {
            user_id: user.clone(),
        };

        info!(
            events = events.len(),
            tools = tool_schema.len(),
            "Starting turn"
        );

        let mut total_cost = 0.0f64;
        let mut termination = None;

        for iteration in 1..=self.max_iterations {
            // Keep the embedded date/time fresh even mid-loop: replace,
            // never append.
            events[0] = ConversationEvent::system(prompt::render(&self.system_template, Utc::now()));

            debug!(iteration, events = events.len(), "Submitting to model");
            let response = self.model.submit(&events, &tool_schema).await?;

            let iteration_cost = self.rates.cost(response.usage);
            total_cost = round_micros(total_cost + iteration_cost);

            for item in response.output {
                match item {
                    OutputItem::Reasoning { summary } => {
                        if summary.is_empty() {
                            continue;
                        }
                        events.push(ConversationEvent::reasoning(summary.clone()));

                        // The persisted cost is the same per-iteration
                        // value accumulated above, never recomputed.
                        if let Some(user) = user.clone() {
                            let store = self.store.clone();
                            let record = ReasoningRecord::new(summary, iteration_cost);
                            spawn_logged("reasoning_trace", async move {
                                store.append_reasoning_trace(&user, record).await
                            });
                        }
                    }
                    OutputItem::ToolCall {
                        call_id,
                        name,
                        arguments,
                    } => {
                        let parsed: serde_json::Value =
                            serde_json::from_str(&arguments).map_err(|e| {
                                ModelError::Malformed(format!(
                                    "tool call '{name}' carried invalid JSON arguments: {e}"
                                ))
                            })?;

                        events.push(ConversationEvent::tool_call(&call_id, &name, &arguments));
                        let output = self.tools.dispatch(&name, parsed, &ctx).await;
                        events.push(ConversationEvent::tool_result(call_id, output));
                    }
                    OutputItem::Text { content } => {
                        events.push(ConversationEvent::assistant(content));
                        termination = Some(Termination::TextProduced);
                    }
                    OutputItem::Unrecognized(value) => {
                        debug!(kind = %value["type"], "Ignoring unrecognized output item");
                    }
                }
            }

            if termination.is_some() {
                break;
            }
            if iteration == self.max_iterations {
                warn!(iterations = iteration, "Iteration cap reached without text");
            }
        }

        let termination = termination.unwrap_or(Termination::IterationLimitReached);
        info!(?termination, total_cost, "Turn finished");

        Ok(TurnResult {
            events,
            total_cost,
            termination,
        })
    }
}
