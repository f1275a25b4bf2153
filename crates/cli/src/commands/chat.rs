//! The `chat` command — wire everything together and talk.

use anyhow::Context;
use concierge_agent::AgentLoop;
use concierge_calendar::{CalendarCredentials, RestCalendar};
use concierge_config::AppConfig;
use concierge_core::event::{ConversationEvent, UserId};
use concierge_core::store::{StoredMessage, ToolRecord, TurnStore};
use concierge_core::turn::TurnResult;
use concierge_providers::OpenAiResponsesClient;
use concierge_store::InMemoryStore;
use concierge_telemetry::ModelRates;
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::warn;

pub async fn run(message: Option<String>, user: Option<String>) -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    let api_key = config
        .model
        .api_key
        .clone()
        .context("no model API key configured (set CONCIERGE_API_KEY)")?;

    let model = Arc::new(OpenAiResponsesClient::new(
        config.model.name.clone(),
        config.model.base_url.clone(),
        api_key,
        config.model.max_output_tokens,
    ));

    let credentials = CalendarCredentials {
        client_id: config.calendar.client_id.clone().unwrap_or_default(),
        client_secret: config.calendar.client_secret.clone().unwrap_or_default(),
        refresh_token: config.calendar.refresh_token.clone().unwrap_or_default(),
    };
    if credentials.client_id.is_empty() {
        warn!("No calendar credentials configured; calendar tools will report errors");
    }
    let calendar = Arc::new(RestCalendar::new(
        config.calendar.base_url.clone(),
        config.calendar.token_url.clone(),
        credentials,
    ));

    let store = Arc::new(InMemoryStore::new());
    let tools = Arc::new(concierge_tools::default_registry(calendar, store.clone()));

    let rates = ModelRates::new(
        config.pricing.input_per_million,
        config.pricing.output_per_million,
    );

    let mut agent = AgentLoop::new(model, tools, store.clone(), rates)
        .with_max_iterations(config.agent.max_iterations);
    if let Some(template) = &config.agent.system_prompt {
        agent = agent.with_system_template(template.clone());
    }

    let user = user.map(UserId::new);

    match message {
        Some(message) => {
            let result = agent.run(&message, vec![], None, user.clone()).await?;
            persist_turn(store.as_ref(), user.as_ref(), &result).await;
            println!("{}", result.final_text().unwrap_or("(no text response)"));
            println!("[cost: ${:.6}]", result.total_cost);
        }
        None => interactive(&agent, store.as_ref(), user).await?,
    }

    Ok(())
}

async fn interactive(
    agent: &AgentLoop,
    store: &InMemoryStore,
    user: Option<UserId>,
) -> anyhow::Result<()> {
    println!("Concierge ready. Empty line or Ctrl-D to quit.");

    let stdin = std::io::stdin();
    let mut history: Vec<ConversationEvent> = Vec::new();

    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        let result = agent.run(line, history, None, user.clone()).await?;
        persist_turn(store, user.as_ref(), &result).await;

        println!("concierge> {}", result.final_text().unwrap_or("(no text response)"));
        println!("[cost: ${:.6}]", result.total_cost);

        history = result.events;
    }

    Ok(())
}

/// Persist this turn's new events: everything from the current user
/// message onward. Reasoning traces were already persisted by the loop;
/// the system prompt is rebuilt every turn and never stored.
async fn persist_turn(store: &InMemoryStore, user: Option<&UserId>, result: &TurnResult) {
    let Some(user) = user else { return };

    let turn_start = result
        .events
        .iter()
        .rposition(|ev| matches!(ev, ConversationEvent::UserMessage { .. }))
        .unwrap_or(0);

    let mut pending_call: Option<(String, String, String)> = None;

    for event in &result.events[turn_start..] {
        let write = match event {
            ConversationEvent::UserMessage { text, .. } => store
                .append_message(user, StoredMessage::new("user", text.clone()))
                .await,
            ConversationEvent::AssistantMessage { text } => store
                .append_message(user, StoredMessage::new("assistant", text.clone()))
                .await,
            ConversationEvent::ToolCall {
                call_id,
                name,
                arguments,
            } => {
                pending_call = Some((call_id.clone(), name.clone(), arguments.clone()));
                Ok(())
            }
            ConversationEvent::ToolResult { call_id, output } => {
                let (_, name, arguments) = pending_call
                    .take()
                    .filter(|(id, _, _)| id == call_id)
                    .unwrap_or_else(|| (call_id.clone(), String::new(), String::new()));
                store
                    .append_tool_record(user, ToolRecord::new(call_id, name, arguments, output))
                    .await
            }
            ConversationEvent::SystemPrompt { .. } | ConversationEvent::ReasoningTrace { .. } => {
                Ok(())
            }
        };

        if let Err(e) = write {
            warn!(error = %e, "Failed to persist turn event");
        }
    }
}
