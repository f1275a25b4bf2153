//! OpenAI Responses API client.
//!
//! Encodes a turn's event list into `/v1/responses` input items and
//! decodes output items back into the closed `OutputItem` sum. Output
//! kinds the decoder does not know land in `OutputItem::Unrecognized`
//! and pass through untouched.

use async_trait::async_trait;
use concierge_core::error::ModelError;
use concierge_core::event::ConversationEvent;
use concierge_core::model::{ModelClient, ModelResponse, OutputItem, ToolDefinition, UsageRecord};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

/// A client for the OpenAI Responses API.
pub struct OpenAiResponsesClient {
    model: String,
    base_url: String,
    api_key: String,
    max_output_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiResponsesClient {
    pub fn new(
        model: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        max_output_tokens: u32,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            model: model.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            max_output_tokens,
            client,
        }
    }

    /// Convert the event list to Responses API shape.
    ///
    /// The system prompt becomes the `instructions` field; reasoning
    /// traces are trace-only and are skipped (the API accepts only
    /// message/function items as replayed input).
    fn encode(
        events: &[ConversationEvent],
    ) -> (Option<String>, Vec<serde_json::Value>) {
        let mut instructions = None;
        let mut input = Vec::new();

        for event in events {
            match event {
                ConversationEvent::SystemPrompt { text } => {
                    instructions = Some(text.clone());
                }
                ConversationEvent::UserMessage { text, file } => {
                    let mut content = vec![json!({"type": "input_text", "text": text})];
                    if let Some(file) = file {
                        content.push(json!({"type": "input_file", "file_id": file.0}));
                    }
                    input.push(json!({"role": "user", "content": content}));
                }
                ConversationEvent::AssistantMessage { text } => {
                    input.push(json!({
                        "role": "assistant",
                        "content": [{"type": "output_text", "text": text}],
                    }));
                }
                ConversationEvent::ToolCall {
                    call_id,
                    name,
                    arguments,
                } => {
                    input.push(json!({
                        "type": "function_call",
                        "call_id": call_id,
                        "name": name,
                        "arguments": arguments,
                    }));
                }
                ConversationEvent::ToolResult { call_id, output } => {
                    input.push(json!({
                        "type": "function_call_output",
                        "call_id": call_id,
                        "output": output,
                    }));
                }
                ConversationEvent::ReasoningTrace { .. } => {}
            }
        }

        (instructions, input)
    }

    /// Convert tool definitions to Responses API shape.
    fn encode_tools(tools: &[ToolDefinition]) -> Vec<serde_json::Value> {
        tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "name": t.name,
                    "description": t.description,
                    "parameters": t.parameters,
                })
            })
            .collect()
    }

    /// Decode one wire output item, preserving unknown kinds verbatim.
    fn decode_item(item: serde_json::Value) -> OutputItem {
        match item["type"].as_str() {
            Some("message") => {
                let content = item["content"]
                    .as_array()
                    .map(|parts| {
                        parts
                            .iter()
                            .filter_map(|p| {
                                if p["type"] == "output_text" {
                                    p["text"].as_str()
                                } else {
                                    None
                                }
                            })
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .unwrap_or_default();
                OutputItem::Text { content }
            }
            Some("function_call") => OutputItem::ToolCall {
                call_id: item["call_id"].as_str().unwrap_or_default().to_string(),
                name: item["name"].as_str().unwrap_or_default().to_string(),
                arguments: item["arguments"].as_str().unwrap_or_default().to_string(),
            },
            Some("reasoning") => {
                let summary = item["summary"]
                    .as_array()
                    .map(|parts| {
                        parts
                            .iter()
                            .filter_map(|p| p["text"].as_str())
                            .collect::<Vec<_>>()
                            .join("\n")
                    })
                    .unwrap_or_default();
                OutputItem::Reasoning { summary }
            }
            _ => OutputItem::Unrecognized(item),
        }
    }
}

#[async_trait]
impl ModelClient for OpenAiResponsesClient {
    fn name(&self) -> &str {
        "openai-responses"
    }

    async fn submit(
        &self,
        events: &[ConversationEvent],
        tools: &[ToolDefinition],
    ) -> std::result::Result<ModelResponse, ModelError> {
        let url = format!("{}/responses", self.base_url);
        let (instructions, input) = Self::encode(events);

        let mut body = json!({
            "model": self.model,
            "input": input,
            "max_output_tokens": self.max_output_tokens,
        });

        if let Some(instructions) = instructions {
            body["instructions"] = json!(instructions);
        }

        if !tools.is_empty() {
            body["tools"] = json!(Self::encode_tools(tools));
        }

        debug!(model = %self.model, events = events.len(), "Submitting to reasoning model");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Timeout(e.to_string())
                } else {
                    ModelError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ModelError::RateLimited { retry_after_secs: 5 });
        }

        if status == 401 || status == 403 {
            return Err(ModelError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Model API returned error");
            return Err(ModelError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Malformed(format!("Failed to parse response: {e}")))?;

        let output = api_response
            .output
            .into_iter()
            .map(Self::decode_item)
            .collect();

        let usage = api_response
            .usage
            .map(|u| UsageRecord {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            })
            .unwrap_or_default();

        Ok(ModelResponse { output, usage })
    }
}

// --- Responses API wire types (internal) ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    output: Vec<serde_json::Value>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    input_tokens: u64,
    output_tokens: u64,
}
