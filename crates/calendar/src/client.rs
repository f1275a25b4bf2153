//! The REST calendar client.

use crate::slots::{Interval, free_gaps};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use concierge_core::calendar::{CalendarService, MeetingRequest, SlotQuery, UpcomingQuery};
use concierge_core::error::CalendarError;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Refresh the access token this long before it actually expires.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 30;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) > now
    }
}

/// Credentials for the refresh-token grant.
#[derive(Debug, Clone)]
pub struct CalendarCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// A calendar backend speaking bearer-token REST.
pub struct RestCalendar {
    base_url: String,
    token_url: String,
    credentials: CalendarCredentials,
    token: RwLock<Option<CachedToken>>,
    client: reqwest::Client,
}

impl RestCalendar {
    pub fn new(
        base_url: impl Into<String>,
        token_url: impl Into<String>,
        credentials: CalendarCredentials,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token_url: token_url.into(),
            credentials,
            token: RwLock::new(None),
            client,
        }
    }

    /// Return a fresh access token, refreshing through the token
    /// endpoint when the cached one is missing or near expiry.
    async fn bearer(&self) -> Result<String, CalendarError> {
        let now = Utc::now();

        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.access_token.clone());
            }
        }

        debug!("Refreshing calendar access token");
        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", &self.credentials.client_id),
                ("client_secret", &self.credentials.client_secret),
                ("refresh_token", &self.credentials.refresh_token),
            ])
            .send()
            .await
            .map_err(|e| CalendarError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!(status, body = %body, "Token refresh failed");
            return Err(CalendarError::AuthFailed(format!(
                "token refresh returned status {status}"
            )));
        }

        let grant: TokenResponse = response
            .json()
            .await
            .map_err(|e| CalendarError::AuthFailed(format!("bad token response: {e}")))?;

        let token = CachedToken {
            access_token: grant.access_token,
            expires_at: now + Duration::seconds(grant.expires_in),
        };
        let access = token.access_token.clone();
        *self.token.write().await = Some(token);
        Ok(access)
    }

    fn map_status(status: u16, body: String) -> CalendarError {
        match status {
            401 | 403 => CalendarError::AuthFailed(body),
            _ => CalendarError::Api {
                status_code: status,
                message: body,
            },
        }
    }

    async fn fail_on_error(response: reqwest::Response) -> Result<reqwest::Response, CalendarError> {
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Self::map_status(status, body))
    }
}

#[async_trait]
impl CalendarService for RestCalendar {
    async fn schedule_meeting(&self, request: MeetingRequest) -> Result<String, CalendarError> {
        if request.end <= request.start {
            return Err(CalendarError::InvalidRange(
                "meeting end must be after start".into(),
            ));
        }

        let token = self.bearer().await?;
        let url = format!("{}/events", self.base_url);

        let body = json!({
            "title": request.title,
            "start": request.start.to_rfc3339(),
            "end": request.end.to_rfc3339(),
            "attendees": request.attendees,
            "description": request.description,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| CalendarError::Network(e.to_string()))?;
        let response = Self::fail_on_error(response).await?;

        let created: CreatedEvent = response
            .json()
            .await
            .map_err(|e| CalendarError::Api {
                status_code: 200,
                message: format!("bad event payload: {e}"),
            })?;

        Ok(format_scheduled(&request, &created.id))
    }

    async fn list_upcoming_events(&self, query: UpcomingQuery) -> Result<String, CalendarError> {
        let token = self.bearer().await?;
        let url = format!("{}/events", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("from", query.from.to_rfc3339()),
                ("max_results", query.max_results.to_string()),
            ])
            .send()
            .await
            .map_err(|e| CalendarError::Network(e.to_string()))?;
        let response = Self::fail_on_error(response).await?;

        let events: Vec<ApiEvent> = response
            .json()
            .await
            .map_err(|e| CalendarError::Api {
                status_code: 200,
                message: format!("bad event list payload: {e}"),
            })?;

        Ok(format_event_list(&events))
    }

    async fn find_available_slots(&self, query: SlotQuery) -> Result<String, CalendarError> {
        if query.to <= query.from {
            return Err(CalendarError::InvalidRange(
                "slot window end must be after start".into(),
            ));
        }

        let token = self.bearer().await?;
        let url = format!("{}/freebusy", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("from", query.from.to_rfc3339()),
                ("to", query.to.to_rfc3339()),
            ])
            .send()
            .await
            .map_err(|e| CalendarError::Network(e.to_string()))?;
        let response = Self::fail_on_error(response).await?;

        let busy: Vec<ApiBusy> = response
            .json()
            .await
            .map_err(|e| CalendarError::Api {
                status_code: 200,
                message: format!("bad freebusy payload: {e}"),
            })?;

        let busy: Vec<Interval> = busy
            .into_iter()
            .map(|b| Interval {
                start: b.start,
                end: b.end,
            })
            .collect();

        let gaps = free_gaps(query.from, query.to, &busy, query.duration_minutes);
        Ok(format_slots(&gaps, query.duration_minutes))
    }

    async fn cancel_meeting(&self, event_id: &str) -> Result<String, CalendarError> {
        let token = self.bearer().await?;
        let url = format!("{}/events/{}", self.base_url, event_id);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| CalendarError::Network(e.to_string()))?;

        if response.status().as_u16() == 404 {
            return Err(CalendarError::EventNotFound(event_id.to_string()));
        }
        Self::fail_on_error(response).await?;

        Ok(format!("Cancelled event {event_id}."))
    }
}

fn format_scheduled(request: &MeetingRequest, event_id: &str) -> String {
    format!(
        "Scheduled '{}' from {} to {} (event {}).",
        request.title,
        request.start.format("%Y-%m-%d %H:%M UTC"),
        request.end.format("%H:%M UTC"),
        event_id,
    )
}

fn format_event_list(events: &[ApiEvent]) -> String {
    if events.is_empty() {
        return "No upcoming events.".into();
    }
    events
        .iter()
        .map(|e| {
            format!(
                "- {} — {} to {} (event {})",
                e.title,
                e.start.format("%Y-%m-%d %H:%M UTC"),
                e.end.format("%H:%M UTC"),
                e.id,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_slots(gaps: &[Interval], duration_minutes: u32) -> String {
    if gaps.is_empty() {
        return format!("No free slots of {duration_minutes} minutes in that window.");
    }
    gaps.iter()
        .map(|g| {
            format!(
                "- free {} to {}",
                g.start.format("%Y-%m-%d %H:%M UTC"),
                g.end.format("%H:%M UTC"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// --- Calendar API wire types (internal) ---

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct CreatedEvent {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiEvent {
    id: String,
    #[serde(default)]
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ApiBusy {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}
