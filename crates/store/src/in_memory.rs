//! In-memory store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use concierge_core::error::StoreError;
use concierge_core::event::UserId;
use concierge_core::store::{
    CsatRecord, MeetingRecord, PortfolioSnapshot, ReasoningRecord, StoredMessage, ToolRecord,
    TurnStore,
};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Everything persisted for one user.
#[derive(Debug, Default)]
struct UserLog {
    messages: Vec<StoredMessage>,
    tool_records: Vec<ToolRecord>,
    reasoning_traces: Vec<ReasoningRecord>,
    meeting_records: Vec<MeetingRecord>,
    csat_records: Vec<CsatRecord>,
}

/// A store that keeps all records in process memory.
pub struct InMemoryStore {
    logs: RwLock<HashMap<UserId, UserLog>>,
    portfolios: RwLock<HashMap<UserId, PortfolioSnapshot>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            logs: RwLock::new(HashMap::new()),
            portfolios: RwLock::new(HashMap::new()),
        }
    }

    /// Seed a portfolio snapshot so `load_portfolio` has something to
    /// return.
    pub async fn put_portfolio(&self, user: UserId, snapshot: PortfolioSnapshot) {
        self.portfolios.write().await.insert(user, snapshot);
    }

    pub async fn message_count(&self, user: &UserId) -> usize {
        self.logs
            .read()
            .await
            .get(user)
            .map(|l| l.messages.len())
            .unwrap_or(0)
    }

    pub async fn tool_record_count(&self, user: &UserId) -> usize {
        self.logs
            .read()
            .await
            .get(user)
            .map(|l| l.tool_records.len())
            .unwrap_or(0)
    }

    pub async fn reasoning_traces(&self, user: &UserId) -> Vec<ReasoningRecord> {
        self.logs
            .read()
            .await
            .get(user)
            .map(|l| l.reasoning_traces.clone())
            .unwrap_or_default()
    }

    pub async fn meeting_records(&self, user: &UserId) -> Vec<MeetingRecord> {
        self.logs
            .read()
            .await
            .get(user)
            .map(|l| l.meeting_records.clone())
            .unwrap_or_default()
    }

    pub async fn csat_records(&self, user: &UserId) -> Vec<CsatRecord> {
        self.logs
            .read()
            .await
            .get(user)
            .map(|l| l.csat_records.clone())
            .unwrap_or_default()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TurnStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn append_message(&self, user: &UserId, message: StoredMessage) -> Result<(), StoreError> {
        let mut logs = self.logs.write().await;
        logs.entry(user.clone()).or_default().messages.push(message);
        Ok(())
    }

    async fn append_tool_record(&self, user: &UserId, record: ToolRecord) -> Result<(), StoreError> {
        let mut logs = self.logs.write().await;
        logs.entry(user.clone()).or_default().tool_records.push(record);
        Ok(())
    }

    async fn append_reasoning_trace(
        &self,
        user: &UserId,
        record: ReasoningRecord,
    ) -> Result<(), StoreError> {
        let mut logs = self.logs.write().await;
        logs.entry(user.clone())
            .or_default()
            .reasoning_traces
            .push(record);
        Ok(())
    }

    async fn append_meeting_record(
        &self,
        user: &UserId,
        record: MeetingRecord,
    ) -> Result<(), StoreError> {
        let mut logs = self.logs.write().await;
        logs.entry(user.clone())
            .or_default()
            .meeting_records
            .push(record);
        Ok(())
    }

    async fn append_csat(&self, user: &UserId, record: CsatRecord) -> Result<(), StoreError> {
        let mut logs = self.logs.write().await;
        logs.entry(user.clone()).or_default().csat_records.push(record);
        Ok(())
    }

    async fn load_portfolio(
        &self,
        user: &UserId,
    ) -> Result<Option<PortfolioSnapshot>, StoreError> {
        Ok(self.portfolios.read().await.get(user).cloned())
    }
}
