//! Noop store — accepts every write and remembers nothing.
//!
//! Used when no durable backend is wired up; the conversation proceeds
//! and writes vanish.

use async_trait::async_trait;
use concierge_core::error::StoreError;
use concierge_core::event::UserId;
use concierge_core::store::{
    CsatRecord, MeetingRecord, PortfolioSnapshot, ReasoningRecord, StoredMessage, ToolRecord,
    TurnStore,
};

pub struct NoopStore;

#[async_trait]
impl TurnStore for NoopStore {
    fn name(&self) -> &str {
        "noop"
    }

    async fn append_message(&self, _user: &UserId, _message: StoredMessage) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append_tool_record(&self, _user: &UserId, _record: ToolRecord) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append_reasoning_trace(
        &self,
        _user: &UserId,
        _record: ReasoningRecord,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append_meeting_record(
        &self,
        _user: &UserId,
        _record: MeetingRecord,
    ) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append_csat(&self, _user: &UserId, _record: CsatRecord) -> Result<(), StoreError> {
        Ok(())
    }

    async fn load_portfolio(
        &self,
        _user: &UserId,
    ) -> Result<Option<PortfolioSnapshot>, StoreError> {
        Ok(None)
    }
}
