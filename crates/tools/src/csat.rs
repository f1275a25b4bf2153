//! Record a customer-satisfaction score with optional feedback.

use async_trait::async_trait;
use concierge_core::error::ToolError;
use concierge_core::store::{CsatRecord, TurnStore};
use concierge_core::task::spawn_logged;
use concierge_core::tool::{Tool, ToolContext};
use std::sync::Arc;

const MIN_SCORE: u8 = 1;
const MAX_SCORE: u8 = 5;

pub struct RecordCsatTool {
    store: Arc<dyn TurnStore>,
}

impl RecordCsatTool {
    pub fn new(store: Arc<dyn TurnStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for RecordCsatTool {
    fn name(&self) -> &str {
        "record_csat"
    }

    fn description(&self) -> &str {
        "Record the user's satisfaction with this conversation: a score from 1 (very unsatisfied) to 5 (very satisfied) and optional free-text feedback."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "score": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 5,
                    "description": "Satisfaction score, 1-5 inclusive"
                },
                "feedback": {
                    "type": "string",
                    "description": "Optional free-text feedback"
                }
            },
            "required": ["score"]
        })
    }

    async fn invoke(
        &self,
        arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<String, ToolError> {
        let score = arguments["score"]
            .as_i64()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'score' argument".into()))?;

        // Out-of-range scores never reach the store
        if !(i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&score) {
            return Err(ToolError::InvalidArguments(format!(
                "score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
            )));
        }
        let score = score as u8;

        let feedback = arguments["feedback"].as_str().map(String::from);

        if let Some(user) = ctx.user_id.clone() {
            let store = self.store.clone();
            let record = CsatRecord::new(score, feedback.clone());
            spawn_logged("csat_record", async move {
                store.append_csat(&user, record).await
            });
        }

        Ok(format!("Recorded satisfaction score {score}/{MAX_SCORE}."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::error::StoreError;
    use concierge_core::event::UserId;
    use concierge_core::store::{
        MeetingRecord, PortfolioSnapshot, ReasoningRecord, StoredMessage, ToolRecord,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::mpsc;

    struct CountingStore {
        writes: AtomicUsize,
        tx: Option<mpsc::UnboundedSender<CsatRecord>>,
    }

    impl CountingStore {
        fn silent() -> Self {
            Self {
                writes: AtomicUsize::new(0),
                tx: None,
            }
        }

        fn signalling(tx: mpsc::UnboundedSender<CsatRecord>) -> Self {
            Self {
                writes: AtomicUsize::new(0),
                tx: Some(tx),
            }
        }
    }

    #[async_trait]
    impl TurnStore for CountingStore {
        fn name(&self) -> &str {
            "counting"
        }
        async fn append_message(&self, _u: &UserId, _m: StoredMessage) -> Result<(), StoreError> {
            Ok(())
        }
        async fn append_tool_record(&self, _u: &UserId, _r: ToolRecord) -> Result<(), StoreError> {
            Ok(())
        }
        async fn append_reasoning_trace(
            &self,
            _u: &UserId,
            _r: ReasoningRecord,
        ) -> Result<(), StoreError> {
            Ok(())
        }
        async fn append_meeting_record(
            &self,
            _u: &UserId,
            _r: MeetingRecord,
        ) -> Result<(), StoreError> {
            Ok(())
        }
        async fn append_csat(&self, _u: &UserId, r: CsatRecord) -> Result<(), StoreError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            if let Some(tx) = &self.tx {
                let _ = tx.send(r);
            }
            Ok(())
        }
        async fn load_portfolio(
            &self,
            _u: &UserId,
        ) -> Result<Option<PortfolioSnapshot>, StoreError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn valid_score_is_recorded() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let tool = RecordCsatTool::new(Arc::new(CountingStore::signalling(tx)));

        let out = tool
            .invoke(
                serde_json::json!({"score": 4, "feedback": "quick and clear"}),
                &ToolContext::for_user(UserId::new("u_1")),
            )
            .await
            .unwrap();

        assert_eq!(out, "Recorded satisfaction score 4/5.");
        let record = rx.recv().await.unwrap();
        assert_eq!(record.score, 4);
        assert_eq!(record.feedback.as_deref(), Some("quick and clear"));
    }

    #[tokio::test]
    async fn out_of_range_score_is_rejected_without_persistence() {
        let store = Arc::new(CountingStore::silent());
        let tool = RecordCsatTool::new(store.clone());

        let err = tool
            .invoke(
                serde_json::json!({"score": 6}),
                &ToolContext::for_user(UserId::new("u_1")),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidArguments(_)));
        // Validation happens before any write is spawned
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn zero_score_is_rejected() {
        let tool = RecordCsatTool::new(Arc::new(CountingStore::silent()));

        let err = tool
            .invoke(serde_json::json!({"score": 0}), &ToolContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("between 1 and 5"));
    }

    #[tokio::test]
    async fn missing_score_is_an_argument_error() {
        let tool = RecordCsatTool::new(Arc::new(CountingStore::silent()));

        let err = tool
            .invoke(
                serde_json::json!({"feedback": "nice"}),
                &ToolContext::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[tokio::test]
    async fn anonymous_sessions_confirm_without_writing() {
        let store = Arc::new(CountingStore::silent());
        let tool = RecordCsatTool::new(store.clone());

        let out = tool
            .invoke(serde_json::json!({"score": 5}), &ToolContext::default())
            .await
            .unwrap();

        assert!(out.contains("5/5"));
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }
}
