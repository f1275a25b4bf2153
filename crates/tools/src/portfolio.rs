//! Look up the user's portfolio snapshot from the document store.

use async_trait::async_trait;
use concierge_core::error::ToolError;
use concierge_core::store::{PortfolioSnapshot, TurnStore};
use concierge_core::tool::{Tool, ToolContext};
use std::sync::Arc;

pub struct PortfolioLookupTool {
    store: Arc<dyn TurnStore>,
}

impl PortfolioLookupTool {
    pub fn new(store: Arc<dyn TurnStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for PortfolioLookupTool {
    fn name(&self) -> &str {
        "portfolio_lookup"
    }

    fn description(&self) -> &str {
        "Look up the user's current portfolio: holdings, per-position values, and the total."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn invoke(
        &self,
        _arguments: serde_json::Value,
        ctx: &ToolContext,
    ) -> Result<String, ToolError> {
        let user = ctx.user_id.as_ref().ok_or_else(|| ToolError::ExecutionFailed {
            tool_name: "portfolio_lookup".into(),
            reason: "no user identity on this conversation".into(),
        })?;

        let snapshot = self.store.load_portfolio(user).await?;

        match snapshot {
            None => Ok("No portfolio on record for this user.".into()),
            Some(snapshot) => Ok(format_portfolio(&snapshot)),
        }
    }
}

fn format_portfolio(snapshot: &PortfolioSnapshot) -> String {
    let mut lines: Vec<String> = snapshot
        .holdings
        .iter()
        .map(|h| {
            format!(
                "- {} ({}): {} units, {:.2} {}",
                h.symbol, h.name, h.quantity, h.value, snapshot.currency
            )
        })
        .collect();
    lines.push(format!(
        "Total: {:.2} {} (as of {})",
        snapshot.total_value,
        snapshot.currency,
        snapshot.as_of.format("%Y-%m-%d"),
    ));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use concierge_core::error::StoreError;
    use concierge_core::event::UserId;
    use concierge_core::store::{
        CsatRecord, Holding, MeetingRecord, ReasoningRecord, StoredMessage, ToolRecord,
    };

    struct FixedStore {
        snapshot: Option<PortfolioSnapshot>,
    }

    #[async_trait]
    impl TurnStore for FixedStore {
        fn name(&self) -> &str {
            "fixed"
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
        async fn append_csat(&self, _u: &UserId, _r: CsatRecord) -> Result<(), StoreError> {
            Ok(())
        }
        async fn load_portfolio(
            &self,
            _u: &UserId,
        ) -> Result<Option<PortfolioSnapshot>, StoreError> {
            Ok(self.snapshot.clone())
        }
    }

    fn snapshot() -> PortfolioSnapshot {
        PortfolioSnapshot {
            holdings: vec![
                Holding {
                    symbol: "VWRL".into(),
                    name: "FTSE All-World".into(),
                    quantity: 120.0,
                    value: 13_800.0,
                },
                Holding {
                    symbol: "AGGH".into(),
                    name: "Global Aggregate Bond".into(),
                    quantity: 300.0,
                    value: 1_530.0,
                },
            ],
            total_value: 15_330.0,
            currency: "EUR".into(),
            as_of: Utc::now(),
        }
    }

    #[tokio::test]
    async fn formats_holdings_and_total() {
        let tool = PortfolioLookupTool::new(Arc::new(FixedStore {
            snapshot: Some(snapshot()),
        }));

        let out = tool
            .invoke(
                serde_json::json!({}),
                &ToolContext::for_user(UserId::new("u_1")),
            )
            .await
            .unwrap();

        assert!(out.contains("VWRL"));
        assert!(out.contains("AGGH"));
        assert!(out.contains("Total: 15330.00 EUR"));
    }

    #[tokio::test]
    async fn empty_portfolio_reported_plainly() {
        let tool = PortfolioLookupTool::new(Arc::new(FixedStore { snapshot: None }));

        let out = tool
            .invoke(
                serde_json::json!({}),
                &ToolContext::for_user(UserId::new("u_1")),
            )
            .await
            .unwrap();

        assert_eq!(out, "No portfolio on record for this user.");
    }

    #[tokio::test]
    async fn no_user_identity_is_an_error() {
        let tool = PortfolioLookupTool::new(Arc::new(FixedStore { snapshot: None }));

        let err = tool
            .invoke(serde_json::json!({}), &ToolContext::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no user identity"));
    }
}
