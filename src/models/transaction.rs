use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Completed,
    Failed,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Completed => "completed",
            TxStatus::Failed => "failed",
        }
    }
}

/// One settled (or in-flight) agent payment, as returned by the snapshot
/// endpoint. The whole list is replaced on every poll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub timestamp: String,
    pub agent: String,
    pub amount: f64,
    pub address: String,
    pub tx_hash: String,
    pub status: TxStatus,
}

/// Body of the optimize trigger call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimizationRequest {
    pub product_sku: String,
    pub store_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
}

impl OptimizationRequest {
    /// The demo scenario the start button submits.
    pub fn demo_default() -> Self {
        Self {
            product_sku: "TOMATO-001".to_string(),
            store_id: "SHIBUYA-01".to_string(),
            weather: Some("sunny".to_string()),
            day_type: Some("weekend".to_string()),
            unit_price: Some(200.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_parses_snapshot_row() {
        let tx: Transaction = serde_json::from_str(
            r#"{"timestamp":"2025-11-02T10:15:30.123456","agent":"Demand Forecast","amount":0.003,"address":"0x9ca35112d1d8146a254c4b512a441be3a9ca7dda","tx_hash":"0x9ca35112d1d8146a254c4b512a441be3a9ca7ddae8fe16495d24bf44c8baec1e","status":"completed"}"#,
        )
        .unwrap();
        assert_eq!(tx.status, TxStatus::Completed);
        assert_eq!(tx.amount, 0.003);
    }

    #[test]
    fn request_omits_unset_optionals() {
        let req = OptimizationRequest {
            product_sku: "TOMATO-001".into(),
            store_id: "SHIBUYA-01".into(),
            weather: None,
            day_type: None,
            unit_price: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("weather"));
        assert!(!json.contains("unit_price"));
    }
}
