use gloo_net::http::Request;
use serde::Deserialize;

use crate::features::dashboard::error::DashboardError;
use crate::models::{AgentStatusMap, OptimizationRequest, Transaction};

/// The demo backend's bind address.
pub const API_BASE: &str = "http://localhost:8000";

/// Envelope of `GET /api/transactions`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
}

/// Envelope of `GET /api/status`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StatusResponse {
    pub agents: AgentStatusMap,
    pub total_transactions: u32,
}

pub fn stream_url() -> String {
    format!("{API_BASE}/api/logs/stream")
}

/// One snapshot of the transaction table. Non-2xx responses count as poll
/// failures just like transport errors; the caller skips the tick.
pub async fn fetch_transactions() -> Result<Vec<Transaction>, DashboardError> {
    let response = Request::get(&format!("{API_BASE}/api/transactions"))
        .send()
        .await
        .map_err(|e| DashboardError::PollFailed(e.to_string()))?;
    if !response.ok() {
        return Err(DashboardError::PollFailed(format!(
            "HTTP {}",
            response.status()
        )));
    }
    let body: TransactionsResponse = response
        .json()
        .await
        .map_err(|e| DashboardError::PollFailed(e.to_string()))?;
    Ok(body.transactions)
}

/// Backend-side status, used once on mount to seed the agent panel.
pub async fn fetch_status() -> Result<StatusResponse, DashboardError> {
    let response = Request::get(&format!("{API_BASE}/api/status"))
        .send()
        .await
        .map_err(|e| DashboardError::PollFailed(e.to_string()))?;
    if !response.ok() {
        return Err(DashboardError::PollFailed(format!(
            "HTTP {}",
            response.status()
        )));
    }
    response
        .json()
        .await
        .map_err(|e| DashboardError::PollFailed(e.to_string()))
}

/// Fire the optimization run. The response body is not consumed beyond the
/// success check; progress arrives over the log stream.
pub async fn start_optimization(request: &OptimizationRequest) -> Result<(), DashboardError> {
    let response = Request::post(&format!("{API_BASE}/api/optimize"))
        .json(request)
        .map_err(|e| DashboardError::TriggerFailed(e.to_string()))?
        .send()
        .await
        .map_err(|e| DashboardError::TriggerFailed(e.to_string()))?;
    if !response.ok() {
        return Err(DashboardError::TriggerFailed(format!(
            "HTTP {}",
            response.status()
        )));
    }
    Ok(())
}
