use thiserror::Error;

/// One variant per failure source. None of these are fatal: a stream error
/// ends the connection, a poll error skips the tick, a trigger error reverts
/// the session flag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("log stream connection failed: {0}")]
    StreamConnect(String),
    #[error("malformed stream frame: {0}")]
    FrameDecode(String),
    #[error("transaction poll failed: {0}")]
    PollFailed(String),
    #[error("optimize trigger failed: {0}")]
    TriggerFailed(String),
}

impl DashboardError {
    /// Report to the browser console, the only diagnostic channel the
    /// dashboard has.
    pub fn report(&self) {
        web_sys::console::error_1(&self.to_string().into());
    }
}
