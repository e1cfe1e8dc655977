pub mod agent;
pub mod log;
pub mod transaction;

// Export the wire types for use throughout the app
pub use agent::{idle_status_map, AgentPhase, AgentState, AgentStatusMap, AGENTS};
pub use log::{LogEntry, LogLevel};
pub use transaction::{OptimizationRequest, Transaction, TxStatus};
