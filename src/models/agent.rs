use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The three pipeline agents the backend reports on. Order here is the
/// display order of the status cards.
pub const AGENTS: [(&str, &str); 3] = [
    ("demand_forecast", "Demand Forecast"),
    ("inventory_optimizer", "Inventory Optimizer"),
    ("report_generator", "Report Generator"),
];

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentPhase {
    #[default]
    Idle,
    Running,
    Completed,
    Error,
}

impl AgentPhase {
    pub fn label(&self) -> &'static str {
        match self {
            AgentPhase::Idle => "Waiting...",
            AgentPhase::Running => "Running...",
            AgentPhase::Completed => "Completed",
            AgentPhase::Error => "Error",
        }
    }

    pub fn as_class(&self) -> &'static str {
        match self {
            AgentPhase::Idle => "idle",
            AgentPhase::Running => "running",
            AgentPhase::Completed => "completed",
            AgentPhase::Error => "error",
        }
    }
}

/// Status snapshot for one agent as carried by a status frame.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct AgentState {
    pub status: AgentPhase,
    pub progress: u8,
}

/// Full per-agent status map. Status frames replace this wholesale; a frame
/// missing a key leaves that agent absent until the next frame restores it.
pub type AgentStatusMap = HashMap<String, AgentState>;

/// The map every session starts from: all known agents idle at 0%.
pub fn idle_status_map() -> AgentStatusMap {
    AGENTS
        .iter()
        .map(|(id, _)| (id.to_string(), AgentState::default()))
        .collect()
}
