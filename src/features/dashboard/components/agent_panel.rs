use leptos::prelude::*;

use crate::models::{AgentPhase, AgentState, AgentStatusMap, AGENTS};

fn phase_icon(phase: AgentPhase) -> &'static str {
    match phase {
        AgentPhase::Running => "🔵",
        AgentPhase::Completed => "🟢",
        AgentPhase::Error => "🔴",
        AgentPhase::Idle => "⚪",
    }
}

/// One card per known agent, in pipeline order. An agent missing from the
/// current status map renders as the idle default; the reconciler never
/// back-fills absent keys.
#[component]
pub fn AgentsPanel(agents: ReadSignal<AgentStatusMap>) -> impl IntoView {
    view! {
        <div class="agents-panel">
            <h2>"Agent Status"</h2>
            {AGENTS
                .iter()
                .map(|(id, label)| view! { <AgentCard id=*id label=*label agents=agents /> })
                .collect::<Vec<_>>()}
        </div>
    }
}

#[component]
pub fn AgentCard(
    id: &'static str,
    label: &'static str,
    agents: ReadSignal<AgentStatusMap>,
) -> impl IntoView {
    let agent = move || -> AgentState { agents.with(|map| map.get(id).copied().unwrap_or_default()) };

    view! {
        <div class="agent-card">
            <div class="agent-card-header">
                <span class="agent-icon">{move || phase_icon(agent().status)}</span>
                <span class="agent-name">{label}</span>
                <span class=move || format!("agent-phase {}", agent().status.as_class())>
                    {move || agent().status.label()}
                </span>
            </div>
            <div class="progress-track">
                <div
                    class="progress-fill"
                    style:width=move || format!("{}%", agent().progress)
                ></div>
            </div>
            <div class="progress-label">{move || format!("Progress: {}%", agent().progress)}</div>
        </div>
    }
}
