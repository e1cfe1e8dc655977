use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::features::dashboard::components::{AgentsPanel, LogView, TransactionsTable};
use crate::features::dashboard::hooks::use_session;
use crate::features::dashboard::services::api;

#[component]
pub fn Dashboard() -> impl IntoView {
    let session = use_session();
    let state = session.state;
    let running = state.running();

    // Seed the agent panel with the backend's last-known status. Skipped if
    // a session has started by the time the response lands; the live feed
    // owns the map from then on.
    spawn_local(async move {
        match api::fetch_status().await {
            Ok(status) => {
                if !state.is_running() {
                    web_sys::console::log_1(
                        &format!(
                            "restored backend status ({} transactions settled)",
                            status.total_transactions
                        )
                        .into(),
                    );
                    state.replace_status(status.agents);
                }
            }
            Err(err) => err.report(),
        }
    });

    let start = session.start;
    let stop: Rc<dyn Fn()> = Rc::from(session.stop);

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"A2A Supply Chain - Live Demo Dashboard"</h1>
                <p class="subtitle">
                    "Real-time monitoring of agent coordination and on-chain settlement"
                </p>
            </header>

            <div class="dashboard-actions">
                <button
                    class="btn-start"
                    disabled=move || running.get()
                    on:click=move |_| (start)()
                >
                    {move || if running.get() { "Running..." } else { "🚀 Start Optimization" }}
                </button>
                {move || {
                    let stop = Rc::clone(&stop);
                    running.get().then(move || {
                        view! {
                            <button class="btn-stop" on:click=move |_| (stop)()>
                                "Stop"
                            </button>
                        }
                    })
                }}
            </div>

            <div class="dashboard-grid">
                <AgentsPanel agents=state.agents() />
                <LogView logs=state.logs() />
            </div>

            <TransactionsTable transactions=state.transactions() />
        </div>
    }
}
