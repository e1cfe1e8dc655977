use leptos::prelude::*;
use crate::pages::Dashboard;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <main class="app">
            <Dashboard />
        </main>
    }
}
