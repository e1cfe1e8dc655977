use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::features::dashboard::state::LogRecord;

const LOG_PANEL_ID: &str = "log-terminal";

/// Sticky scroll to bottom for a container id.
pub fn scroll_to_bottom(id: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(doc) = window.document() {
            if let Some(el) = doc.get_element_by_id(id) {
                use wasm_bindgen::JsCast;
                if let Ok(div) = el.dyn_into::<web_sys::HtmlElement>() {
                    let sh = div.scroll_height();
                    div.set_scroll_top(sh);
                }
            }
        }
    }
}

/// Terminal-style log panel. Lines are append-only and keyed, so appending
/// never re-renders the history; the panel follows the newest line.
#[component]
pub fn LogView(logs: ReadSignal<Vec<LogRecord>>) -> impl IntoView {
    // Pin the scroll after the new line has been laid out.
    Effect::new(move |_| {
        let len = logs.with(|logs| logs.len());
        if len > 0 {
            spawn_local(async move {
                TimeoutFuture::new(32).await;
                scroll_to_bottom(LOG_PANEL_ID);
            });
        }
    });

    view! {
        <div class="log-section">
            <h2>"Real-time Logs"</h2>
            <div class="log-terminal" id=LOG_PANEL_ID>
                <Show
                    when=move || logs.with(|logs| !logs.is_empty())
                    fallback=|| view! { <div class="log-waiting">"▊ Waiting for logs..."</div> }
                >
                    <For
                        each=move || logs.get()
                        key=|record| record.key.clone()
                        children=move |record: LogRecord| {
                            let line_class = format!("log-message {}", record.entry.level.as_class());
                            let stamp = format!("[{}]", record.entry.timestamp);
                            let details = record.entry.pretty_details();
                            view! {
                                <div class="log-row">
                                    <span class="log-timestamp">{stamp}</span>
                                    " "
                                    <span class=line_class>{record.entry.message}</span>
                                    {details.map(|text| view! { <pre class="log-details">{text}</pre> })}
                                </div>
                            }
                        }
                    />
                </Show>
            </div>
        </div>
    }
}
