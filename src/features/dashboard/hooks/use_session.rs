use std::cell::RefCell;
use std::rc::Rc;

use futures::StreamExt;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::features::dashboard::feed::{FeedClient, FeedEvent};
use crate::features::dashboard::poller::spawn_snapshot_poller;
use crate::features::dashboard::services::api;
use crate::features::dashboard::state::DashboardState;
use crate::models::OptimizationRequest;

/// At most one live `EventSource` per session; the slot is shared between
/// the start/stop handlers, the feed consumer task, and unmount cleanup.
type FeedSlot = Rc<RefCell<Option<FeedClient>>>;

fn close_feed(slot: &FeedSlot) {
    if let Some(client) = slot.borrow_mut().take() {
        client.close();
    }
}

pub struct SessionHook {
    pub state: DashboardState,
    pub start: Box<dyn Fn() + 'static>,
    pub stop: Box<dyn Fn() + 'static>,
}

/// Owns the session lifecycle: starting resets state, opens the log stream,
/// spawns the snapshot poller, and fires the optimize trigger; stopping
/// flips the flag, bumps the epoch, and closes the stream before returning.
pub fn use_session() -> SessionHook {
    let state = DashboardState::new();
    let feed: FeedSlot = Rc::new(RefCell::new(None));

    let start = {
        let feed = feed.clone();
        Box::new(move || {
            if state.is_running() {
                return;
            }
            let epoch = state.begin_session();

            match FeedClient::connect(&api::stream_url()) {
                Ok((client, mut events)) => {
                    *feed.borrow_mut() = Some(client);
                    let feed = feed.clone();
                    spawn_local(async move {
                        while let Some(event) = events.next().await {
                            match event {
                                FeedEvent::TransportError => {
                                    // Terminal for this connection; the session
                                    // stays up and the user restarts to reconnect.
                                    web_sys::console::error_1(
                                        &"log stream transport error, closing connection".into(),
                                    );
                                    if state.session_is(epoch) {
                                        close_feed(&feed);
                                    }
                                    break;
                                }
                                frame => {
                                    if !state.apply_frame(epoch, frame) {
                                        break;
                                    }
                                }
                            }
                        }
                    });
                }
                Err(err) => err.report(),
            }

            spawn_snapshot_poller(state, epoch);

            let feed = feed.clone();
            spawn_local(async move {
                if let Err(err) = api::start_optimization(&OptimizationRequest::demo_default()).await {
                    err.report();
                    // Trigger failure reverts the session so the start button
                    // becomes usable again.
                    if state.session_is(epoch) {
                        state.end_session();
                        close_feed(&feed);
                    }
                }
            });
        }) as Box<dyn Fn() + 'static>
    };

    let stop = {
        let feed = feed.clone();
        Box::new(move || {
            state.end_session();
            close_feed(&feed);
        }) as Box<dyn Fn() + 'static>
    };

    {
        let feed = feed.clone();
        on_cleanup(move || {
            state.end_session();
            close_feed(&feed);
        });
    }

    SessionHook { state, start, stop }
}
