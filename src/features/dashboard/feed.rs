use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{EventSource, MessageEvent};

use crate::features::dashboard::error::DashboardError;
use crate::models::{AgentStatusMap, LogEntry};

/// One classified message off the push stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// `{type: "status", data: {...}}`: full replacement of the agent map.
    Status(AgentStatusMap),
    /// Anything else must be a log entry to append.
    Log(LogEntry),
}

/// What the feed channel carries: either a decoded frame or the news that
/// the transport died. There is no retry; a transport error is terminal for
/// the connection and the user restarts the session to reconnect.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Frame(Frame),
    TransportError,
}

/// Decode and classify one raw frame at the boundary. Payloads that are not
/// JSON, or that fit neither shape, are rejected here so nothing untyped
/// travels further into the app.
pub fn classify_frame(raw: &str) -> Result<Frame, DashboardError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| DashboardError::FrameDecode(e.to_string()))?;

    if value.get("type").and_then(|t| t.as_str()) == Some("status") {
        let data = value
            .get("data")
            .cloned()
            .ok_or_else(|| DashboardError::FrameDecode("status frame without data".into()))?;
        let map: AgentStatusMap = serde_json::from_value(data)
            .map_err(|e| DashboardError::FrameDecode(e.to_string()))?;
        return Ok(Frame::Status(map));
    }

    let entry: LogEntry = serde_json::from_value(value)
        .map_err(|e| DashboardError::FrameDecode(e.to_string()))?;
    Ok(Frame::Log(entry))
}

/// Handle on the live `EventSource`. Messages and transport errors are
/// forwarded into a single mpsc channel; the session owns the receiving end
/// and is the only consumer. Dropping the client closes the connection.
pub struct FeedClient {
    source: EventSource,
    _onmessage: Closure<dyn FnMut(MessageEvent)>,
    _onerror: Closure<dyn FnMut(web_sys::Event)>,
}

impl FeedClient {
    pub fn connect(url: &str) -> Result<(Self, UnboundedReceiver<FeedEvent>), DashboardError> {
        let source = EventSource::new(url)
            .map_err(|e| DashboardError::StreamConnect(format!("{e:?}")))?;

        let (tx, rx) = unbounded::<FeedEvent>();

        let onmessage = {
            let tx: UnboundedSender<FeedEvent> = tx.clone();
            Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(raw) = event.data().as_string() else {
                    DashboardError::FrameDecode("non-text frame".into()).report();
                    return;
                };
                match classify_frame(&raw) {
                    // Dropped sends mean the consumer is gone; the connection
                    // is about to be closed anyway.
                    Ok(frame) => {
                        let _ = tx.unbounded_send(FeedEvent::Frame(frame));
                    }
                    // Malformed frames are dropped; the connection stays open.
                    Err(err) => err.report(),
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        source.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let onerror = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let _ = tx.unbounded_send(FeedEvent::TransportError);
        }) as Box<dyn FnMut(web_sys::Event)>);
        source.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        Ok((
            Self {
                source,
                _onmessage: onmessage,
                _onerror: onerror,
            },
            rx,
        ))
    }

    pub fn close(&self) {
        self.source.set_onmessage(None);
        self.source.set_onerror(None);
        self.source.close();
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        self.close();
    }
}
