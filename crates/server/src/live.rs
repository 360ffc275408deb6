// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Live workflow notifications over WebSocket.
//!
//! Events are informational. They are derived from committed transitions
//! and rejected guards, never drive state, and a client that cannot keep up
//! or disconnects has no effect on request handling. Clients re-read
//! records over HTTP for authoritative data.

use axum::{
    extract::{
        State as AxumState, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use reloc_api::{ApiError, TransitionResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Maximum number of events to buffer in the broadcast channel.
/// Slow clients lose the oldest events.
const EVENT_BUFFER_SIZE: usize = 256;

/// Live workflow events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    /// A record-level transition was committed.
    TransitionApplied {
        /// The record.
        record_id: i64,
        /// The owning request.
        request_id: i64,
        /// The applied command.
        action: String,
        /// Task-group status after the transition.
        task_group: String,
        /// Document status after the transition.
        document: String,
        /// Record version after the transition.
        version: i64,
        /// The audit event.
        event_id: i64,
    },
    /// A transition was refused because a guard does not hold.
    GuardRejected {
        /// The record.
        record_id: i64,
        /// The attempted command.
        action: String,
        /// The unmet guard.
        guard: String,
    },
    /// A task of a record was created, changed or deleted.
    TaskChanged {
        /// The record.
        record_id: i64,
        /// The task command.
        action: String,
        /// Task-group status after the change.
        task_group: String,
        /// Record version after the change.
        version: i64,
    },
    /// The derived status of a request changed.
    RequestStatusChanged {
        /// The request.
        request_id: i64,
        /// The status before the change.
        from: String,
        /// The status after the change.
        to: String,
    },
    /// Connection confirmation (sent on initial connect).
    Connected {
        /// Server timestamp (RFC 3339).
        timestamp: String,
    },
}

impl LiveEvent {
    /// The events describing a committed record transition.
    #[must_use]
    pub fn for_transition(response: &TransitionResponse) -> Vec<Self> {
        let record = &response.record;
        let mut events: Vec<Self> = vec![Self::TransitionApplied {
            record_id: record.record_id,
            request_id: record.request_id,
            action: response.action.clone(),
            task_group: record.task_group.clone(),
            document: record.document.clone(),
            version: record.version,
            event_id: response.event_id,
        }];
        events.extend(Self::status_change(response));
        events
    }

    /// The events describing a committed task change.
    #[must_use]
    pub fn for_task_change(response: &TransitionResponse) -> Vec<Self> {
        let record = &response.record;
        let mut events: Vec<Self> = vec![Self::TaskChanged {
            record_id: record.record_id,
            action: response.action.clone(),
            task_group: record.task_group.clone(),
            version: record.version,
        }];
        events.extend(Self::status_change(response));
        events
    }

    /// The event for a refused transition, if the error is a guard failure.
    #[must_use]
    pub fn for_rejection(record_id: i64, action: &str, err: &ApiError) -> Option<Self> {
        match err {
            ApiError::GuardNotSatisfied { guard, .. } => Some(Self::GuardRejected {
                record_id,
                action: String::from(action),
                guard: guard.clone(),
            }),
            _ => None,
        }
    }

    fn status_change(response: &TransitionResponse) -> Option<Self> {
        (response.previous_request_status != response.request_status).then(|| {
            Self::RequestStatusChanged {
                request_id: response.record.request_id,
                from: response.previous_request_status.clone(),
                to: response.request_status.clone(),
            }
        })
    }
}

/// Fan-out of live events to every connected client.
#[derive(Clone)]
pub struct LiveEventBroadcaster {
    tx: broadcast::Sender<LiveEvent>,
}

impl LiveEventBroadcaster {
    /// Creates a new event broadcaster.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_BUFFER_SIZE);
        Self { tx }
    }

    /// Broadcasts an event to all connected clients.
    ///
    /// Without receivers the event is dropped.
    pub fn broadcast(&self, event: &LiveEvent) {
        match self.tx.send(event.clone()) {
            Ok(count) => debug!(?event, receivers = count, "Broadcast live event"),
            Err(_) => debug!(?event, "No receivers for live event"),
        }
    }

    /// Broadcasts several events in order.
    pub fn broadcast_all(&self, events: &[LiveEvent]) {
        for event in events {
            self.broadcast(event);
        }
    }

    /// Subscribes to events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<LiveEvent> {
        self.tx.subscribe()
    }
}

impl Default for LiveEventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Handler for GET `/live`: upgrades to WebSocket and streams live events.
pub async fn live_events_handler(
    ws: WebSocketUpgrade,
    AxumState(broadcaster): AxumState<Arc<LiveEventBroadcaster>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, broadcaster))
}

async fn handle_socket(socket: WebSocket, broadcaster: Arc<LiveEventBroadcaster>) {
    info!("Client connected to live event stream");

    let (mut sender, mut receiver) = socket.split();
    let mut rx: broadcast::Receiver<LiveEvent> = broadcaster.subscribe();

    let connected_event = LiveEvent::Connected {
        timestamp: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| String::from("unknown")),
    };

    if let Ok(json) = serde_json::to_string(&connected_event)
        && sender.send(Message::Text(json.into())).await.is_err()
    {
        warn!("Failed to send connection confirmation");
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => match serde_json::to_string(&event) {
                    Ok(json) => {
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => error!(?e, "Failed to serialize live event"),
                },
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live client lagging, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Commands are never accepted over this socket.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            match msg {
                Ok(Message::Text(_) | Message::Binary(_)) => {
                    warn!("Received unexpected message from client, ignoring");
                }
                Ok(Message::Close(_)) => {
                    debug!("Client sent close frame");
                    break;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    error!(?e, "WebSocket receive error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => {
            debug!("Send task completed");
            recv_task.abort();
        }
        _ = &mut recv_task => {
            debug!("Receive task completed");
            send_task.abort();
        }
    }

    info!("Client disconnected from live event stream");
}
