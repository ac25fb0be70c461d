//! WebSocket handler for UI notification clients
//!
//! Provides real-time booking event streaming to UI clients.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use chrono::NaiveDate;
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::select;
use tracing::{debug, error, info, warn};

use crate::application::events::{EventMessage, SharedEventBus};

/// Query parameters for filtering events
#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    /// Only events for this booking date
    pub date: Option<NaiveDate>,
    /// Filter by event types (comma-separated, optional)
    pub event_types: Option<String>,
}

impl EventFilter {
    /// Check if event matches the filter
    pub fn matches(&self, message: &EventMessage) -> bool {
        if let Some(date) = self.date {
            if message.event.date() != date {
                return false;
            }
        }

        if let Some(ref types) = self.event_types {
            let event_type = message.event.event_type();
            if !types.split(',').map(str::trim).any(|t| t == event_type) {
                return false;
            }
        }

        true
    }
}

/// State for notification WebSocket handler
#[derive(Clone)]
pub struct NotificationState {
    pub event_bus: SharedEventBus,
}

/// WebSocket upgrade handler for notifications
pub async fn ws_notifications_handler(
    ws: WebSocketUpgrade,
    State(state): State<NotificationState>,
    Query(filter): Query<EventFilter>,
) -> impl IntoResponse {
    info!(
        "New notification WebSocket connection: date={:?}, event_types={:?}",
        filter.date, filter.event_types
    );

    ws.on_upgrade(move |socket| handle_notification_socket(socket, state, filter))
}

async fn handle_notification_socket(
    socket: WebSocket,
    state: NotificationState,
    filter: EventFilter,
) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscriber = state.event_bus.subscribe();

    let welcome = serde_json::json!({
        "type": "connected",
        "message": "Connected to booking notification stream",
        "filter": {
            "date": filter.date,
            "event_types": filter.event_types
        }
    });

    if let Err(e) = sender
        .send(Message::Text(welcome.to_string().into()))
        .await
    {
        error!("Failed to send welcome message: {}", e);
        return;
    }

    loop {
        select! {
            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Ping(data))) => {
                        if let Err(e) = sender.send(Message::Pong(data)).await {
                            error!("Failed to send pong: {}", e);
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Notification client closed the stream");
                        break;
                    }
                    Some(Err(e)) => {
                        warn!("WebSocket error: {}", e);
                        break;
                    }
                    // Clients have nothing to tell us.
                    Some(Ok(_)) => {}
                }
            }

            event = subscriber.recv() => {
                let Some(event_msg) = event else {
                    warn!("Event bus closed");
                    break;
                };

                if !filter.matches(&event_msg) {
                    continue;
                }

                match serde_json::to_string(&event_msg) {
                    Ok(json) => {
                        if let Err(e) = sender.send(Message::Text(json.into())).await {
                            error!("Failed to send event: {}", e);
                            break;
                        }
                        debug!("Event sent to client: {}", event_msg.event.event_type());
                    }
                    Err(e) => {
                        error!("Failed to serialize event: {}", e);
                    }
                }
            }
        }
    }

    info!("Notification WebSocket client disconnected");
}
