use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, warn};
use utoipa::ToSchema;

pub const CLASS_FULL_EVENT: &str = "class:full";

const CHANNEL_CAPACITY: usize = 256;

/// Payload of a [`CLASS_FULL_EVENT`], sent to the class's teacher when an
/// enrolment is turned away for capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassFullEvent {
    pub id_class: i64,
    #[serde(rename = "teacherId")]
    pub teacher_id: i64,
    pub id_student: i64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// One event as written to the wire: `{"event": ..., "data": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(skip)]
    pub room: String,
    pub event: String,
    pub data: Value,
}

#[derive(Debug, Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn teacher_room(teacher_id: i64) -> String {
        format!("teacher-{teacher_id}")
    }

    /// Fire-and-forget. Returns how many listeners were connected at send time.
    pub fn publish<P: Serialize>(&self, room: impl Into<String>, event: &str, payload: &P) -> usize {
        let room = room.into();
        let data = match serde_json::to_value(payload) {
            Ok(data) => data,
            Err(e) => {
                error!(room = %room, event, error = %e, "Failed to encode notification");
                return 0;
            }
        };

        let notification = Notification {
            room: room.clone(),
            event: event.to_string(),
            data,
        };

        match self.sender.send(notification) {
            Ok(listeners) => {
                debug!(room = %room, event, listeners, "Notification published");
                listeners
            }
            Err(_) => {
                debug!(room = %room, event, "Notification dropped, no listeners");
                0
            }
        }
    }

    pub fn subscribe(&self, room: impl Into<String>) -> RoomSubscription {
        RoomSubscription {
            room: room.into(),
            receiver: self.sender.subscribe(),
        }
    }
}

/// Receiving end for a single room.
#[derive(Debug)]
pub struct RoomSubscription {
    room: String,
    receiver: broadcast::Receiver<Notification>,
}

impl RoomSubscription {
    pub fn room(&self) -> &str {
        &self.room
    }

    /// Next event for this room, or `None` once the hub is gone.
    pub async fn recv(&mut self) -> Option<Notification> {
        loop {
            match self.receiver.recv().await {
                Ok(notification) if notification.room == self.room => return Some(notification),
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    warn!(room = %self.room, skipped, "Notification listener lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}
