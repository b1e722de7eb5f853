//! In-process publish/subscribe for pushing events to connected clients.
//!
//! Publishers address a room (for example `teacher-42`); every WebSocket
//! listener subscribed to that room receives the event. Delivery is best
//! effort: publishing never blocks and events sent while nobody listens are
//! dropped.

pub mod hub;
pub mod ws;

pub use hub::{CLASS_FULL_EVENT, ClassFullEvent, Notification, NotificationHub, RoomSubscription};

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn init_notifications_router() -> Router<AppState> {
    Router::new().route("/ws", get(ws::notifications_ws))
}
