use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use tracing::{error, info};

use crate::middleware::auth::AuthUser;
use crate::realtime::{NotificationHub, RoomSubscription};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/notifications/ws",
    responses(
        (status = 101, description = "Switching to WebSocket; frames are {\"event\", \"data\"} JSON"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - teacher role required")
    ),
    tag = "Notifications",
    security(("session_cookie" = []))
)]
pub async fn notifications_ws(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ws: WebSocketUpgrade,
) -> Response {
    let subscription = state
        .notifications
        .subscribe(NotificationHub::teacher_room(auth_user.id()));

    ws.on_upgrade(move |socket| forward_notifications(socket, subscription))
}

async fn forward_notifications(mut socket: WebSocket, mut subscription: RoomSubscription) {
    info!(room = subscription.room(), "Notification listener joined");

    loop {
        tokio::select! {
            notification = subscription.recv() => {
                let Some(notification) = notification else { break };
                let frame = match serde_json::to_string(&notification) {
                    Ok(frame) => frame,
                    Err(e) => {
                        error!(error = %e, "Failed to serialize notification");
                        continue;
                    }
                };
                if socket.send(Message::Text(frame.into())).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    info!(room = subscription.room(), "Notification listener left");
}
