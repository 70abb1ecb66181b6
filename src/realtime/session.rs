use actix_web::{HttpRequest, HttpResponse, web};
use actix_ws::Message;
use futures_util::StreamExt;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::realtime::protocol::{ClientMessage, ServerEvent};
use crate::realtime::server::{ClientHandle, EventServer};

/// GET /api/ws
///
/// Upgrades the HTTP connection to a WebSocket. The socket carries no
/// credentials: it only delivers payload-free signals, and the client
/// picks which gig rooms to watch by sending `joinGig` messages.
pub async fn ws_connect(
    req: HttpRequest,
    stream: web::Payload,
    event_server: web::Data<Arc<EventServer>>,
) -> Result<HttpResponse, actix_web::Error> {
    let (response, session, msg_stream) = actix_ws::handle(&req, stream)?;

    let server = event_server.get_ref().clone();
    actix_web::rt::spawn(handle_ws_session(session, msg_stream, server));

    Ok(response)
}

/// Drives one WebSocket session: routes join/leave control messages to
/// the room registry, forwards room events out to the client, and drops
/// all subscriptions on disconnect.
async fn handle_ws_session(
    mut session: actix_ws::Session,
    mut msg_stream: actix_ws::MessageStream,
    server: Arc<EventServer>,
) {
    let conn_id = Uuid::new_v4();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = ClientHandle {
        conn_id,
        sender: tx,
    };

    tracing::info!("WebSocket client {conn_id} connected");

    // Rooms this connection has joined, for cleanup on disconnect.
    let mut joined: HashSet<Uuid> = HashSet::new();

    loop {
        tokio::select! {
            // Incoming control message from the WebSocket client.
            Some(msg) = msg_stream.next() => {
                match msg {
                    Ok(Message::Text(text)) => {
                        handle_client_message(
                            &text,
                            &mut session,
                            &server,
                            &handle,
                            &mut joined,
                        )
                        .await;
                    }
                    Ok(Message::Ping(bytes)) => {
                        if session.pong(&bytes).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        break;
                    }
                    Err(_) => {
                        break;
                    }
                    _ => {}
                }
            }
            // Outgoing event from a gig room to this client.
            Some(event) = rx.recv() => {
                let json = match serde_json::to_string(&event) {
                    Ok(j) => j,
                    Err(_) => continue,
                };
                if session.text(json).await.is_err() {
                    break;
                }
            }
            // Both channels closed — exit.
            else => break,
        }
    }

    // Clean up: leave every room this connection subscribed to.
    for gig_id in joined {
        server.leave(gig_id, conn_id).await;
    }
    let _ = session.close(None).await;

    tracing::info!("WebSocket client {conn_id} disconnected");
}

/// Parse and handle an incoming client control message.
async fn handle_client_message(
    text: &str,
    session: &mut actix_ws::Session,
    server: &EventServer,
    handle: &ClientHandle,
    joined: &mut HashSet<Uuid>,
) {
    let msg: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            let err = ServerEvent::Error {
                message: format!("Invalid message format: {e}"),
            };
            let _ = session
                .text(serde_json::to_string(&err).unwrap_or_default())
                .await;
            return;
        }
    };

    match msg {
        ClientMessage::JoinGig { gig_id } => {
            tracing::debug!("Client {} joined gig room {gig_id}", handle.conn_id);
            server.join(gig_id, handle.clone()).await;
            joined.insert(gig_id);
        }
        ClientMessage::LeaveGig { gig_id } => {
            server.leave(gig_id, handle.conn_id).await;
            joined.remove(&gig_id);
        }
    }
}
