use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use crate::lifecycle::{GigEvent, Notifier};
use crate::realtime::protocol::ServerEvent;

/// A handle to push events to one connected WebSocket client.
#[derive(Debug, Clone)]
pub struct ClientHandle {
    pub conn_id: Uuid,
    pub sender: mpsc::UnboundedSender<ServerEvent>,
}

/// Manages all active WebSocket connections, organized by gig id (room).
///
/// Each gig maps to the handles of clients currently watching it. A
/// single connection may subscribe to several gigs; it appears once in
/// each of those rooms.
pub struct EventServer {
    /// gig_id -> handles of clients subscribed to that gig
    rooms: RwLock<HashMap<Uuid, Vec<ClientHandle>>>,
}

impl EventServer {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe a connection to a gig room. Joining a room the
    /// connection is already in is a no-op.
    pub async fn join(&self, gig_id: Uuid, handle: ClientHandle) {
        let mut rooms = self.rooms.write().await;
        let room = rooms.entry(gig_id).or_insert_with(Vec::new);

        if room.iter().any(|c| c.conn_id == handle.conn_id) {
            return;
        }

        room.push(handle);
    }

    /// Drop a connection's subscription to a gig room.
    pub async fn leave(&self, gig_id: Uuid, conn_id: Uuid) {
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms.get_mut(&gig_id) {
            room.retain(|c| c.conn_id != conn_id);

            // Clean up empty rooms.
            if room.is_empty() {
                rooms.remove(&gig_id);
            }
        }
    }

    /// Push an event to every subscriber of a gig room.
    pub async fn broadcast(&self, gig_id: Uuid, event: ServerEvent) {
        let rooms = self.rooms.read().await;
        if let Some(room) = rooms.get(&gig_id) {
            for client in room {
                // If the send fails, the receiver has been dropped
                // (disconnected); session cleanup removes the handle.
                let _ = client.sender.send(event.clone());
            }
        }
    }
}

impl Default for EventServer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for EventServer {
    async fn publish(&self, room: Uuid, event: GigEvent) {
        let event = match event {
            GigEvent::NewBid => ServerEvent::NewBid,
            GigEvent::BidHired => ServerEvent::BidHired,
        };

        self.broadcast(room, event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A subscriber handle plus the receiving end of its channel.
    fn watcher() -> (ClientHandle, mpsc::UnboundedReceiver<ServerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = ClientHandle {
            conn_id: Uuid::new_v4(),
            sender: tx,
        };
        (handle, rx)
    }

    #[tokio::test]
    async fn test_publish_reaches_only_the_target_room() {
        let server = EventServer::new();
        let gig_a = Uuid::new_v4();
        let gig_b = Uuid::new_v4();

        let (handle_a, mut rx_a) = watcher();
        let (handle_b, mut rx_b) = watcher();
        server.join(gig_a, handle_a).await;
        server.join(gig_b, handle_b).await;

        server.publish(gig_a, GigEvent::NewBid).await;

        assert_eq!(rx_a.try_recv().ok(), Some(ServerEvent::NewBid));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_leave_stops_delivery() {
        let server = EventServer::new();
        let gig_id = Uuid::new_v4();

        let (handle, mut rx) = watcher();
        let conn_id = handle.conn_id;
        server.join(gig_id, handle).await;

        server.publish(gig_id, GigEvent::BidHired).await;
        assert_eq!(rx.try_recv().ok(), Some(ServerEvent::BidHired));

        server.leave(gig_id, conn_id).await;

        server.publish(gig_id, GigEvent::BidHired).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_double_join_delivers_one_event() {
        let server = EventServer::new();
        let gig_id = Uuid::new_v4();

        let (handle, mut rx) = watcher();
        server.join(gig_id, handle.clone()).await;
        server.join(gig_id, handle).await;

        server.publish(gig_id, GigEvent::NewBid).await;

        assert_eq!(rx.try_recv().ok(), Some(ServerEvent::NewBid));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_leaving_last_subscriber_removes_the_room() {
        let server = EventServer::new();
        let gig_id = Uuid::new_v4();

        let (handle, _rx) = watcher();
        let conn_id = handle.conn_id;
        server.join(gig_id, handle).await;
        assert_eq!(server.rooms.read().await.len(), 1);

        server.leave(gig_id, conn_id).await;
        assert!(server.rooms.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_stop_delivery() {
        let server = EventServer::new();
        let gig_id = Uuid::new_v4();

        let (gone, gone_rx) = watcher();
        let (live, mut live_rx) = watcher();
        server.join(gig_id, gone).await;
        server.join(gig_id, live).await;

        // One client disconnected without leaving; the other still hears.
        drop(gone_rx);
        server.publish(gig_id, GigEvent::NewBid).await;

        assert_eq!(live_rx.try_recv().ok(), Some(ServerEvent::NewBid));
    }
}
