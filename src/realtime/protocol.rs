use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Client -> Server messages ──

/// Control messages the client sends over the socket.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Subscribe to a gig's bidding events.
    #[serde(rename = "joinGig")]
    JoinGig { gig_id: Uuid },
    /// Unsubscribe from a gig's bidding events.
    #[serde(rename = "leaveGig")]
    LeaveGig { gig_id: Uuid },
}

// ── Server -> Client messages ──

/// Events the server pushes to subscribed clients. Events carry no
/// payload; receivers re-fetch the bid list over the REST surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// A bid was placed on the gig.
    #[serde(rename = "newBid")]
    NewBid,
    /// A bid on the gig was hired; bidding is closed.
    #[serde(rename = "bidHired")]
    BidHired,
    /// An error occurred.
    #[serde(rename = "error")]
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_gig_message_parses() {
        let gig_id = Uuid::new_v4();
        let raw = format!(r#"{{"type":"joinGig","gig_id":"{gig_id}"}}"#);

        let msg: ClientMessage = serde_json::from_str(&raw).unwrap();
        assert_eq!(msg, ClientMessage::JoinGig { gig_id });
    }

    #[test]
    fn test_unknown_control_message_is_rejected() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"subscribe"}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>("not json at all").is_err());
    }

    #[test]
    fn test_server_events_serialize_to_tagged_frames() {
        assert_eq!(
            serde_json::to_value(ServerEvent::NewBid).unwrap(),
            json!({ "type": "newBid" })
        );
        assert_eq!(
            serde_json::to_value(ServerEvent::BidHired).unwrap(),
            json!({ "type": "bidHired" })
        );

        let err = serde_json::to_value(ServerEvent::Error {
            message: "bad frame".to_string(),
        })
        .unwrap();
        assert_eq!(err["type"], "error");
        assert_eq!(err["message"], "bad frame");
    }
}
