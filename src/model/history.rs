//! Live event records emitted by the tick loop.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "event")]
pub enum LiveEvent {
    Birth {
        id: Uuid,
        parent_id: Option<Uuid>,
        tick: u64,
        timestamp: String,
    },
    Flash {
        id: Uuid,
        tick: u64,
        timestamp: String,
    },
    Removal {
        id: Uuid,
        tick: u64,
        timestamp: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_serialize_with_tag() {
        let event = LiveEvent::Birth {
            id: Uuid::nil(),
            parent_id: None,
            tick: 3,
            timestamp: timestamp(),
        };
        let json = serde_json::to_string(&event).expect("serializable");
        assert!(json.contains("\"event\":\"Birth\""));
        assert!(json.contains("\"tick\":3"));
    }
}
