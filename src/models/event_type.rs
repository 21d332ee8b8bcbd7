use serde::{Deserialize, Serialize};

/// Direction of a chat-log attendance message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    In,
    Out,
}

impl EventType {
    /// Parse the wire label (`IN` / `OUT`), case-insensitive.
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "IN" => Some(Self::In),
            "OUT" => Some(Self::Out),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            EventType::In => "IN",
            EventType::Out => "OUT",
        }
    }
}
