use super::event_type::EventType;
use serde::Serialize;

/// One attendance event proposed by the extraction service.
/// Transient: either discarded or consumed into a single store mutation.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCandidate {
    pub raw_name: String,
    #[serde(rename = "matchedSewadarId")]
    pub matched_sewadar_id: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub time: String,
    pub counter: Option<String>,
    pub confidence: f64,
}

impl ParsedCandidate {
    pub fn is_matched(&self) -> bool {
        self.matched_sewadar_id.is_some()
    }
}

/// An entry of the extraction response that failed schema validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    pub index: usize,
    pub reason: String,
}
