use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bookable treatment and its daily slot labels, in display order.
///
/// Columns other than `id`, `name` and `slots` are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub slots: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `{id, name}` projection served by `GET /service`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSummary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

/// The part of a booking that occupies a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub treatment: String,
    pub slot: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<String>,
}
