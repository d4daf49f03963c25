//! Journal retrieval and repair (`POST /journaling`, `POST /journaling/repair`).

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionRequest {
	pub partition_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalingResponse {
	#[serde(default)]
	pub success: bool,
	#[serde(default, deserialize_with = "null_as_default")]
	pub entries: Vec<RawJournalEntry>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

/// A journal record exactly as stored by the service.
///
/// `timestamp` is a decimal count of seconds since the Unix epoch, sent as a
/// string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawJournalEntry {
	#[serde(default, deserialize_with = "null_as_default")]
	pub operation: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub path: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub content: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub timestamp: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub user: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub permissions: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairResponse {
	#[serde(default)]
	pub success: bool,
	#[serde(default)]
	pub recovered: u64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
