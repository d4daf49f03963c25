//! Disk and partition snapshots from `GET /disks` and `GET /disks/mounted`.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisksResponse {
	#[serde(default, deserialize_with = "null_as_default")]
	pub disks: Vec<Disk>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub count: Option<usize>,
}

/// A disk image known to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disk {
	pub path: String,
	#[serde(default)]
	pub size: u64,
	#[serde(default, deserialize_with = "null_as_default")]
	pub unit: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub fit: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub partitions: Vec<Partition>,
}

/// A partition on a disk. Identity is [`Partition::id`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition {
	#[serde(default, deserialize_with = "null_as_default")]
	pub name: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub id: String,
	/// Size in bytes.
	#[serde(default)]
	pub size: u64,
	#[serde(rename = "type", default, deserialize_with = "null_as_default")]
	pub kind: String,
	#[serde(default)]
	pub is_mounted: bool,
	#[serde(default, deserialize_with = "null_as_default")]
	pub status: String,
}
