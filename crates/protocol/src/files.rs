//! Directory listing and file reads (`POST /files`, `POST /file/read`).

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Request body shared by `/files` and `/file/read`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRequest {
	pub partition_id: String,
	pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesResponse {
	/// Older service builds omit the flag on success.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub success: Option<bool>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub files: Vec<FileNode>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
	#[default]
	File,
	Folder,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
	pub name: String,
	#[serde(rename = "type", default)]
	pub kind: FileKind,
	#[serde(default)]
	pub size: u64,
	#[serde(default, deserialize_with = "null_as_default")]
	pub permissions: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub owner: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub group: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFileResponse {
	#[serde(default)]
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub content: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}
