//! `GET /session` snapshot.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;

/// Envelope returned by `GET /session`.
///
/// The service may omit `session` entirely or send an empty object when no
/// user is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEnvelope {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub success: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub session: Option<SessionSnapshot>,
}

/// The service's authoritative view of the logged-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
	#[serde(default, deserialize_with = "null_as_default")]
	pub partition_id: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub username: String,
	#[serde(default)]
	pub is_logged_in: bool,
	#[serde(default)]
	pub is_root: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub group: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub uid: Option<i64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub gid: Option<i64>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn logged_out_snapshot_has_only_flag() {
		let env: SessionEnvelope = serde_json::from_str(r#"{"success":true,"session":{"isLoggedIn":false}}"#).unwrap();
		let session = env.session.unwrap();
		assert!(!session.is_logged_in);
		assert!(session.username.is_empty());
		assert!(session.partition_id.is_empty());
	}

	#[test]
	fn active_snapshot_with_extra_fields() {
		let env: SessionEnvelope = serde_json::from_str(
			r#"{"success":true,"session":{"isLoggedIn":true,"username":"root","group":"root","partitionId":"341A","uid":1,"gid":1,"isRoot":true}}"#,
		)
		.unwrap();
		let session = env.session.unwrap();
		assert!(session.is_logged_in);
		assert!(session.is_root);
		assert_eq!(session.partition_id, "341A");
		assert_eq!(session.uid, Some(1));
	}

	#[test]
	fn empty_object_has_no_session() {
		let env: SessionEnvelope = serde_json::from_str("{}").unwrap();
		assert!(env.session.is_none());
	}
}
