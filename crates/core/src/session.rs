//! The client's belief about who is logged in, and where.

use serde::{Deserialize, Serialize};
use smia_protocol::SessionSnapshot;

/// Authenticated user bound to a partition.
///
/// A logged-out session always has empty `partition_id` and `username` and
/// `is_root == false`; [`SessionStore::set`] enforces this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
	pub partition_id: String,
	pub username: String,
	pub is_logged_in: bool,
	pub is_root: bool,
}

impl Session {
	/// Builds a logged-in session. Root is decided by the caller.
	pub fn logged_in(partition_id: impl Into<String>, username: impl Into<String>, is_root: bool) -> Self {
		Self {
			partition_id: partition_id.into(),
			username: username.into(),
			is_logged_in: true,
			is_root,
		}
	}

	/// Converts the service's snapshot; `None` when it reports no active login.
	pub fn from_snapshot(snapshot: &SessionSnapshot) -> Option<Self> {
		snapshot
			.is_logged_in
			.then(|| Self::logged_in(snapshot.partition_id.clone(), snapshot.username.clone(), snapshot.is_root))
	}

	/// `user@partition`, as shown in log entries.
	pub fn label(&self) -> String {
		format!("{}@{}", self.username, self.partition_id)
	}

	fn normalized(self) -> Self {
		if self.is_logged_in { self } else { Self::default() }
	}
}

/// Holder for the current [`Session`].
///
/// Sessions are replaced wholesale; there is no field-level setter.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
	current: Session,
}

impl SessionStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self) -> &Session {
		&self.current
	}

	pub fn set(&mut self, session: Session) {
		self.current = session.normalized();
	}

	pub fn clear(&mut self) {
		self.current = Session::default();
	}

	pub fn is_logged_in(&self) -> bool {
		self.current.is_logged_in
	}
}
