//! Partition browsing permission.

use smia_protocol::Partition;

use crate::session::Session;

/// Whether `session` may browse the contents of `partition`.
///
/// Root may browse anything. Otherwise the partition must be mounted and be
/// the one the session is bound to. Always evaluate against a fresh
/// partition snapshot; mount state changes underneath the client.
pub fn has_access(session: &Session, partition: &Partition) -> bool {
	if session.is_root {
		return true;
	}
	if !partition.is_mounted {
		return false;
	}
	partition.id == session.partition_id
}
