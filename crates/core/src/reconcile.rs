//! Session reconciliation against the service's authoritative session.

use tracing::{debug, info};

use crate::service::FsService;
use crate::session::Session;
use crate::state::ClientState;

/// Overwrites the local session with the service's view when it reports an
/// active login.
///
/// Best-effort: a transport failure, an empty or malformed answer, or a
/// logged-out answer leaves the local session exactly as it was. Returns
/// whether the local session was overwritten.
pub async fn reconcile<S>(service: &S, state: &mut ClientState) -> bool
where
	S: FsService + ?Sized,
{
	let envelope = match service.session().await {
		Ok(envelope) => envelope,
		Err(err) => {
			debug!(target = "smia.session", error = %err, "session snapshot unavailable; keeping local session");
			return false;
		}
	};

	let Some(session) = envelope.session.as_ref().and_then(Session::from_snapshot) else {
		debug!(target = "smia.session", "service reports no active login; keeping local session");
		return false;
	};

	info!(target = "smia.session", user = %session.username, partition = %session.partition_id, root = session.is_root, "session reconciled");
	state.log_mut().info("", format!("Session synchronized: {}", session.label()));
	state.session_mut().set(session);
	true
}
