//! Connectivity establishment.

use tracing::{info, warn};

use crate::reconcile::reconcile;
use crate::service::{FsService, TransportError};
use crate::state::{ClientState, Connectivity};

/// Facade for connect/reconnect flows over one service.
pub struct Connector<'a, S: ?Sized> {
	service: &'a S,
}

impl<'a, S> Connector<'a, S>
where
	S: FsService + ?Sized,
{
	pub fn new(service: &'a S) -> Self {
		Self { service }
	}

	/// Probes `/health` and, when reachable, reconciles the session.
	///
	/// Returns the resulting connectivity.
	pub async fn connect(&self, state: &mut ClientState) -> Connectivity {
		match self.service.health().await {
			Ok(()) => {
				info!(target = "smia.connect", "backend reachable");
				state.set_connectivity(Connectivity::Connected);
				state.log_mut().info("", "Connected to backend");
				reconcile(self.service, state).await;
			}
			Err(err @ TransportError::Status { .. }) => {
				warn!(target = "smia.connect", error = %err, "backend health check failed");
				state.set_connectivity(Connectivity::Disconnected);
				state.log_mut().error("", "Backend connection error");
			}
			Err(err) => {
				warn!(target = "smia.connect", error = %err, "backend unreachable");
				state.set_connectivity(Connectivity::Disconnected);
				state.log_mut().error("", "Backend unavailable. Make sure it is running.");
			}
		}
		state.connectivity()
	}

	/// Same as [`Connector::connect`], announcing the retry first.
	pub async fn reconnect(&self, state: &mut ClientState) -> Connectivity {
		state.log_mut().info("", "Trying to reconnect...");
		self.connect(state).await
	}
}
