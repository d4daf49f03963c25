//! Single-owner client state.

use crate::log::OutputLog;
use crate::session::SessionStore;

/// Last known reachability of the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Connectivity {
	/// No health probe has completed yet.
	#[default]
	Unknown,
	Connected,
	Disconnected,
}

/// Everything the client mutates: session belief, output log, connectivity.
///
/// Operations borrow it mutably for their whole duration, so a script run,
/// a login and a reconciliation can never interleave their writes.
#[derive(Debug, Default)]
pub struct ClientState {
	session: SessionStore,
	log: OutputLog,
	connectivity: Connectivity,
}

impl ClientState {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_log(log: OutputLog) -> Self {
		Self { log, ..Self::default() }
	}

	pub fn session(&self) -> &SessionStore {
		&self.session
	}

	pub fn session_mut(&mut self) -> &mut SessionStore {
		&mut self.session
	}

	pub fn log(&self) -> &OutputLog {
		&self.log
	}

	pub fn log_mut(&mut self) -> &mut OutputLog {
		&mut self.log
	}

	pub fn connectivity(&self) -> Connectivity {
		self.connectivity
	}

	pub fn is_connected(&self) -> bool {
		self.connectivity == Connectivity::Connected
	}

	pub(crate) fn set_connectivity(&mut self, connectivity: Connectivity) {
		self.connectivity = connectivity;
	}

	/// Marks the service reachable without probing it.
	#[cfg(test)]
	pub(crate) fn connected() -> Self {
		let mut state = Self::new();
		state.set_connectivity(Connectivity::Connected);
		state
	}
}
