//! Login and logout through the service's command interpreter.
//!
//! Together with [`crate::reconcile`] these are the only writers of the
//! [`SessionStore`](crate::session::SessionStore).

use tracing::{info, warn};

use crate::error::{Result, SmiaError};
use crate::service::FsService;
use crate::session::Session;
use crate::state::ClientState;

/// Username that is granted root privileges.
pub const ROOT_USER: &str = "root";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
	pub user: String,
	pub password: String,
	pub partition_id: String,
}

impl Credentials {
	/// The synthesized `login` command line.
	pub fn command(&self) -> String {
		format!("login -user={} -pass={} -id={}", self.user, self.password, self.partition_id)
	}
}

pub fn is_root_user(user: &str) -> bool {
	user.eq_ignore_ascii_case(ROOT_USER)
}

/// Logs in and replaces the local session on success.
pub async fn login<S>(service: &S, state: &mut ClientState, credentials: &Credentials) -> Result<Session>
where
	S: FsService + ?Sized,
{
	if credentials.user.is_empty() || credentials.password.is_empty() {
		return Err(SmiaError::InvalidInput("user and password are required".into()));
	}
	if !state.is_connected() {
		return Err(SmiaError::NotConnected);
	}

	let response = service.execute(&credentials.command()).await?;
	if !response.success {
		let message = response.error_text().unwrap_or("Invalid credentials").to_string();
		warn!(target = "smia.session", user = %credentials.user, partition = %credentials.partition_id, "login rejected");
		return Err(SmiaError::Auth(message));
	}

	let session = Session::logged_in(credentials.partition_id.clone(), credentials.user.clone(), is_root_user(&credentials.user));
	info!(target = "smia.session", user = %session.username, partition = %session.partition_id, "logged in");
	state.log_mut().success("", format!("Session started: {}", session.label()));
	state.session_mut().set(session.clone());
	Ok(session)
}

/// Logs out. Returns `false` without contacting the service when nobody is
/// logged in.
///
/// Any 2xx answer clears the local session. A transport failure keeps it and
/// is recorded in the log as well as returned.
pub async fn logout<S>(service: &S, state: &mut ClientState) -> Result<bool>
where
	S: FsService + ?Sized,
{
	if !state.session().is_logged_in() {
		return Ok(false);
	}

	match service.execute("logout").await {
		Ok(_) => {
			info!(target = "smia.session", user = %state.session().get().username, "logged out");
			state.session_mut().clear();
			state.log_mut().success("logout", "Session closed");
			Ok(true)
		}
		Err(err) => {
			state.log_mut().error("logout", "Error closing session");
			Err(err.into())
		}
	}
}

/// Session implied by a successful `login` script line, when the line names
/// both the user and the partition.
pub(crate) fn session_from_login_line(line: &str) -> Option<Session> {
	let mut user = None;
	let mut partition = None;
	for token in line.split_whitespace().skip(1) {
		let Some((flag, value)) = token.split_once('=') else {
			continue;
		};
		let value = value.trim_matches('"');
		match flag.to_ascii_lowercase().as_str() {
			"-user" => user = Some(value),
			"-id" => partition = Some(value),
			_ => {}
		}
	}
	match (user, partition) {
		(Some(user), Some(partition)) if !user.is_empty() && !partition.is_empty() => Some(Session::logged_in(partition, user, is_root_user(user))),
		_ => None,
	}
}
