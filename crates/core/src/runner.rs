//! Ordered, gated execution of command scripts.
//!
//! A run moves through `Idle → Gating → (Blocked | Executing) → Idle`:
//!
//! 1. Gating rejects empty scripts and disconnected clients, then pre-scans
//!    the whole queue. If any command needs a session and nobody is logged
//!    in, nothing is sent.
//! 2. Executing sends the commands one at a time, in script order. Each one
//!    opens a provisional `running` log entry that is committed in place
//!    with the result. A failing command is logged and the queue continues.
//! 3. Between commands the runner waits a fixed throttle interval.
//!
//! Returning from [`ScriptRunner::execute`] is the idle signal.

use std::time::Duration;

use serde::Serialize;
use smia_protocol::ExecuteResponse;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::auth::session_from_login_line;
use crate::classifier;
use crate::log::CommandOutcome;
use crate::reconcile::reconcile;
use crate::script::Script;
use crate::service::{FsService, ServiceResult, TransportError};
use crate::state::ClientState;

/// Pause between consecutive requests.
pub const DEFAULT_THROTTLE: Duration = Duration::from_millis(300);

const SUCCESS_TEXT: &str = "Command executed successfully";
const UNKNOWN_ERROR_TEXT: &str = "Unknown error";

/// Why a script was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
	EmptyScript,
	NotConnected,
}

/// Per-run counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
	pub succeeded: usize,
	pub failed: usize,
	/// `login` lines skipped because a session was already active.
	pub skipped: usize,
	/// Commands never dispatched because the run was cancelled.
	pub remaining: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
	Rejected(RejectReason),
	/// Login needed; `command` is the first command that requires it.
	AuthRequired { command: String },
	Completed(RunSummary),
	Cancelled(RunSummary),
}

impl RunOutcome {
	/// Whether every command ran and none failed.
	pub fn is_clean(&self) -> bool {
		matches!(self, RunOutcome::Completed(summary) if summary.failed == 0)
	}
}

/// Executes scripts against one service.
pub struct ScriptRunner<'a, S: ?Sized> {
	service: &'a S,
	throttle: Duration,
	cancel: CancellationToken,
}

impl<'a, S> ScriptRunner<'a, S>
where
	S: FsService + ?Sized,
{
	pub fn new(service: &'a S) -> Self {
		Self {
			service,
			throttle: DEFAULT_THROTTLE,
			cancel: CancellationToken::new(),
		}
	}

	pub fn with_throttle(mut self, throttle: Duration) -> Self {
		self.throttle = throttle;
		self
	}

	/// Token checked before each command and during the throttle pause. An
	/// in-flight request is always allowed to finish.
	pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
		self.cancel = cancel;
		self
	}

	pub async fn execute(&self, state: &mut ClientState, script_text: &str) -> RunOutcome {
		let script = Script::parse(script_text);

		if script.is_empty() {
			state.log_mut().error("", "No commands to execute");
			return RunOutcome::Rejected(RejectReason::EmptyScript);
		}
		if !state.is_connected() {
			state.log_mut().error("", "No connection to the backend. Check that it is running.");
			return RunOutcome::Rejected(RejectReason::NotConnected);
		}

		// Decided once for the whole run.
		if !state.session().is_logged_in() {
			if let Some(command) = script.first_protected() {
				warn!(target = "smia.runner", %command, "script requires an authenticated session");
				state.log_mut().warning("", "Some commands require authentication. Please log in.");
				return RunOutcome::AuthRequired {
					command: command.to_string(),
				};
			}
		}

		info!(target = "smia.runner", commands = script.len(), "executing script");
		let mut summary = RunSummary::default();
		let commands = script.commands();

		for (position, command) in commands.iter().enumerate() {
			if self.cancel.is_cancelled() {
				return self.cancelled(state, summary, commands.len() - position);
			}

			if classifier::is_login(command) && state.session().is_logged_in() {
				debug!(target = "smia.runner", %command, "session already active; login skipped");
				state.log_mut().info(command.as_str(), "A session is already active");
				summary.skipped += 1;
				continue;
			}

			if self.dispatch(state, command).await {
				summary.succeeded += 1;
			} else {
				summary.failed += 1;
			}

			let is_last = position + 1 == commands.len();
			if !is_last && !self.throttle.is_zero() {
				tokio::select! {
					_ = self.cancel.cancelled() => {}
					_ = tokio::time::sleep(self.throttle) => {}
				}
			}
		}

		info!(target = "smia.runner", succeeded = summary.succeeded, failed = summary.failed, skipped = summary.skipped, "script finished");
		RunOutcome::Completed(summary)
	}

	/// Sends one command and commits its log entry. Returns whether it succeeded.
	async fn dispatch(&self, state: &mut ClientState, command: &str) -> bool {
		let handle = state.log_mut().begin(command);
		let response = self.service.execute(command).await;
		let outcome = command_outcome(&response);
		let succeeded = matches!(outcome, CommandOutcome::Success(_));

		match &outcome {
			CommandOutcome::Success(_) => debug!(target = "smia.runner", %command, "command succeeded"),
			CommandOutcome::Failure(message) => warn!(target = "smia.runner", %command, error = %message, "command failed"),
		}
		state.log_mut().commit(handle, outcome);

		if succeeded {
			self.track_session_change(state, command).await;
		}
		succeeded
	}

	async fn track_session_change(&self, state: &mut ClientState, command: &str) {
		if classifier::is_login(command) {
			match session_from_login_line(command) {
				Some(session) => state.session_mut().set(session),
				None => {
					reconcile(self.service, state).await;
				}
			}
		} else if classifier::is_logout(command) {
			state.session_mut().clear();
		}
	}

	fn cancelled(&self, state: &mut ClientState, mut summary: RunSummary, remaining: usize) -> RunOutcome {
		warn!(target = "smia.runner", remaining, "script cancelled");
		state.log_mut().warning("", format!("Execution cancelled; {remaining} command(s) not executed"));
		summary.remaining = remaining;
		RunOutcome::Cancelled(summary)
	}
}

fn command_outcome(response: &ServiceResult<ExecuteResponse>) -> CommandOutcome {
	match response {
		Ok(resp) if resp.success => CommandOutcome::Success(resp.output_text().unwrap_or(SUCCESS_TEXT).to_string()),
		Ok(resp) => CommandOutcome::Failure(resp.error_text().unwrap_or(UNKNOWN_ERROR_TEXT).to_string()),
		// Script entries show the status line even when the body carried a message.
		Err(err @ TransportError::Status { .. }) => CommandOutcome::Failure(err.to_string()),
		Err(err) => CommandOutcome::Failure(err.user_message()),
	}
}
