use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;
use serde::Serialize;
use smia::runner::RejectReason;
use smia::script::load_script;
use smia::{ClientState, LogEntry, OutputLog, RunOutcome, RunSummary, ScriptRunner};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::CommandContext;
use crate::output::{ErrorCode, LogStream, ResultBuilder, TextView, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RunReport {
	script: String,
	status: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	blocked_by: Option<String>,
	summary: RunSummary,
	/// Populated only when the log was not streamed.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	entries: Vec<LogEntry>,
}

impl TextView for RunReport {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		let s = &self.summary;
		let mut counts = vec![format!("{} succeeded", s.succeeded).green().to_string()];
		if s.failed > 0 {
			counts.push(format!("{} failed", s.failed).red().to_string());
		}
		if s.skipped > 0 {
			counts.push(format!("{} skipped", s.skipped));
		}
		match self.status {
			"completed" => writeln!(out, "{} {}", "Done:".bold(), counts.join(", ")),
			"cancelled" => {
				counts.push(format!("{} not executed", s.remaining).yellow().to_string());
				writeln!(out, "{} {}", "Cancelled:".bold(), counts.join(", "))
			}
			_ => Ok(()),
		}
	}
}

/// Failure code and message for a run that was not clean.
fn failure(outcome: &RunOutcome) -> Option<(ErrorCode, String)> {
	match outcome {
		RunOutcome::Rejected(RejectReason::EmptyScript) => Some((ErrorCode::InvalidInput, "No commands to execute".into())),
		RunOutcome::Rejected(RejectReason::NotConnected) => {
			Some((ErrorCode::BackendUnavailable, "No connection to the backend. Check that it is running.".into()))
		}
		RunOutcome::AuthRequired { command } => Some((ErrorCode::AuthError, format!("Log in first; `{command}` requires a session"))),
		RunOutcome::Completed(summary) if summary.failed > 0 => Some((ErrorCode::ScriptFailed, format!("{} command(s) failed", summary.failed))),
		RunOutcome::Completed(_) => None,
		RunOutcome::Cancelled(summary) => Some((ErrorCode::ScriptFailed, format!("Execution cancelled; {} command(s) not executed", summary.remaining))),
	}
}

fn status(outcome: &RunOutcome) -> &'static str {
	match outcome {
		RunOutcome::Rejected(_) => "rejected",
		RunOutcome::AuthRequired { .. } => "authRequired",
		RunOutcome::Completed(_) => "completed",
		RunOutcome::Cancelled(_) => "cancelled",
	}
}

/// Cancels `token` on the first interrupt and reports whether a second one
/// arrived.
async fn relay_interrupts<F, Fut>(token: CancellationToken, mut interrupt: F) -> bool
where
	F: FnMut() -> Fut,
	Fut: Future<Output = bool>,
{
	if !interrupt().await {
		return false;
	}
	info!(target = "smia.runner", "interrupt received; cancelling");
	token.cancel();
	let second = interrupt().await;
	if second {
		warn!(target = "smia.runner", "second interrupt; aborting");
	}
	second
}

/// Cancels `token` on Ctrl-C and exits with 130 on a second Ctrl-C, until the
/// returned task is aborted.
fn cancel_on_ctrl_c(token: CancellationToken) -> tokio::task::JoinHandle<()> {
	tokio::spawn(async move {
		if relay_interrupts(token, || async { tokio::signal::ctrl_c().await.is_ok() }).await {
			std::process::exit(130);
		}
	})
}

pub async fn execute(ctx: &CommandContext, file: &Path) -> smia::Result<bool> {
	let text = load_script(file)?;

	let (log, stream) = match LogStream::spawn(ctx.format) {
		Some((sink, stream)) => (OutputLog::with_sink(sink), Some(stream)),
		None => (OutputLog::new(), None),
	};
	let mut state = ClientState::with_log(log);
	ctx.establish(&mut state).await;

	let cancel = CancellationToken::new();
	let watcher = cancel_on_ctrl_c(cancel.clone());
	let outcome = ScriptRunner::new(ctx.service())
		.with_throttle(ctx.settings.throttle)
		.with_cancellation(cancel)
		.execute(&mut state, &text)
		.await;
	watcher.abort();

	let entries = if stream.is_some() { Vec::new() } else { state.log().entries().to_vec() };
	// Closes the sink so the renderer drains and exits.
	drop(state);
	if let Some(stream) = stream {
		stream.finish().await;
	}

	let summary = match &outcome {
		RunOutcome::Completed(summary) | RunOutcome::Cancelled(summary) => *summary,
		_ => RunSummary::default(),
	};
	let report = RunReport {
		script: file.display().to_string(),
		status: status(&outcome),
		blocked_by: match &outcome {
			RunOutcome::AuthRequired { command } => Some(command.clone()),
			_ => None,
		},
		summary,
		entries,
	};

	let mut builder = ResultBuilder::new("run").data(report);
	if let Some((code, message)) = failure(&outcome) {
		builder = builder.error(code, message);
	}
	print_result(&builder.build(), ctx.format);
	Ok(outcome.is_clean())
}
