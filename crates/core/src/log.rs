//! Append-only output log.
//!
//! Every user-visible event (connection changes, session changes, script
//! commands and their results) becomes a [`LogEntry`]. Entries are only ever
//! appended, with one exception: a provisional `running` entry opened by
//! [`OutputLog::begin`] is replaced in place by [`OutputLog::commit`]. The
//! [`EntryHandle`] addresses that entry by index, so the commit lands on the
//! right slot even if other entries were appended in between.

use serde::Serialize;
use tokio::sync::mpsc::UnboundedSender;

/// Entry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
	/// Command dispatched, result not yet received.
	Running,
	Success,
	Error,
	Info,
	Warning,
}

impl EntryStatus {
	/// Warnings are surfaced as errors by the display layer.
	pub fn is_error(self) -> bool {
		matches!(self, EntryStatus::Error | EntryStatus::Warning)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
	/// Empty for entries not tied to a command.
	pub command: String,
	pub output: String,
	/// Local wall-clock time, `HH:MM:SS`.
	pub timestamp: String,
	pub is_error: bool,
	pub status: EntryStatus,
}

impl LogEntry {
	fn new(command: impl Into<String>, output: impl Into<String>, status: EntryStatus) -> Self {
		Self {
			command: command.into(),
			output: output.into(),
			timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
			is_error: status.is_error(),
			status,
		}
	}
}

/// Terminal result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
	Success(String),
	Failure(String),
}

/// Change notification for a streaming display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
	Appended { index: usize, entry: LogEntry },
	Committed { index: usize, entry: LogEntry },
}

/// Handle to a provisional entry. Consumed by [`OutputLog::commit`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a provisional entry must be committed"]
pub struct EntryHandle(usize);

pub const RUNNING_TEXT: &str = "Running...";

#[derive(Debug, Default)]
pub struct OutputLog {
	entries: Vec<LogEntry>,
	sink: Option<UnboundedSender<LogEvent>>,
}

impl OutputLog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Log that also forwards every change to `sink`.
	pub fn with_sink(sink: UnboundedSender<LogEvent>) -> Self {
		Self {
			entries: Vec::new(),
			sink: Some(sink),
		}
	}

	pub fn entries(&self) -> &[LogEntry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn last(&self) -> Option<&LogEntry> {
		self.entries.last()
	}

	pub fn info(&mut self, command: impl Into<String>, output: impl Into<String>) {
		self.push(LogEntry::new(command, output, EntryStatus::Info));
	}

	pub fn success(&mut self, command: impl Into<String>, output: impl Into<String>) {
		self.push(LogEntry::new(command, output, EntryStatus::Success));
	}

	pub fn warning(&mut self, command: impl Into<String>, output: impl Into<String>) {
		self.push(LogEntry::new(command, output, EntryStatus::Warning));
	}

	pub fn error(&mut self, command: impl Into<String>, output: impl Into<String>) {
		self.push(LogEntry::new(command, output, EntryStatus::Error));
	}

	/// Opens a provisional `running` entry for `command`.
	pub fn begin(&mut self, command: impl Into<String>) -> EntryHandle {
		let index = self.push(LogEntry::new(command, RUNNING_TEXT, EntryStatus::Running));
		EntryHandle(index)
	}

	/// Replaces the provisional entry behind `handle` with its result.
	pub fn commit(&mut self, handle: EntryHandle, outcome: CommandOutcome) {
		let index = handle.0;
		let Some(slot) = self.entries.get_mut(index) else {
			return;
		};
		debug_assert_eq!(slot.status, EntryStatus::Running, "entry {index} committed twice");

		let (status, output) = match outcome {
			CommandOutcome::Success(output) => (EntryStatus::Success, output),
			CommandOutcome::Failure(output) => (EntryStatus::Error, output),
		};
		let entry = LogEntry::new(std::mem::take(&mut slot.command), output, status);
		*slot = entry.clone();
		self.notify(LogEvent::Committed { index, entry });
	}

	/// Number of entries still waiting for a result.
	pub fn running_count(&self) -> usize {
		self.entries.iter().filter(|e| e.status == EntryStatus::Running).count()
	}

	fn push(&mut self, entry: LogEntry) -> usize {
		let index = self.entries.len();
		self.entries.push(entry.clone());
		self.notify(LogEvent::Appended { index, entry });
		index
	}

	fn notify(&mut self, event: LogEvent) {
		let delivered = match &self.sink {
			Some(sink) => sink.send(event).is_ok(),
			None => return,
		};
		if !delivered {
			// Receiver gone; stop forwarding.
			self.sink = None;
		}
	}
}
