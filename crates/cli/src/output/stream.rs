use serde::Serialize;
use smia::{EntryStatus, LogEntry, LogEvent};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;

use crate::output::format::OutputFormat;
use crate::output::text::format_entry;

/// Renders log events as they happen, on its own task.
pub struct LogStream {
	handle: JoinHandle<()>,
}

#[derive(Serialize)]
struct EventLine<'a> {
	event: &'static str,
	index: usize,
	entry: &'a LogEntry,
}

impl LogStream {
	/// Starts a renderer for `format`. Returns `None` for formats that print
	/// the whole log once the command is done.
	pub fn spawn(format: OutputFormat) -> Option<(UnboundedSender<LogEvent>, LogStream)> {
		if !format.streams_log() {
			return None;
		}
		let (tx, mut rx) = mpsc::unbounded_channel::<LogEvent>();
		let handle = tokio::spawn(async move {
			while let Some(event) = rx.recv().await {
				if let Some(line) = render_event(&event, format) {
					println!("{line}");
				}
			}
		});
		Some((tx, LogStream { handle }))
	}

	/// Waits until every event sent before the sender was dropped is printed.
	pub async fn finish(self) {
		let _ = self.handle.await;
	}
}

fn render_event(event: &LogEvent, format: OutputFormat) -> Option<String> {
	let (kind, index, entry) = match event {
		LogEvent::Appended { index, entry } => ("appended", *index, entry),
		LogEvent::Committed { index, entry } => ("committed", *index, entry),
	};
	match format {
		// The committed entry repeats the command; print it once.
		OutputFormat::Text if entry.status == EntryStatus::Running => None,
		OutputFormat::Text => Some(format_entry(entry)),
		OutputFormat::Ndjson => serde_json::to_string(&EventLine { event: kind, index, entry }).ok(),
		OutputFormat::Json => None,
	}
}
