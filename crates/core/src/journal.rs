//! Display-ready journal entries.

use chrono::{Local, TimeZone};
use serde::Serialize;
use smia_protocol::RawJournalEntry;
use tracing::warn;

/// Shown in place of empty entry content.
pub const EMPTY_CONTENT: &str = "(sin contenido)";

/// `es-ES` numeric date-time layout.
const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// A journal record with a human-readable timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
	pub operation: String,
	pub path: String,
	pub content: String,
	pub timestamp: String,
	pub user: String,
	pub permissions: String,
}

impl JournalEntry {
	pub fn kind(&self) -> OperationKind {
		OperationKind::classify(&self.operation)
	}
}

/// Normalizes entries using the local time zone.
pub fn normalize(raw: Vec<RawJournalEntry>) -> Vec<JournalEntry> {
	normalize_in(raw, &Local)
}

/// Normalizes entries, rendering timestamps in `tz`.
///
/// A timestamp that is not an integer number of epoch seconds (or is out of
/// range) is passed through unchanged rather than dropping the entry.
pub fn normalize_in<Tz>(raw: Vec<RawJournalEntry>, tz: &Tz) -> Vec<JournalEntry>
where
	Tz: TimeZone,
	Tz::Offset: std::fmt::Display,
{
	raw.into_iter()
		.map(|entry| JournalEntry {
			timestamp: format_timestamp(&entry.timestamp, tz),
			content: if entry.content.is_empty() { EMPTY_CONTENT.to_string() } else { entry.content },
			operation: entry.operation,
			path: entry.path,
			user: entry.user,
			permissions: entry.permissions,
		})
		.collect()
}

fn format_timestamp<Tz>(raw: &str, tz: &Tz) -> String
where
	Tz: TimeZone,
	Tz::Offset: std::fmt::Display,
{
	let parsed = raw.trim().parse::<i64>().ok().and_then(|secs| tz.timestamp_opt(secs, 0).single());
	match parsed {
		Some(at) => at.format(DISPLAY_FORMAT).to_string(),
		None => {
			warn!(target = "smia.journal", timestamp = raw, "unparseable journal timestamp; kept as-is");
			raw.to_string()
		}
	}
}

/// Entries whose operation or path contains `query`, ignoring case.
pub fn filter<'a>(entries: &'a [JournalEntry], query: &str) -> Vec<&'a JournalEntry> {
	let query = query.to_lowercase();
	entries
		.iter()
		.filter(|entry| query.is_empty() || entry.operation.to_lowercase().contains(&query) || entry.path.to_lowercase().contains(&query))
		.collect()
}

/// Coarse category of a journal operation, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
	Create,
	Delete,
	Edit,
	Rename,
	Move,
	Copy,
	Other,
}

impl OperationKind {
	const KEYWORDS: &'static [(OperationKind, &'static [&'static str])] = &[
		(OperationKind::Create, &["crear", "create", "mkfile", "mkdir"]),
		(OperationKind::Delete, &["eliminar", "delete", "remove"]),
		(OperationKind::Edit, &["modificar", "edit"]),
		(OperationKind::Rename, &["renombrar", "rename"]),
		(OperationKind::Move, &["mover", "move"]),
		(OperationKind::Copy, &["copiar", "copy"]),
	];

	pub fn classify(operation: &str) -> Self {
		let op = operation.to_lowercase();
		Self::KEYWORDS
			.iter()
			.find(|(_, words)| words.iter().any(|w| op.contains(w)))
			.map_or(OperationKind::Other, |(kind, _)| *kind)
	}
}
