use std::io::{self, Write};

use colored::{ColoredString, Colorize};
use serde::Serialize;
use smia::browse;
use smia::journal::{self, JournalEntry, OperationKind};

use super::CommandContext;
use crate::output::{ResultBuilder, TextView, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JournalView {
	partition_id: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	filter: Option<String>,
	total: usize,
	entries: Vec<JournalEntry>,
}

fn paint_operation(entry: &JournalEntry) -> ColoredString {
	let op = entry.operation.as_str();
	match entry.kind() {
		OperationKind::Create => op.green(),
		OperationKind::Delete => op.red(),
		OperationKind::Edit => op.yellow(),
		OperationKind::Rename | OperationKind::Move => op.blue(),
		OperationKind::Copy => op.magenta(),
		OperationKind::Other => op.normal(),
	}
}

impl TextView for JournalView {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		if self.entries.is_empty() {
			return writeln!(out, "No journal entries");
		}
		for e in &self.entries {
			writeln!(out, "{}  {:<10} {}", e.timestamp.dimmed(), paint_operation(e), e.path.bold())?;
			writeln!(out, "    {} {}  {}", e.user, e.permissions, e.content)?;
		}
		if self.entries.len() != self.total {
			writeln!(out, "{}", format!("{} of {} entries", self.entries.len(), self.total).dimmed())?;
		}
		Ok(())
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RepairView {
	partition_id: String,
	recovered: u64,
}

impl TextView for RepairView {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		writeln!(out, "Recovered {} operation(s) on {}", self.recovered, self.partition_id)
	}
}

pub async fn show(ctx: &CommandContext, partition_id: Option<&str>, filter: Option<&str>) -> smia::Result<bool> {
	let state = ctx.connect().await?;
	let session = state.session().get();
	let entries = browse::journal(ctx.service(), session, partition_id).await?;

	let total = entries.len();
	let entries = match filter {
		Some(query) => journal::filter(&entries, query).into_iter().cloned().collect(),
		None => entries,
	};
	let view = JournalView {
		partition_id: partition_id.unwrap_or(&session.partition_id).to_string(),
		filter: filter.map(str::to_string),
		total,
		entries,
	};
	print_result(&ResultBuilder::new("journal show").data(view).build(), ctx.format);
	Ok(true)
}

pub async fn repair(ctx: &CommandContext, partition_id: Option<&str>) -> smia::Result<bool> {
	let state = ctx.connect().await?;
	let session = state.session().get();
	let recovered = browse::repair_journal(ctx.service(), session, partition_id).await?;

	let view = RepairView {
		partition_id: partition_id.unwrap_or(&session.partition_id).to_string(),
		recovered,
	};
	print_result(&ResultBuilder::new("journal repair").data(view).build(), ctx.format);
	Ok(true)
}
