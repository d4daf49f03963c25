use colored::Colorize;
use smia::{EntryStatus, LogEntry};

/// One log entry as a terminal line. Multi-line output is indented under it.
pub fn format_entry(entry: &LogEntry) -> String {
	let time = format!("[{}]", entry.timestamp).dimmed();
	let marker = match entry.status {
		EntryStatus::Running => "…".dimmed(),
		EntryStatus::Success => "✓".green().bold(),
		EntryStatus::Error => "✗".red().bold(),
		EntryStatus::Warning => "!".yellow().bold(),
		EntryStatus::Info => "i".cyan(),
	};

	let mut line = format!("{time} {marker}");
	if !entry.command.is_empty() {
		line.push(' ');
		line.push_str(&entry.command.bold().to_string());
	}
	if entry.status == EntryStatus::Running {
		return line;
	}

	let output = entry.output.trim_end();
	if entry.command.is_empty() {
		line.push(' ');
		line.push_str(&paint(output, entry.status));
	} else if !output.is_empty() {
		for out_line in output.lines() {
			line.push_str("\n    ");
			line.push_str(&paint(out_line, entry.status));
		}
	}
	line
}

fn paint(text: &str, status: EntryStatus) -> String {
	match status {
		EntryStatus::Error => text.red().to_string(),
		EntryStatus::Warning => text.yellow().to_string(),
		_ => text.to_string(),
	}
}

/// Byte count with a binary unit suffix.
pub fn human_size(bytes: u64) -> String {
	const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
	let mut value = bytes as f64;
	let mut unit = 0;
	while value >= 1024.0 && unit < UNITS.len() - 1 {
		value /= 1024.0;
		unit += 1;
	}
	if unit == 0 { format!("{bytes} B") } else { format!("{value:.1} {}", UNITS[unit]) }
}
