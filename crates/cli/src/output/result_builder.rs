use std::io::{self, Write};
use std::time::Instant;

use colored::Colorize;
use serde::Serialize;
use smia::SmiaError;

use crate::output::format::OutputFormat;
use crate::output::model::{CommandError, CommandResult, ErrorCode};

/// Human-readable rendering of a command's data.
pub trait TextView {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Builder for constructing command results.
pub struct ResultBuilder<T: Serialize> {
	command: String,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			error: None,
			start_time: Instant::now(),
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, code: ErrorCode, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code,
			message: message.into(),
		});
		self
	}

	pub fn build(self) -> CommandResult<T> {
		CommandResult {
			ok: self.error.is_none() && self.data.is_some(),
			command: self.command,
			data: self.data,
			error: self.error,
			duration_ms: Some(self.start_time.elapsed().as_millis() as u64),
		}
	}
}

/// Print a command result to stdout in the specified format.
pub fn print_result<T: Serialize + TextView>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Ndjson => {
			if let Ok(json) = serde_json::to_string(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => {
			if let Some(ref data) = result.data {
				let mut stdout = io::stdout().lock();
				let _ = data.write_text(&mut stdout);
			}
			if let Some(ref error) = result.error {
				print_error_stderr(error);
			}
		}
	}
}

/// Print a failed command in the specified format.
pub fn print_error(command: &str, err: &SmiaError, format: OutputFormat) {
	let error = CommandError {
		code: ErrorCode::from(err),
		message: err.user_message(),
	};
	match format {
		OutputFormat::Text => print_error_stderr(&error),
		OutputFormat::Json | OutputFormat::Ndjson => {
			let result: CommandResult<()> = CommandResult {
				ok: false,
				command: command.to_string(),
				data: None,
				error: Some(error),
				duration_ms: None,
			};
			let json = if format == OutputFormat::Json {
				serde_json::to_string_pretty(&result)
			} else {
				serde_json::to_string(&result)
			};
			if let Ok(json) = json {
				println!("{json}");
			}
		}
	}
}

/// Print an error to stderr in human-readable format.
fn print_error_stderr(error: &CommandError) {
	eprintln!("{} {}", format!("Error [{}]:", error.code).red().bold(), error.message);
}
