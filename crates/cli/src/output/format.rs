use clap::ValueEnum;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable, colored text (default)
	#[default]
	Text,
	/// One pretty-printed JSON document
	Json,
	/// Newline-delimited JSON (streams log events during `run`)
	Ndjson,
}

impl OutputFormat {
	/// Whether log events are rendered while a script is still running.
	pub fn streams_log(self) -> bool {
		matches!(self, OutputFormat::Text | OutputFormat::Ndjson)
	}
}
