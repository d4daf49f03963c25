//! `POST /execute` request and response.

use serde::{Deserialize, Serialize};

/// A single command line forwarded to the service interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
	pub command: String,
}

impl ExecuteRequest {
	pub fn new(command: impl Into<String>) -> Self {
		Self { command: command.into() }
	}
}

/// Result of interpreting one command.
///
/// `success: false` is a domain failure reported by the service; transport
/// failures never produce this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponse {
	#[serde(default)]
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub output: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl ExecuteResponse {
	/// Server output, treating an empty string as absent.
	pub fn output_text(&self) -> Option<&str> {
		self.output.as_deref().filter(|s| !s.is_empty())
	}

	/// Server error message, treating an empty string as absent.
	pub fn error_text(&self) -> Option<&str> {
		self.error.as_deref().filter(|s| !s.is_empty())
	}
}
