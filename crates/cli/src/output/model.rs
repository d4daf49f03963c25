use serde::Serialize;
use smia::SmiaError;

/// The envelope every command prints in JSON formats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
	pub code: ErrorCode,
	pub message: String,
}

/// Stable error codes for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	BackendUnavailable,
	AuthError,
	AccessDenied,
	NotFound,
	ServiceError,
	TransportError,
	InvalidInput,
	ConfigError,
	IoError,
	/// The script finished but at least one command failed or it never ran.
	ScriptFailed,
}

impl From<&SmiaError> for ErrorCode {
	fn from(err: &SmiaError) -> Self {
		match err {
			SmiaError::NotConnected => ErrorCode::BackendUnavailable,
			SmiaError::Auth(_) | SmiaError::LoginRequired => ErrorCode::AuthError,
			SmiaError::AccessDenied { .. } => ErrorCode::AccessDenied,
			SmiaError::PartitionNotFound(_) => ErrorCode::NotFound,
			SmiaError::Service(_) => ErrorCode::ServiceError,
			SmiaError::Transport(_) => ErrorCode::TransportError,
			SmiaError::InvalidScriptPath { .. } | SmiaError::InvalidInput(_) => ErrorCode::InvalidInput,
			SmiaError::Config(_) => ErrorCode::ConfigError,
			SmiaError::Io(_) => ErrorCode::IoError,
		}
	}
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let code = match self {
			ErrorCode::BackendUnavailable => "BACKEND_UNAVAILABLE",
			ErrorCode::AuthError => "AUTH_ERROR",
			ErrorCode::AccessDenied => "ACCESS_DENIED",
			ErrorCode::NotFound => "NOT_FOUND",
			ErrorCode::ServiceError => "SERVICE_ERROR",
			ErrorCode::TransportError => "TRANSPORT_ERROR",
			ErrorCode::InvalidInput => "INVALID_INPUT",
			ErrorCode::ConfigError => "CONFIG_ERROR",
			ErrorCode::IoError => "IO_ERROR",
			ErrorCode::ScriptFailed => "SCRIPT_FAILED",
		};
		f.write_str(code)
	}
}
