//! The REST boundary to the filesystem service.
//!
//! [`FsService`] has one method per endpoint the client depends on. Methods
//! return the decoded response body on any 2xx status; everything else is a
//! [`TransportError`]. Domain failures (`success: false`) are *not* errors at
//! this layer: they arrive inside the response types and are interpreted by
//! the callers.

mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use smia_protocol::{Disk, ExecuteResponse, FilesResponse, JournalingResponse, ReadFileResponse, RepairResponse, SessionEnvelope};
use thiserror::Error;

pub use http::HttpFsService;

/// Failure to obtain a usable 2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
	/// Request never produced a response (refused, reset, timed out, ...).
	#[error("{0}")]
	Network(String),

	/// Non-2xx status. `message` is the `error` field of a JSON body, when
	/// the service sent one.
	#[error("HTTP error: {code} - {reason}")]
	Status { code: u16, reason: String, message: Option<String> },

	/// 2xx status with a body that does not match the expected shape.
	#[error("Invalid response from backend: {0}")]
	Decode(String),
}

impl TransportError {
	/// Most specific text for a log entry: server message, then HTTP
	/// status, then transport detail.
	pub fn user_message(&self) -> String {
		match self {
			TransportError::Network(detail) => format!("Connection error: {detail}"),
			TransportError::Status { message: Some(message), .. } if !message.is_empty() => message.clone(),
			other => other.to_string(),
		}
	}
}

pub type ServiceResult<T> = std::result::Result<T, TransportError>;

#[async_trait]
pub trait FsService: Send + Sync {
	/// `GET /health`.
	async fn health(&self) -> ServiceResult<()>;

	/// `GET /session`.
	async fn session(&self) -> ServiceResult<SessionEnvelope>;

	/// `POST /execute` with one command line.
	async fn execute(&self, command: &str) -> ServiceResult<ExecuteResponse>;

	/// `GET /disks`.
	async fn disks(&self) -> ServiceResult<Vec<Disk>>;

	/// `GET /disks/mounted`.
	async fn mounted_disks(&self) -> ServiceResult<Vec<Disk>>;

	/// `POST /files`.
	async fn files(&self, partition_id: &str, path: &str) -> ServiceResult<FilesResponse>;

	/// `POST /file/read`.
	async fn read_file(&self, partition_id: &str, path: &str) -> ServiceResult<ReadFileResponse>;

	/// `POST /journaling`.
	async fn journaling(&self, partition_id: &str) -> ServiceResult<JournalingResponse>;

	/// `POST /journaling/repair`.
	async fn repair_journal(&self, partition_id: &str) -> ServiceResult<RepairResponse>;
}
