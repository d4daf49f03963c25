use std::path::PathBuf;

use thiserror::Error;

use crate::service::TransportError;

#[derive(Debug, Error)]
pub enum SmiaError {
	#[error("No connection to the backend")]
	NotConnected,

	#[error("Authentication failed: {0}")]
	Auth(String),

	#[error("Log in to a partition to use the journal")]
	LoginRequired,

	#[error("Access denied to partition {partition_id}")]
	AccessDenied { partition_id: String },

	#[error("Partition {0} not found")]
	PartitionNotFound(String),

	/// The service answered but reported `success: false`.
	#[error("{0}")]
	Service(String),

	#[error(transparent)]
	Transport(#[from] TransportError),

	#[error("Only files with the .{expected} extension are allowed: {}", path.display())]
	InvalidScriptPath { path: PathBuf, expected: &'static str },

	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl SmiaError {
	/// Message for display, with the service's own wording when it sent one.
	pub fn user_message(&self) -> String {
		match self {
			SmiaError::Transport(err) => err.user_message(),
			other => other.to_string(),
		}
	}
}

pub type Result<T> = std::result::Result<T, SmiaError>;
