//! `reqwest`-backed [`FsService`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use smia_protocol::{
	Disk, DisksResponse, ExecuteRequest, ExecuteResponse, FilesResponse, JournalingResponse, PartitionRequest, PathRequest, ReadFileResponse,
	RepairResponse, SessionEnvelope,
};
use tracing::debug;
use url::Url;

use super::{FsService, ServiceResult, TransportError};
use crate::error::{Result, SmiaError};

/// HTTP client for the filesystem service rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpFsService {
	client: Client,
	base: Url,
}

impl HttpFsService {
	/// Creates a client for `base_url`.
	///
	/// `timeout` bounds each request; `None` leaves requests unbounded.
	pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
		let mut base = Url::parse(base_url).map_err(|e| SmiaError::Config(format!("Invalid backend URL {base_url:?}: {e}")))?;
		if !base.path().ends_with('/') {
			let path = format!("{}/", base.path());
			base.set_path(&path);
		}

		let mut builder = Client::builder();
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}
		let client = builder.build().map_err(|e| SmiaError::Config(format!("Failed to create HTTP client: {e}")))?;

		Ok(Self { client, base })
	}

	fn endpoint(&self, path: &str) -> ServiceResult<Url> {
		self.base.join(path).map_err(|e| TransportError::Network(format!("invalid endpoint {path}: {e}")))
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> ServiceResult<T> {
		let url = self.endpoint(path)?;
		debug!(target = "smia.http", %url, "GET");
		let response = self.client.get(url).send().await.map_err(network)?;
		decode(check_status(response).await?).await
	}

	async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> ServiceResult<T> {
		let url = self.endpoint(path)?;
		debug!(target = "smia.http", %url, "POST");
		let response = self.client.post(url).json(body).send().await.map_err(network)?;
		decode(check_status(response).await?).await
	}
}

fn network(err: reqwest::Error) -> TransportError {
	TransportError::Network(err.to_string())
}

async fn check_status(response: Response) -> ServiceResult<Response> {
	let status = response.status();
	if status.is_success() {
		return Ok(response);
	}

	let body = response.text().await.unwrap_or_default();
	let message = serde_json::from_str::<serde_json::Value>(&body)
		.ok()
		.and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
	debug!(target = "smia.http", code = status.as_u16(), ?message, "non-success status");

	Err(TransportError::Status {
		code: status.as_u16(),
		reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
		message,
	})
}

async fn decode<T: DeserializeOwned>(response: Response) -> ServiceResult<T> {
	let bytes = response.bytes().await.map_err(network)?;
	serde_json::from_slice(&bytes).map_err(|e| TransportError::Decode(e.to_string()))
}

#[async_trait]
impl FsService for HttpFsService {
	async fn health(&self) -> ServiceResult<()> {
		let url = self.endpoint("health")?;
		let response = self.client.get(url).send().await.map_err(network)?;
		check_status(response).await.map(|_| ())
	}

	async fn session(&self) -> ServiceResult<SessionEnvelope> {
		self.get("session").await
	}

	async fn execute(&self, command: &str) -> ServiceResult<ExecuteResponse> {
		self.post("execute", &ExecuteRequest::new(command)).await
	}

	async fn disks(&self) -> ServiceResult<Vec<Disk>> {
		let resp: DisksResponse = self.get("disks").await?;
		Ok(resp.disks)
	}

	async fn mounted_disks(&self) -> ServiceResult<Vec<Disk>> {
		let resp: DisksResponse = self.get("disks/mounted").await?;
		Ok(resp.disks)
	}

	async fn files(&self, partition_id: &str, path: &str) -> ServiceResult<FilesResponse> {
		self.post("files", &path_request(partition_id, path)).await
	}

	async fn read_file(&self, partition_id: &str, path: &str) -> ServiceResult<ReadFileResponse> {
		self.post("file/read", &path_request(partition_id, path)).await
	}

	async fn journaling(&self, partition_id: &str) -> ServiceResult<JournalingResponse> {
		self.post("journaling", &partition_request(partition_id)).await
	}

	async fn repair_journal(&self, partition_id: &str) -> ServiceResult<RepairResponse> {
		self.post("journaling/repair", &partition_request(partition_id)).await
	}
}

fn path_request(partition_id: &str, path: &str) -> PathRequest {
	PathRequest {
		partition_id: partition_id.to_string(),
		path: path.to_string(),
	}
}

fn partition_request(partition_id: &str) -> PartitionRequest {
	PartitionRequest {
		partition_id: partition_id.to_string(),
	}
}
