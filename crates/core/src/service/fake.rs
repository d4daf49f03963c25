//! In-memory [`FsService`] for unit tests.
//!
//! Records every call in order and answers from scripted replies.
//!
//! ```ignore
//! let service = FakeService::new().reply_execute(Ok(ok("done")));
//! runner(&service).execute(&mut state, "mkdir -path=/a").await;
//! assert_eq!(service.executed(), ["mkdir -path=/a"]);
//! ```

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use smia_protocol::{Disk, ExecuteResponse, FilesResponse, JournalingResponse, ReadFileResponse, RepairResponse, SessionEnvelope};

use super::{FsService, ServiceResult, TransportError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Health,
	Session,
	Execute(String),
	Disks,
	MountedDisks,
	Files { partition_id: String, path: String },
	ReadFile { partition_id: String, path: String },
	Journaling(String),
	RepairJournal(String),
}

type ExecuteHook = Box<dyn Fn(&str) + Send + Sync>;

pub struct FakeService {
	calls: Mutex<Vec<Call>>,
	execute_replies: Mutex<VecDeque<ServiceResult<ExecuteResponse>>>,
	on_execute: Option<ExecuteHook>,
	health: ServiceResult<()>,
	session: ServiceResult<SessionEnvelope>,
	disks: Vec<Disk>,
	files: ServiceResult<FilesResponse>,
	read_file: ServiceResult<ReadFileResponse>,
	journaling: ServiceResult<JournalingResponse>,
	repair: ServiceResult<RepairResponse>,
}

pub fn ok(output: &str) -> ExecuteResponse {
	ExecuteResponse {
		success: true,
		output: Some(output.to_string()),
		error: None,
	}
}

pub fn failed(error: &str) -> ExecuteResponse {
	ExecuteResponse {
		success: false,
		output: None,
		error: Some(error.to_string()),
	}
}

impl FakeService {
	pub fn new() -> Self {
		Self {
			calls: Mutex::new(Vec::new()),
			execute_replies: Mutex::new(VecDeque::new()),
			on_execute: None,
			health: Ok(()),
			session: Ok(SessionEnvelope::default()),
			disks: Vec::new(),
			files: Ok(FilesResponse::default()),
			read_file: Ok(ReadFileResponse::default()),
			journaling: Ok(JournalingResponse::default()),
			repair: Ok(RepairResponse::default()),
		}
	}

	/// Queues the reply for the next `execute`. Unqueued calls answer `ok("ok")`.
	pub fn reply_execute(self, reply: ServiceResult<ExecuteResponse>) -> Self {
		self.execute_replies.lock().unwrap().push_back(reply);
		self
	}

	pub fn on_execute(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
		self.on_execute = Some(Box::new(hook));
		self
	}

	pub fn with_health(mut self, reply: ServiceResult<()>) -> Self {
		self.health = reply;
		self
	}

	pub fn with_session(mut self, reply: ServiceResult<SessionEnvelope>) -> Self {
		self.session = reply;
		self
	}

	pub fn with_disks(mut self, disks: Vec<Disk>) -> Self {
		self.disks = disks;
		self
	}

	pub fn with_files(mut self, reply: ServiceResult<FilesResponse>) -> Self {
		self.files = reply;
		self
	}

	pub fn with_read_file(mut self, reply: ServiceResult<ReadFileResponse>) -> Self {
		self.read_file = reply;
		self
	}

	pub fn with_journaling(mut self, reply: ServiceResult<JournalingResponse>) -> Self {
		self.journaling = reply;
		self
	}

	pub fn with_repair(mut self, reply: ServiceResult<RepairResponse>) -> Self {
		self.repair = reply;
		self
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.lock().unwrap().clone()
	}

	/// Command lines sent to `execute`, in order.
	pub fn executed(&self) -> Vec<String> {
		self.calls()
			.into_iter()
			.filter_map(|call| match call {
				Call::Execute(cmd) => Some(cmd),
				_ => None,
			})
			.collect()
	}

	fn record(&self, call: Call) {
		self.calls.lock().unwrap().push(call);
	}
}

#[async_trait]
impl FsService for FakeService {
	async fn health(&self) -> ServiceResult<()> {
		self.record(Call::Health);
		self.health.clone()
	}

	async fn session(&self) -> ServiceResult<SessionEnvelope> {
		self.record(Call::Session);
		self.session.clone()
	}

	async fn execute(&self, command: &str) -> ServiceResult<ExecuteResponse> {
		self.record(Call::Execute(command.to_string()));
		if let Some(hook) = &self.on_execute {
			hook(command);
		}
		self.execute_replies.lock().unwrap().pop_front().unwrap_or_else(|| Ok(ok("ok")))
	}

	async fn disks(&self) -> ServiceResult<Vec<Disk>> {
		self.record(Call::Disks);
		Ok(self.disks.clone())
	}

	async fn mounted_disks(&self) -> ServiceResult<Vec<Disk>> {
		self.record(Call::MountedDisks);
		Ok(self
			.disks
			.iter()
			.map(|disk| Disk {
				partitions: disk.partitions.iter().filter(|p| p.is_mounted).cloned().collect(),
				..disk.clone()
			})
			.filter(|disk| !disk.partitions.is_empty())
			.collect())
	}

	async fn files(&self, partition_id: &str, path: &str) -> ServiceResult<FilesResponse> {
		self.record(Call::Files {
			partition_id: partition_id.to_string(),
			path: path.to_string(),
		});
		self.files.clone()
	}

	async fn read_file(&self, partition_id: &str, path: &str) -> ServiceResult<ReadFileResponse> {
		self.record(Call::ReadFile {
			partition_id: partition_id.to_string(),
			path: path.to_string(),
		});
		self.read_file.clone()
	}

	async fn journaling(&self, partition_id: &str) -> ServiceResult<JournalingResponse> {
		self.record(Call::Journaling(partition_id.to_string()));
		self.journaling.clone()
	}

	async fn repair_journal(&self, partition_id: &str) -> ServiceResult<RepairResponse> {
		self.record(Call::RepairJournal(partition_id.to_string()));
		self.repair.clone()
	}
}

pub fn network_down() -> TransportError {
	TransportError::Network("connection refused".into())
}
