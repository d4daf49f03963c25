//! Read-only browsing of disks, partitions, files and journals.
//!
//! Directory listings and file reads are gated by [`has_access`], evaluated
//! against a disk snapshot fetched for that request.

use smia_protocol::{Disk, FileNode, Partition};
use tracing::debug;

use crate::access::has_access;
use crate::error::{Result, SmiaError};
use crate::journal::{self, JournalEntry};
use crate::service::FsService;
use crate::session::Session;

pub const NO_PARTITION_SELECTED: &str = "Select a mounted partition or log in to a partition";

pub async fn disks<S: FsService + ?Sized>(service: &S) -> Result<Vec<Disk>> {
	Ok(service.disks().await?)
}

pub async fn mounted_disks<S: FsService + ?Sized>(service: &S) -> Result<Vec<Disk>> {
	Ok(service.mounted_disks().await?)
}

/// Mounted partitions, in disk order.
pub fn mounted_partitions(disks: &[Disk]) -> Vec<&Partition> {
	disks.iter().flat_map(|disk| disk.partitions.iter()).filter(|p| p.is_mounted).collect()
}

pub fn default_partition(disks: &[Disk]) -> Option<&Partition> {
	mounted_partitions(disks).into_iter().next()
}

/// Looks a partition up by id, ignoring ASCII case.
pub fn find_partition<'a>(disks: &'a [Disk], partition_id: &str) -> Option<&'a Partition> {
	disks
		.iter()
		.flat_map(|disk| disk.partitions.iter())
		.find(|p| p.id.eq_ignore_ascii_case(partition_id))
}

async fn authorize<S: FsService + ?Sized>(service: &S, session: &Session, partition_id: &str) -> Result<Partition> {
	let disks = service.disks().await?;
	let partition = find_partition(&disks, partition_id).ok_or_else(|| SmiaError::PartitionNotFound(partition_id.to_string()))?;
	if !has_access(session, partition) {
		debug!(target = "smia.session", partition = partition_id, session = %session.label(), "browse denied");
		return Err(SmiaError::AccessDenied {
			partition_id: partition.id.clone(),
		});
	}
	Ok(partition.clone())
}

/// Lists `path` on a partition the session may browse.
pub async fn list_files<S>(service: &S, session: &Session, partition_id: &str, path: &str) -> Result<Vec<FileNode>>
where
	S: FsService + ?Sized,
{
	let partition = authorize(service, session, partition_id).await?;
	let resp = service.files(&partition.id, path).await?;
	if resp.success == Some(false) {
		return Err(SmiaError::Service(resp.error.unwrap_or_else(|| format!("Could not list {path}"))));
	}
	Ok(resp.files)
}

/// Reads a file on a partition the session may browse.
pub async fn read_file<S>(service: &S, session: &Session, partition_id: &str, path: &str) -> Result<String>
where
	S: FsService + ?Sized,
{
	let partition = authorize(service, session, partition_id).await?;
	let resp = service.read_file(&partition.id, path).await?;
	if !resp.success {
		return Err(SmiaError::Service(resp.error.unwrap_or_else(|| format!("Could not read {path}"))));
	}
	Ok(resp.content.unwrap_or_default())
}

/// Resolves the journal target. Journals are only served to a logged-in session.
fn journal_target<'a>(session: &'a Session, partition_id: Option<&'a str>) -> Result<&'a str> {
	let id = partition_id.unwrap_or(&session.partition_id).trim();
	if id.is_empty() {
		return Err(SmiaError::InvalidInput(NO_PARTITION_SELECTED.into()));
	}
	if !session.is_logged_in {
		debug!(target = "smia.session", partition = id, "journal refused without login");
		return Err(SmiaError::LoginRequired);
	}
	Ok(id)
}

/// Journal of `partition_id`, or of the session's partition when `None`.
pub async fn journal<S>(service: &S, session: &Session, partition_id: Option<&str>) -> Result<Vec<JournalEntry>>
where
	S: FsService + ?Sized,
{
	let id = journal_target(session, partition_id)?;
	let resp = service.journaling(id).await?;
	if !resp.success {
		return Err(SmiaError::Service(resp.error.unwrap_or_else(|| "Could not load the journal".into())));
	}
	debug!(target = "smia.journal", partition = id, entries = resp.entries.len(), "journal loaded");
	Ok(journal::normalize(resp.entries))
}

/// Replays the journal onto the partition. Returns the number of recovered operations.
pub async fn repair_journal<S>(service: &S, session: &Session, partition_id: Option<&str>) -> Result<u64>
where
	S: FsService + ?Sized,
{
	let id = journal_target(session, partition_id)?;
	let resp = service.repair_journal(id).await?;
	if !resp.success {
		return Err(SmiaError::Service(resp.error.unwrap_or_else(|| "Journal repair failed".into())));
	}
	Ok(resp.recovered)
}
