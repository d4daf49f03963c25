use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use smia::browse;
use smia::protocol::{Disk, FileKind, FileNode};

use super::CommandContext;
use crate::output::{ResultBuilder, TextView, human_size, print_result};

#[derive(Debug, Serialize)]
struct DisksView {
	disks: Vec<Disk>,
}

impl TextView for DisksView {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		if self.disks.is_empty() {
			return writeln!(out, "No disks");
		}
		for disk in &self.disks {
			writeln!(out, "{}  {}{}  {}", disk.path.bold(), disk.size, disk.unit, disk.fit.dimmed())?;
			for p in &disk.partitions {
				let state = if p.is_mounted { p.status.green() } else { p.status.dimmed() };
				writeln!(out, "  {:<8} {:<16} {:>10}  {:<2} {}", p.id, p.name, human_size(p.size), p.kind, state)?;
			}
		}
		Ok(())
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingView {
	partition_id: String,
	path: String,
	files: Vec<FileNode>,
}

impl TextView for ListingView {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		for f in &self.files {
			let (kind, name) = match f.kind {
				FileKind::Folder => ('d', f.name.blue().bold()),
				FileKind::File => ('-', f.name.normal()),
			};
			writeln!(out, "{kind}{:<4} {:<8} {:<8} {:>10}  {name}", f.permissions, f.owner, f.group, human_size(f.size))?;
		}
		Ok(())
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileView {
	partition_id: String,
	path: String,
	content: String,
}

impl TextView for FileView {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		out.write_all(self.content.as_bytes())?;
		if !self.content.ends_with('\n') {
			writeln!(out)?;
		}
		Ok(())
	}
}

pub async fn disks(ctx: &CommandContext, mounted_only: bool) -> smia::Result<bool> {
	let disks = if mounted_only {
		browse::mounted_disks(ctx.service()).await?
	} else {
		browse::disks(ctx.service()).await?
	};
	print_result(&ResultBuilder::new("disks").data(DisksView { disks }).build(), ctx.format);
	Ok(true)
}

pub async fn list(ctx: &CommandContext, partition_id: &str, path: &str) -> smia::Result<bool> {
	let state = ctx.connect().await?;
	let files = browse::list_files(ctx.service(), state.session().get(), partition_id, path).await?;

	let view = ListingView {
		partition_id: partition_id.to_string(),
		path: path.to_string(),
		files,
	};
	print_result(&ResultBuilder::new("ls").data(view).build(), ctx.format);
	Ok(true)
}

pub async fn cat(ctx: &CommandContext, partition_id: &str, path: &str) -> smia::Result<bool> {
	let state = ctx.connect().await?;
	let content = browse::read_file(ctx.service(), state.session().get(), partition_id, path).await?;

	let view = FileView {
		partition_id: partition_id.to_string(),
		path: path.to_string(),
		content,
	};
	print_result(&ResultBuilder::new("cat").data(view).build(), ctx.format);
	Ok(true)
}
