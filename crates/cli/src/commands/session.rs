use std::io::{self, Write};

use colored::Colorize;
use serde::Serialize;
use smia::auth::{self, Credentials};
use smia::{Session, SmiaError, browse};

use super::CommandContext;
use crate::output::{ResultBuilder, TextView, print_result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView {
	session: Session,
}

impl TextView for SessionView {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		let s = &self.session;
		if !s.is_logged_in {
			return writeln!(out, "No active session");
		}
		let role = if s.is_root { " (root)".yellow().to_string() } else { String::new() };
		writeln!(out, "Logged in as {}{role}", s.label().bold())
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutView {
	logged_out: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	previous: Option<String>,
}

impl TextView for LogoutView {
	fn write_text(&self, out: &mut dyn Write) -> io::Result<()> {
		match &self.previous {
			Some(label) if self.logged_out => writeln!(out, "Session closed ({label})"),
			_ => writeln!(out, "No active session"),
		}
	}
}

pub async fn login(ctx: &CommandContext, user: String, password: String, partition_id: Option<String>) -> smia::Result<bool> {
	let mut state = ctx.connect().await?;

	let partition_id = match partition_id {
		Some(id) => id,
		None => {
			let disks = browse::mounted_disks(ctx.service()).await?;
			browse::default_partition(&disks)
				.map(|p| p.id.clone())
				.ok_or_else(|| SmiaError::InvalidInput("no mounted partition to log in to; pass --id".into()))?
		}
	};

	let credentials = Credentials {
		user,
		password,
		partition_id,
	};
	let session = auth::login(ctx.service(), &mut state, &credentials).await?;

	print_result(&ResultBuilder::new("login").data(SessionView { session }).build(), ctx.format);
	Ok(true)
}

pub async fn logout(ctx: &CommandContext) -> smia::Result<bool> {
	let mut state = ctx.connect().await?;
	let previous = state.session().is_logged_in().then(|| state.session().get().label());

	let logged_out = auth::logout(ctx.service(), &mut state).await?;

	let view = LogoutView { logged_out, previous };
	print_result(&ResultBuilder::new("logout").data(view).build(), ctx.format);
	Ok(true)
}

pub async fn show(ctx: &CommandContext) -> smia::Result<bool> {
	let state = ctx.connect().await?;
	let session = state.session().get().clone();

	print_result(&ResultBuilder::new("session").data(SessionView { session }).build(), ctx.format);
	Ok(true)
}
