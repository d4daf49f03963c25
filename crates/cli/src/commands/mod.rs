mod browse;
mod journal;
mod run;
mod session;

use std::time::Duration;

use anyhow::Context;
use smia::connect::Connector;
use smia::{ClientState, Connectivity, HttpFsService, SmiaError};

use crate::cli::{Cli, Commands, JournalAction};
use crate::config::{Overrides, Settings};
use crate::output::{OutputFormat, print_error};

pub const RECONNECT_DELAY: Duration = Duration::from_millis(500);

/// Everything a command needs: resolved settings, output format and the
/// service client.
pub struct CommandContext {
	pub settings: Settings,
	pub format: OutputFormat,
	service: HttpFsService,
}

impl CommandContext {
	pub fn new(settings: Settings, format: OutputFormat) -> smia::Result<Self> {
		let service = HttpFsService::new(&settings.backend_url, settings.timeout)?;
		Ok(Self { settings, format, service })
	}

	pub fn service(&self) -> &HttpFsService {
		&self.service
	}

	/// Connects and reconciles the session into `state`, retrying once after
	/// [`RECONNECT_DELAY`] when the first probe fails.
	pub async fn establish(&self, state: &mut ClientState) -> Connectivity {
		let connector = Connector::new(&self.service);
		if connector.connect(state).await == Connectivity::Connected {
			return Connectivity::Connected;
		}
		tokio::time::sleep(RECONNECT_DELAY).await;
		connector.reconnect(state).await
	}

	/// Connects and reconciles the session into a fresh state.
	pub async fn connect(&self) -> smia::Result<ClientState> {
		let mut state = ClientState::new();
		match self.establish(&mut state).await {
			Connectivity::Connected => Ok(state),
			_ => Err(SmiaError::NotConnected),
		}
	}
}

impl Commands {
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Run { .. } => "run",
			Commands::Login { .. } => "login",
			Commands::Logout => "logout",
			Commands::Session => "session",
			Commands::Disks { .. } => "disks",
			Commands::Ls { .. } => "ls",
			Commands::Cat { .. } => "cat",
			Commands::Journal {
				action: JournalAction::Show { .. },
			} => "journal show",
			Commands::Journal {
				action: JournalAction::Repair { .. },
			} => "journal repair",
		}
	}
}

/// Runs one command. `Ok(false)` means it ran but did not succeed; the
/// failure has already been printed.
pub async fn dispatch(cli: Cli) -> anyhow::Result<bool> {
	let settings = Settings::load(&Overrides {
		backend_url: cli.backend,
		throttle_ms: cli.delay_ms,
		timeout_ms: cli.timeout_ms,
	});
	let ctx = CommandContext::new(settings, cli.format).context("invalid backend configuration")?;
	let name = cli.command.name();

	let result = match cli.command {
		Commands::Run { file } => run::execute(&ctx, &file).await,
		Commands::Login { user, pass, id } => session::login(&ctx, user, pass, id).await,
		Commands::Logout => session::logout(&ctx).await,
		Commands::Session => session::show(&ctx).await,
		Commands::Disks { mounted } => browse::disks(&ctx, mounted).await,
		Commands::Ls { id, path } => browse::list(&ctx, &id, &path).await,
		Commands::Cat { id, path } => browse::cat(&ctx, &id, &path).await,
		Commands::Journal { action } => match action {
			JournalAction::Show { id, filter } => journal::show(&ctx, id.as_deref(), filter.as_deref()).await,
			JournalAction::Repair { id } => journal::repair(&ctx, id.as_deref()).await,
		},
	};

	match result {
		Ok(clean) => Ok(clean),
		Err(err) => {
			print_error(name, &err, ctx.format);
			Ok(false)
		}
	}
}
