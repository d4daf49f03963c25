use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "smia")]
#[command(about = "Run command scripts and browse partitions on a smia filesystem service")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Backend base URL (overrides SMIA_BACKEND_URL and the config file)
	#[arg(long, global = true, value_name = "URL")]
	pub backend: Option<String>,

	/// Pause between script commands (ms)
	#[arg(long, global = true, value_name = "MS")]
	pub delay_ms: Option<u64>,

	/// Per-request timeout (ms)
	#[arg(long, global = true, value_name = "MS")]
	pub timeout_ms: Option<u64>,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Connect, synchronize the session and execute a .smia script
	Run {
		/// Script file
		file: PathBuf,
	},

	/// Log in to a partition
	Login {
		#[arg(short, long)]
		user: String,
		#[arg(short, long)]
		pass: String,
		/// Partition id (defaults to the first mounted partition)
		#[arg(long)]
		id: Option<String>,
	},

	/// Close the active session
	Logout,

	/// Show the session the backend reports
	Session,

	/// List disks and their partitions
	Disks {
		/// Only mounted partitions
		#[arg(long)]
		mounted: bool,
	},

	/// List a directory on a partition
	Ls {
		#[arg(long)]
		id: String,
		#[arg(default_value = "/")]
		path: String,
	},

	/// Print a file from a partition
	Cat {
		#[arg(long)]
		id: String,
		path: String,
	},

	/// Partition journal
	Journal {
		#[command(subcommand)]
		action: JournalAction,
	},
}

#[derive(Subcommand, Debug)]
pub enum JournalAction {
	/// Show journal entries
	Show {
		/// Partition id (defaults to the session's partition)
		#[arg(long)]
		id: Option<String>,
		/// Keep entries whose operation or path contains this text
		#[arg(long)]
		filter: Option<String>,
	},

	/// Recover the partition from its journal
	Repair {
		#[arg(long)]
		id: Option<String>,
	},
}
