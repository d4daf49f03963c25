//! Script text parsing and `.smia` file loading.

use std::fs;
use std::path::Path;

use crate::classifier;
use crate::error::{Result, SmiaError};

/// Extension required for script files.
pub const SCRIPT_EXTENSION: &str = "smia";

/// Ordered command queue parsed from script text.
///
/// Blank lines and lines starting with `#` are dropped; every other line is
/// kept trimmed, in input order. There is no escaping or continuation syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
	commands: Vec<String>,
}

impl Script {
	pub fn parse(text: &str) -> Self {
		let commands = text
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty() && !is_comment(line))
			.map(str::to_string)
			.collect();
		Self { commands }
	}

	pub fn commands(&self) -> &[String] {
		&self.commands
	}

	pub fn len(&self) -> usize {
		self.commands.len()
	}

	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	/// First command that needs an authenticated session, if any.
	pub fn first_protected(&self) -> Option<&str> {
		self.commands.iter().map(String::as_str).find(|cmd| classifier::requires_auth(cmd))
	}
}

pub fn is_comment(line: &str) -> bool {
	line.trim_start().starts_with('#')
}

/// Reads a script file, rejecting anything without the `.smia` extension
/// before touching the filesystem.
pub fn load_script(path: &Path) -> Result<String> {
	let has_extension = path.extension().and_then(|ext| ext.to_str()) == Some(SCRIPT_EXTENSION);
	if !has_extension {
		return Err(SmiaError::InvalidScriptPath {
			path: path.to_path_buf(),
			expected: SCRIPT_EXTENSION,
		});
	}
	Ok(fs::read_to_string(path)?)
}
