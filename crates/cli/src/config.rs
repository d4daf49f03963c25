//! Layered settings: CLI flag > environment > config file > default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use smia::runner::DEFAULT_THROTTLE;
use tracing::{debug, warn};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8080";
pub const BACKEND_URL_ENV: &str = "SMIA_BACKEND_URL";

/// Contents of `~/.config/smia/config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
	pub backend_url: Option<String>,
	pub throttle_ms: Option<u64>,
	pub timeout_ms: Option<u64>,
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
	pub backend_url: Option<String>,
	pub throttle_ms: Option<u64>,
	pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub backend_url: String,
	pub throttle: Duration,
	/// `None` leaves requests unbounded.
	pub timeout: Option<Duration>,
}

impl Settings {
	pub fn resolve(flags: &Overrides, env_backend: Option<String>, file: FileConfig) -> Self {
		let env_backend = env_backend.filter(|url| !url.trim().is_empty());
		let backend_url = flags
			.backend_url
			.clone()
			.or(env_backend)
			.or(file.backend_url)
			.unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

		let throttle = flags.throttle_ms.or(file.throttle_ms).map_or(DEFAULT_THROTTLE, Duration::from_millis);
		let timeout = flags.timeout_ms.or(file.timeout_ms).map(Duration::from_millis);

		Self {
			backend_url,
			throttle,
			timeout,
		}
	}

	/// Resolves against the process environment and the default config file.
	pub fn load(flags: &Overrides) -> Self {
		let file = config_path().map(|path| load_file(&path)).unwrap_or_default();
		let settings = Self::resolve(flags, std::env::var(BACKEND_URL_ENV).ok(), file);
		debug!(target = "smia.config", backend = %settings.backend_url, throttle_ms = settings.throttle.as_millis() as u64, "settings resolved");
		settings
	}
}

pub fn config_path() -> Option<PathBuf> {
	dirs::home_dir().map(|home| home.join(".config").join("smia").join("config.json"))
}

/// Reads a config file. A missing file is the empty config; an unreadable or
/// malformed one is reported and ignored.
pub fn load_file(path: &Path) -> FileConfig {
	let text = match std::fs::read_to_string(path) {
		Ok(text) => text,
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => return FileConfig::default(),
		Err(err) => {
			warn!(target = "smia.config", path = %path.display(), error = %err, "config file unreadable; ignoring");
			return FileConfig::default();
		}
	};
	match serde_json::from_str(&text) {
		Ok(config) => config,
		Err(err) => {
			warn!(target = "smia.config", path = %path.display(), error = %err, "config file malformed; ignoring");
			FileConfig::default()
		}
	}
}
