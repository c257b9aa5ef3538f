//! Tracing subscriber setup.
//!
//! The terminal belongs to the menu while it runs, so log lines go to a file.
//! Filter directives are taken from `CTXMENU_LOG_FILTER`, then `RUST_LOG`, then the
//! configured level.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const LOG_ENV: &str = "CTXMENU_LOG_FILTER";

/// Where and how verbosely to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
	pub level: Level,
	pub file: Option<PathBuf>,
}

impl Default for LogOptions {
	fn default() -> Self {
		Self {
			level: Level::WARN,
			file: None,
		}
	}
}

/// Parse a level name as written in configuration files.
pub fn parse_level(value: &str) -> Result<Level> {
	value
		.trim()
		.parse::<Level>()
		.map_err(|_| anyhow!("unknown log level '{}'", value.trim()))
}

/// Install the global subscriber. Without a log file nothing is installed.
pub fn initialize(options: &LogOptions) -> Result<()> {
	let Some(path) = options.file.as_deref() else {
		return Ok(());
	};
	let file = open_log_file(path)?;

	let layer = fmt::layer()
		.with_writer(Mutex::new(file))
		.with_ansi(false)
		.with_target(true)
		.with_level(true);

	tracing_subscriber::registry()
		.with(build_env_filter(options.level))
		.with(layer)
		.try_init()
		.map_err(|err| anyhow!("failed to install log subscriber: {err}"))
}

fn open_log_file(path: &Path) -> Result<fs::File> {
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent)
			.with_context(|| format!("failed to create log directory {}", parent.display()))?;
	}
	OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.with_context(|| format!("failed to open log file {}", path.display()))
}

fn build_env_filter(level: Level) -> EnvFilter {
	if let Ok(directives) = std::env::var(LOG_ENV)
		&& let Ok(filter) = EnvFilter::try_new(&directives)
	{
		return filter;
	}

	if let Ok(filter) = EnvFilter::try_from_default_env() {
		return filter;
	}

	EnvFilter::new(level.as_str())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn level_names_parse_case_insensitively() {
		assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
		assert_eq!(parse_level(" WARN ").unwrap(), Level::WARN);
		assert!(parse_level("loud").is_err());
	}

	#[test]
	fn log_file_parent_is_created() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested").join("ctxmenu.log");
		open_log_file(&path).unwrap();
		assert!(path.exists());
	}
}
