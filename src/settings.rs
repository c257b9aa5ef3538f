use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use config::{Config, ConfigError, File};
use serde::Deserialize;
use tracing::Level;

use ctxmenu::logging::{self, LogOptions};
use ctxmenu::{MenuTimings, Theme, app_dirs};

use crate::cli::CliArgs;

const DEFAULT_DEBOUNCE_MS: u64 = 500;
const DEFAULT_GRACE_MS: u64 = 100;
const DEFAULT_FADE_MS: u64 = 100;
const DEFAULT_THEME: &str = "dark";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
	menu: MenuSection,
	bridge: BridgeSection,
	ui: UiSection,
	log: LogSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MenuSection {
	debounce_ms: Option<u64>,
	grace_ms: Option<u64>,
	fade_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct BridgeSection {
	events: Option<PathBuf>,
	requests: Option<PathBuf>,
	show: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct UiSection {
	theme: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LogSection {
	level: Option<String>,
	file: Option<PathBuf>,
}

pub struct ResolvedConfig {
	pub timings: MenuTimings,
	pub fade: Duration,
	pub theme_name: String,
	pub theme: Theme,
	pub events: Option<PathBuf>,
	pub requests: Option<PathBuf>,
	pub show: Option<PathBuf>,
	pub log: LogOptions,
}

impl ResolvedConfig {
	pub fn print_summary(&self) {
		println!("Effective configuration:");
		println!("  Search debounce: {} ms", self.timings.debounce.as_millis());
		println!("  Grace period: {} ms", self.timings.grace.as_millis());
		println!("  Fade: {} ms", self.fade.as_millis());
		println!("  Theme: {}", self.theme_name);
		println!("  Host events: {}", display_path(self.events.as_ref(), "(none)"));
		println!(
			"  Host requests: {}",
			display_path(self.requests.as_ref(), "(discarded)")
		);
		if let Some(path) = &self.show {
			println!("  Initial menu: {}", path.display());
		}
		println!("  Log level: {}", self.log.level);
		println!("  Log file: {}", display_path(self.log.file.as_ref(), "(disabled)"));
	}
}

pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let defaults = if cli.no_config {
		Vec::new()
	} else {
		default_config_files()
	};
	let builder = build_config(cli, defaults)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

fn build_config(cli: &CliArgs, defaults: Vec<PathBuf>) -> Result<Config> {
	let mut builder = Config::builder();

	for path in defaults {
		builder = builder.add_source(File::from(path).required(false));
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("ctxmenu")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".ctxmenu.toml"));
		files.push(current_dir.join("ctxmenu.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.debounce_ms {
			self.menu.debounce_ms = Some(value);
		}
		if let Some(value) = cli.grace_ms {
			self.menu.grace_ms = Some(value);
		}
		if let Some(value) = cli.fade_ms {
			self.menu.fade_ms = Some(value);
		}
		if let Some(path) = cli.events.clone() {
			self.bridge.events = Some(path);
		}
		if let Some(path) = cli.requests.clone() {
			self.bridge.requests = Some(path);
		}
		if let Some(path) = cli.show.clone() {
			self.bridge.show = Some(path);
		}
		if let Some(theme) = cli.theme {
			self.ui.theme = Some(theme.as_str().to_string());
		}
		if let Some(path) = cli.log_file.clone() {
			self.log.file = Some(path);
		}
		if cli.verbose {
			self.log.level = Some(Level::DEBUG.to_string());
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let timings = MenuTimings {
			debounce: Duration::from_millis(self.menu.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)),
			grace: Duration::from_millis(self.menu.grace_ms.unwrap_or(DEFAULT_GRACE_MS)),
		};
		let fade = Duration::from_millis(self.menu.fade_ms.unwrap_or(DEFAULT_FADE_MS));

		let theme_name = self
			.ui
			.theme
			.map(|name| name.trim().to_ascii_lowercase())
			.filter(|name| !name.is_empty())
			.unwrap_or_else(|| DEFAULT_THEME.to_string());
		let Some(theme) = Theme::by_name(&theme_name) else {
			bail!(
				"unknown theme '{theme_name}' (available: {})",
				Theme::names().join(", ")
			);
		};

		let level = match self.log.level.as_deref() {
			Some(level) => logging::parse_level(level)?,
			None => LogOptions::default().level,
		};
		let file = self
			.log
			.file
			.or_else(|| app_dirs::default_log_file().ok());

		Ok(ResolvedConfig {
			timings,
			fade,
			theme_name,
			theme,
			events: self.bridge.events,
			requests: self.bridge.requests,
			show: self.bridge.show,
			log: LogOptions { level, file },
		})
	}
}

fn display_path(path: Option<&PathBuf>, fallback: &str) -> String {
	path.map(|path| path.display().to_string())
		.unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
	use std::fs;

	use clap::Parser;
	use tempfile::tempdir;

	use super::*;

	fn cli(args: &[&str]) -> CliArgs {
		CliArgs::parse_from(args)
	}

	#[test]
	fn defaults_apply_without_sources() {
		let resolved = load(&cli(&["ctxmenu", "--no-config"])).unwrap();
		assert_eq!(resolved.timings, MenuTimings::default());
		assert_eq!(resolved.fade, Duration::from_millis(100));
		assert_eq!(resolved.theme_name, "dark");
		assert!(resolved.events.is_none());
	}

	#[test]
	fn file_values_are_overridden_by_flags() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("menu.toml");
		fs::write(
			&path,
			"[menu]\ndebounce_ms = 250\ngrace_ms = 40\n\n[ui]\ntheme = \"Light\"\n\n[bridge]\nevents = \"/tmp/host-events\"\n\n[log]\nlevel = \"info\"\n",
		)
		.unwrap();
		let path_arg = path.to_string_lossy().into_owned();

		let resolved = load(&cli(&[
			"ctxmenu",
			"--no-config",
			"--config",
			&path_arg,
			"--grace-ms",
			"75",
		]))
		.unwrap();
		assert_eq!(resolved.timings.debounce, Duration::from_millis(250));
		assert_eq!(resolved.timings.grace, Duration::from_millis(75));
		assert_eq!(resolved.theme_name, "light");
		assert_eq!(resolved.events, Some(PathBuf::from("/tmp/host-events")));
		assert_eq!(resolved.log.level, Level::INFO);
	}

	#[test]
	fn missing_explicit_config_is_an_error() {
		let dir = tempdir().unwrap();
		let missing = dir.path().join("absent.toml");
		let missing_arg = missing.to_string_lossy().into_owned();
		assert!(load(&cli(&["ctxmenu", "--no-config", "-c", &missing_arg])).is_err());
	}

	#[test]
	fn unknown_theme_is_rejected() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("theme.toml");
		fs::write(&path, "[ui]\ntheme = \"neon\"\n").unwrap();
		let path_arg = path.to_string_lossy().into_owned();
		let err = load(&cli(&["ctxmenu", "--no-config", "-c", &path_arg]))
			.err()
			.expect("unknown theme fails");
		assert!(err.to_string().contains("unknown theme 'neon'"));
	}

	#[test]
	fn verbose_flag_raises_log_level() {
		let resolved = load(&cli(&["ctxmenu", "--no-config", "-v"])).unwrap();
		assert_eq!(resolved.log.level, Level::DEBUG);
	}
}
