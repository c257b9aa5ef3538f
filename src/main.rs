mod cli;
mod settings;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use cli::parse_cli;
use ctxmenu::bridge::open_event_source;
use ctxmenu::{ContextMenuPayload, HostBridge, JsonLinesBridge, RunOptions, Theme, logging};
use settings::ResolvedConfig;
use tracing::info;

fn main() -> Result<()> {
	let cli = parse_cli();

	if cli.list_themes {
		for name in Theme::names() {
			println!("{name}");
		}
		return Ok(());
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	logging::initialize(&resolved.log)?;
	run_menu(resolved)
}

/// Wire the configured host transport to the terminal menu and run it.
fn run_menu(settings: ResolvedConfig) -> Result<()> {
	let initial_menu = settings
		.show
		.as_deref()
		.map(read_payload)
		.transpose()?;

	// Opening a FIFO blocks until the host connects its writing end.
	let host_events = match settings.events.as_deref() {
		Some(path) => Some(
			open_event_source(path)
				.with_context(|| format!("failed to open host events {}", path.display()))?,
		),
		None => None,
	};

	let bridge: Box<dyn HostBridge> = match settings.requests.as_deref() {
		Some(path) => Box::new(JsonLinesBridge::new(open_requests(path)?)),
		None => Box::new(JsonLinesBridge::new(io::sink())),
	};

	info!(
		events = host_events.is_some(),
		initial = initial_menu.is_some(),
		"starting context menu"
	);
	ctxmenu::run(
		bridge,
		host_events,
		RunOptions {
			timings: settings.timings,
			fade: settings.fade,
			theme: settings.theme,
			initial_menu,
		},
	)
}

fn read_payload(path: &Path) -> Result<ContextMenuPayload> {
	let text = fs::read_to_string(path)
		.with_context(|| format!("failed to read menu payload {}", path.display()))?;
	serde_json::from_str(&text)
		.with_context(|| format!("failed to parse menu payload {}", path.display()))
}

fn open_requests(path: &Path) -> Result<fs::File> {
	OpenOptions::new()
		.create(true)
		.append(true)
		.open(path)
		.with_context(|| format!("failed to open host requests {}", path.display()))
}
