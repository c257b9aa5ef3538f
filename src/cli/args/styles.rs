use std::fmt::Write;

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use ctxmenu::app_dirs;

/// Version banner listing the directories the binary reads and writes.
pub(super) fn long_version() -> &'static str {
	let config_dir = match app_dirs::get_config_dir() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};
	let log_file = match app_dirs::default_log_file() {
		Ok(path) => path.display().to_string(),
		Err(err) => format!("unavailable ({err})"),
	};

	let mut details = format!("ctxmenu {}", env!("CARGO_PKG_VERSION"));
	let _ = writeln!(details);
	let _ = writeln!(details, "config directory: {config_dir}");
	let _ = writeln!(details, "log file: {log_file}");

	Box::leak(details.into_boxed_str())
}

pub(super) fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Yellow.on_default())
}
