use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser};

use super::options::ThemeArg;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `ctxmenu` binary.
#[derive(Parser, Debug)]
#[command(
	name = "ctxmenu",
	version,
	long_version = long_version(),
	about = "Searchable context menu driven by a host over JSON lines",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "CTXMENU_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'e',
		long,
		value_name = "FILE",
		help = "Read host events (one JSON object per line) from a file or FIFO (default: none)"
	)]
	pub(crate) events: Option<PathBuf>,
	#[arg(
		short = 'r',
		long,
		value_name = "FILE",
		help = "Append host requests as JSON lines to this file (default: discard)"
	)]
	pub(crate) requests: Option<PathBuf>,
	#[arg(
		short = 's',
		long,
		value_name = "FILE",
		help = "Show the menu payload in this JSON file on startup (default: none)"
	)]
	pub(crate) show: Option<PathBuf>,
	#[arg(
		long = "debounce-ms",
		value_name = "MS",
		help = "Idle time before the search re-filters options (default: 500)"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long = "grace-ms",
		value_name = "MS",
		help = "Pause between hiding one menu and showing the next (default: 100)"
	)]
	pub(crate) grace_ms: Option<u64>,
	#[arg(
		long = "fade-ms",
		value_name = "MS",
		help = "Length of the fade animation (default: 100)"
	)]
	pub(crate) fade_ms: Option<u64>,
	#[arg(long, value_enum, help = "Select a theme (default: dark)")]
	pub(crate) theme: Option<ThemeArg>,
	#[arg(
		long = "log-file",
		value_name = "FILE",
		help = "Write logs to this file (default: data directory)"
	)]
	pub(crate) log_file: Option<PathBuf>,
	#[arg(
		short = 'v',
		long,
		help = "Log at debug level (default: warn)"
	)]
	pub(crate) verbose: bool,
	#[arg(long = "print-config", help = "Print the effective configuration before starting")]
	pub(crate) print_config: bool,
	#[arg(long = "list-themes", help = "List available themes and exit")]
	pub(crate) list_themes: bool,
}
