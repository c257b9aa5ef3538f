use clap::ValueEnum;

/// Built-in themes selectable from the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ThemeArg {
	Dark,
	Light,
}

impl ThemeArg {
	/// Name understood by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		match self {
			ThemeArg::Dark => "dark",
			ThemeArg::Light => "light",
		}
	}
}
