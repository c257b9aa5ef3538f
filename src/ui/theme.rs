use ratatui::style::{Color, Modifier, Style};

const NAMES: &[&str] = &["dark", "light"];

/// Styles used to draw the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	pub border: Style,
	pub title: Style,
	pub control: Style,
	pub control_disabled: Style,
	pub option_title: Style,
	pub option_description: Style,
	pub metadata: Style,
	pub disabled: Style,
	pub highlight: Style,
	pub empty: Style,
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}

impl Theme {
	pub fn dark() -> Self {
		Self {
			border: Style::new().fg(Color::DarkGray),
			title: Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
			control: Style::new().fg(Color::Cyan),
			control_disabled: Style::new().fg(Color::DarkGray),
			option_title: Style::new().fg(Color::White),
			option_description: Style::new().fg(Color::Gray),
			metadata: Style::new().fg(Color::DarkGray),
			disabled: Style::new().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
			highlight: Style::new().bg(Color::Rgb(44, 46, 51)),
			empty: Style::new().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
		}
	}

	pub fn light() -> Self {
		Self {
			border: Style::new().fg(Color::Gray),
			title: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
			control: Style::new().fg(Color::Blue),
			control_disabled: Style::new().fg(Color::Gray),
			option_title: Style::new().fg(Color::Black),
			option_description: Style::new().fg(Color::DarkGray),
			metadata: Style::new().fg(Color::Gray),
			disabled: Style::new().fg(Color::Gray).add_modifier(Modifier::CROSSED_OUT),
			highlight: Style::new().bg(Color::Rgb(225, 228, 232)),
			empty: Style::new().fg(Color::Gray).add_modifier(Modifier::ITALIC),
		}
	}

	pub fn by_name(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"dark" => Some(Self::dark()),
			"light" => Some(Self::light()),
			_ => None,
		}
	}

	pub fn names() -> &'static [&'static str] {
		NAMES
	}

	/// Dim every style while the menu is mid-fade.
	pub fn faded(self) -> Self {
		let dim = |style: Style| style.add_modifier(Modifier::DIM);
		Self {
			border: dim(self.border),
			title: dim(self.title),
			control: dim(self.control),
			control_disabled: dim(self.control_disabled),
			option_title: dim(self.option_title),
			option_description: dim(self.option_description),
			metadata: dim(self.metadata),
			disabled: dim(self.disabled),
			highlight: self.highlight,
			empty: dim(self.empty),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn every_listed_name_resolves() {
		for name in Theme::names() {
			assert!(Theme::by_name(name).is_some(), "{name} should resolve");
		}
		assert_eq!(Theme::by_name(" Light "), Some(Theme::light()));
		assert_eq!(Theme::by_name("solarized"), None);
	}
}
