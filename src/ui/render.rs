use std::time::Instant;

use ratatui::{
	Frame,
	layout::{Alignment, Constraint, Direction, Layout, Rect},
	text::{Line, Span},
	widgets::{Block, Clear, List, ListItem, Paragraph},
};
use unicode_width::UnicodeWidthChar;

use super::App;
use super::theme::Theme;
use crate::bridge::HostBridge;
use crate::menu::ContextOption;

const MENU_WIDTH: u16 = 44;
const HEADER_HEIGHT: u16 = 3;
const SEARCH_HEIGHT: u16 = 3;
const PROGRESS_CELLS: usize = 10;

impl<'a, B: HostBridge> App<'a, B> {
	pub fn draw(&mut self, frame: &mut Frame, now: Instant) {
		let opacity = self.fade.opacity(now);
		if opacity <= 0.0 {
			return;
		}
		let theme = if self.fade.is_settled(now) {
			self.theme
		} else {
			self.theme.faded()
		};

		let area = menu_area(frame.area());
		frame.render_widget(Clear, area);
		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([
				Constraint::Length(HEADER_HEIGHT),
				Constraint::Length(SEARCH_HEIGHT),
				Constraint::Min(1),
			])
			.split(area);

		self.render_header(frame, layout[0], &theme);
		self.render_search(frame, layout[1], &theme);
		self.render_options(frame, layout[2], &theme);
	}

	fn render_header(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
		let menu = self.menu.current_menu();
		let back_width = if menu.has_back() { 5 } else { 0 };
		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([
				Constraint::Length(back_width),
				Constraint::Min(1),
				Constraint::Length(5),
			])
			.split(area);

		if menu.has_back() {
			let back = Paragraph::new("<")
				.alignment(Alignment::Center)
				.style(theme.control)
				.block(Block::bordered().border_style(theme.border));
			frame.render_widget(back, columns[0]);
		}

		let title_width = columns[1].width.saturating_sub(2) as usize;
		let title = Paragraph::new(truncate_to_width(&menu.title, title_width))
			.alignment(Alignment::Center)
			.style(theme.title)
			.block(Block::bordered().border_style(theme.border));
		frame.render_widget(title, columns[1]);

		let close_style = if menu.is_closable() {
			theme.control
		} else {
			theme.control_disabled
		};
		let close = Paragraph::new("x")
			.alignment(Alignment::Center)
			.style(close_style)
			.block(Block::bordered().border_style(theme.border));
		frame.render_widget(close, columns[2]);
	}

	fn render_search(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
		self.search_input
			.set_block(Block::bordered().border_style(theme.border));
		frame.render_widget(&self.search_input, area);
	}

	fn render_options(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
		let block = Block::bordered().border_style(theme.border);
		if self.menu.visible_len() == 0 {
			let empty = Paragraph::new("No options")
				.alignment(Alignment::Center)
				.style(theme.empty)
				.block(block);
			frame.render_widget(empty, area);
			return;
		}

		let width = area.width.saturating_sub(2) as usize;
		let items: Vec<ListItem> = self
			.menu
			.visible_options()
			.map(|(key, option)| option_item(key, option, width, theme))
			.collect();
		let list = List::new(items)
			.block(block)
			.highlight_style(theme.highlight);
		frame.render_stateful_widget(list, area, &mut self.list_state);
	}
}

fn menu_area(area: Rect) -> Rect {
	let width = MENU_WIDTH.min(area.width);
	Rect {
		x: area.x + (area.width - width) / 2,
		y: area.y,
		width,
		height: area.height,
	}
}

/// Draws one option: title, description, metadata and progress.
fn option_item<'t>(key: &str, option: &ContextOption, width: usize, theme: &Theme) -> ListItem<'t> {
	let (title_style, text_style) = if option.disabled {
		(theme.disabled, theme.disabled)
	} else {
		(theme.option_title, theme.option_description)
	};

	let mut lines = Vec::new();
	let has_arrow = option.arrow || option.menu.is_some();
	let arrow_width = if has_arrow { 2 } else { 0 };
	let title = option.title.as_deref().unwrap_or(key);
	let mut heading = vec![Span::styled(
		truncate_to_width(title, width.saturating_sub(arrow_width)),
		title_style,
	)];
	if has_arrow {
		heading.push(Span::styled(" >", theme.control));
	}
	lines.push(Line::from(heading));

	if let Some(description) = option.description.as_deref() {
		lines.push(Line::styled(truncate_to_width(description, width), text_style));
	}
	for entry in option.metadata_view() {
		let text = match &entry.value {
			Some(value) => format!("{}: {value}", entry.label),
			None => entry.label.clone(),
		};
		lines.push(Line::styled(truncate_to_width(&text, width), theme.metadata));
		if let Some(progress) = entry.progress {
			lines.push(Line::styled(progress_bar(progress), theme.metadata));
		}
	}
	if let Some(progress) = option.progress {
		lines.push(Line::styled(progress_bar(progress), text_style));
	}
	ListItem::new(lines)
}

fn progress_bar(percent: f64) -> String {
	let clamped = percent.clamp(0.0, 100.0);
	let filled = ((clamped / 100.0) * PROGRESS_CELLS as f64).round() as usize;
	format!(
		"[{}{}] {clamped:.0}%",
		"#".repeat(filled),
		".".repeat(PROGRESS_CELLS - filled)
	)
}

/// Cut `text` to at most `max` display columns, marking the cut with `…`.
pub(crate) fn truncate_to_width(text: &str, max: usize) -> String {
	let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
	if total <= max {
		return text.to_string();
	}
	if max == 0 {
		return String::new();
	}
	let mut used = 0;
	let mut out = String::new();
	for ch in text.chars() {
		let width = ch.width().unwrap_or(0);
		if used + width + 1 > max {
			break;
		}
		used += width;
		out.push(ch);
	}
	out.push('…');
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn truncation_respects_display_width() {
		assert_eq!(truncate_to_width("short", 10), "short");
		assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
		assert_eq!(truncate_to_width("車車車", 4), "車…");
		assert_eq!(truncate_to_width("abc", 0), "");
	}

	#[test]
	fn progress_bar_is_clamped() {
		assert_eq!(progress_bar(50.0), "[#####.....] 50%");
		assert_eq!(progress_bar(140.0), "[##########] 100%");
		assert_eq!(progress_bar(-3.0), "[..........] 0%");
	}
}
