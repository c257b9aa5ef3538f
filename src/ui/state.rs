use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

use ratatui::style::Style;
use ratatui::widgets::ListState;
use tracing::info;
use tui_textarea::TextArea;

use super::fade::Fade;
use super::theme::Theme;
use crate::bridge::{HostBridge, HostEvent};
use crate::menu::{ContextMenu, MenuTimings};

const SEARCH_PLACEHOLDER: &str = "Search";

impl<'a, B: HostBridge> Drop for App<'a, B> {
	fn drop(&mut self) {
		self.menu.teardown();
	}
}

/// Terminal front end around a [`ContextMenu`].
pub struct App<'a, B: HostBridge> {
	pub menu: ContextMenu<B>,
	pub search_input: TextArea<'a>,
	pub list_state: ListState,
	pub theme: Theme,
	pub(crate) fade: Fade,
	seen_revision: u64,
	host_events: Option<Receiver<HostEvent>>,
}

impl<'a, B: HostBridge> App<'a, B> {
	pub fn new(bridge: B, timings: MenuTimings, fade: Duration) -> Self {
		let menu = ContextMenu::with_timings(bridge, timings);
		let seen_revision = menu.revision();
		Self {
			menu,
			search_input: new_search_input(),
			list_state: ListState::default(),
			theme: Theme::default(),
			fade: Fade::new(fade),
			seen_revision,
			host_events: None,
		}
	}

	pub fn set_theme(&mut self, theme: Theme) {
		self.theme = theme;
	}

	pub fn set_host_events(&mut self, events: Receiver<HostEvent>) {
		self.host_events = Some(events);
	}

	/// Advance everything time-driven: host events, deferred menu work, the
	/// search field and the fade.
	pub fn tick(&mut self, now: Instant) {
		self.pump_host_events(now);
		self.menu.pump(now);
		self.sync_with_menu();
		self.fade.update(self.menu.is_visible(), now);
	}

	pub(crate) fn pump_host_events(&mut self, now: Instant) {
		let Some(events) = &self.host_events else {
			return;
		};
		let mut disconnected = false;
		let mut received = Vec::new();
		loop {
			match events.try_recv() {
				Ok(event) => received.push(event),
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					disconnected = true;
					break;
				}
			}
		}
		for event in received {
			self.menu.handle_host_event(event, now);
		}
		if disconnected {
			info!("host event source closed");
			self.host_events = None;
		}
	}

	/// A newly applied menu starts with an empty search and the first option
	/// selected.
	fn sync_with_menu(&mut self) {
		if self.menu.revision() != self.seen_revision {
			self.seen_revision = self.menu.revision();
			self.search_input = new_search_input();
			self.list_state.select(Some(0));
		}
		let len = self.menu.visible_len();
		match self.list_state.selected() {
			_ if len == 0 => self.list_state.select(None),
			Some(selected) if selected >= len => self.list_state.select(Some(len - 1)),
			None => self.list_state.select(Some(0)),
			_ => {}
		}
	}

	pub fn search_text(&self) -> String {
		self.search_input.lines().concat()
	}

	pub fn selected_key(&self) -> Option<String> {
		let position = self.list_state.selected()?;
		self.menu
			.visible_option_at(position)
			.map(|(key, _)| key.to_string())
	}
}

pub(crate) fn new_search_input<'a>() -> TextArea<'a> {
	let mut input = TextArea::default();
	input.set_placeholder_text(SEARCH_PLACEHOLDER);
	input.set_cursor_line_style(Style::default());
	input
}

pub(crate) fn single_line_input<'a>(text: String) -> TextArea<'a> {
	let mut input = TextArea::new(vec![text]);
	input.set_placeholder_text(SEARCH_PLACEHOLDER);
	input.set_cursor_line_style(Style::default());
	input.move_cursor(tui_textarea::CursorMove::End);
	input
}
