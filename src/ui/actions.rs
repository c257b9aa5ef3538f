use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::App;
use super::state::single_line_input;
use crate::bridge::HostBridge;

/// Whether the event loop should keep running after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Exit,
}

impl<'a, B: HostBridge> App<'a, B> {
	pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let alt = key.modifiers.contains(KeyModifiers::ALT);

		if ctrl && key.code == KeyCode::Char('c') {
			return Flow::Exit;
		}
		// Hidden menus swallow input.
		if !self.menu.is_visible() {
			return Flow::Continue;
		}

		match key.code {
			KeyCode::Esc => {
				self.menu.handle_escape();
			}
			KeyCode::Char('w') if ctrl => {
				self.menu.close();
			}
			KeyCode::Left if alt => {
				if self.menu.current_menu().has_back() {
					self.menu.go_back();
				}
			}
			KeyCode::Up => self.move_selection_up(),
			KeyCode::Down => self.move_selection_down(),
			KeyCode::Enter => {
				if let Some(key) = self.selected_key() {
					self.menu.activate(&key);
				}
			}
			_ => {
				if self.search_input.input(key) {
					self.on_search_edited(now);
				}
			}
		}
		Flow::Continue
	}

	fn on_search_edited(&mut self, now: Instant) {
		// Keep the field on one line even if the widget inserted a break.
		if self.search_input.lines().len() > 1 {
			self.search_input = single_line_input(self.search_text());
		}
		let text = self.search_text();
		self.menu.set_search_text(text, now);
	}

	fn move_selection_up(&mut self) {
		if let Some(selected) = self.list_state.selected()
			&& selected > 0
		{
			self.list_state.select(Some(selected - 1));
		}
	}

	fn move_selection_down(&mut self) {
		if let Some(selected) = self.list_state.selected()
			&& selected + 1 < self.menu.visible_len()
		{
			self.list_state.select(Some(selected + 1));
		}
	}
}
