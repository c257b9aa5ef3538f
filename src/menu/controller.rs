use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::filter::{self, DEFAULT_DEBOUNCE, SearchFilter};
use super::payload::{ContextMenuPayload, ContextOption};
use crate::bridge::{HostBridge, HostEvent, HostRequest};
use crate::timer::Timer;

#[cfg(test)]
mod tests;

pub const DEFAULT_GRACE: Duration = Duration::from_millis(100);

/// Delays governing the menu's deferred work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTimings {
	/// Gap between hiding a visible menu and revealing its replacement.
	pub grace: Duration,
	/// Idle time after the last keystroke before the options are re-filtered.
	pub debounce: Duration,
}

impl Default for MenuTimings {
	fn default() -> Self {
		Self {
			grace: DEFAULT_GRACE,
			debounce: DEFAULT_DEBOUNCE,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
	Hidden,
	Visible,
}

/// What the menu currently shows.
#[derive(Debug, Default)]
struct UiState {
	visible: bool,
	current_menu: ContextMenuPayload,
	search_text: String,
	visible_options: Vec<usize>,
	revision: u64,
}

#[derive(Debug)]
struct PendingReveal {
	generation: u64,
	payload: ContextMenuPayload,
}

/// Token for the escape-key listener installed while the menu is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EscapeListener(u64);

/// Visibility and search state of a host-driven context menu.
///
/// All methods take the current instant from the caller; deferred work (the
/// fade-out grace period and the search debounce) runs when [`pump`] is called
/// with an instant past its deadline.
///
/// [`pump`]: ContextMenu::pump
pub struct ContextMenu<B: HostBridge> {
	bridge: B,
	timings: MenuTimings,
	state: UiState,
	filter: SearchFilter,
	reveal: Timer<PendingReveal>,
	generation: u64,
	escape_listener: Option<EscapeListener>,
	listeners_installed: u64,
	filter_passes: u64,
	torn_down: bool,
}

impl<B: HostBridge> ContextMenu<B> {
	pub fn new(bridge: B) -> Self {
		Self::with_timings(bridge, MenuTimings::default())
	}

	pub fn with_timings(bridge: B, timings: MenuTimings) -> Self {
		let mut state = UiState::default();
		state.visible_options = filter::filter_options(&state.current_menu.options, "");
		Self {
			bridge,
			timings,
			state,
			filter: SearchFilter::new(timings.debounce),
			reveal: Timer::new(),
			generation: 0,
			escape_listener: None,
			listeners_installed: 0,
			filter_passes: 0,
			torn_down: false,
		}
	}

	pub fn handle_host_event(&mut self, event: HostEvent, now: Instant) {
		match event {
			HostEvent::ShowContext(payload) => self.show(payload, now),
			HostEvent::HideContext => self.hide(),
		}
	}

	/// Display `payload`, fading out the current menu first when one is shown.
	///
	/// A show arriving while a previous reveal is still waiting replaces it and
	/// restarts the grace period, so the most recent request is the one that
	/// ends up on screen.
	pub fn show(&mut self, payload: ContextMenuPayload, now: Instant) {
		if self.torn_down {
			return;
		}
		self.generation = self.generation.wrapping_add(1);

		if !self.state.visible && !self.reveal.is_pending() {
			self.apply_menu(payload);
			return;
		}

		self.set_visible(false);
		let due = now + self.timings.grace;
		let replaced = self.reveal.schedule(
			due,
			PendingReveal {
				generation: self.generation,
				payload,
			},
		);
		debug!(
			generation = self.generation,
			replaced = replaced.is_some(),
			"fading out before revealing next menu"
		);
	}

	/// Host-initiated hide. Never reported back to the host.
	pub fn hide(&mut self) {
		if self.torn_down {
			return;
		}
		self.generation = self.generation.wrapping_add(1);
		if self.reveal.cancel().is_some() {
			debug!("hide cancelled a pending reveal");
		}
		self.set_visible(false);
	}

	/// User-initiated close, e.g. the header close button.
	///
	/// Returns whether the menu was closed. Menus with `canClose: false` and
	/// menus that are not visible ignore the request.
	pub fn close(&mut self) -> bool {
		if self.torn_down || !self.state.visible {
			return false;
		}
		if !self.state.current_menu.is_closable() {
			debug!("close refused: menu cannot be closed");
			return false;
		}
		self.set_visible(false);
		self.bridge.send(HostRequest::CloseContext);
		true
	}

	/// Escape key. Only reaches the menu while its listener is installed.
	pub fn handle_escape(&mut self) -> bool {
		if self.escape_listener.is_none() {
			trace!("escape ignored: no listener installed");
			return false;
		}
		self.close()
	}

	/// Ask the host to reopen the parent menu. Visibility is left to the
	/// `showContext` that follows, if any.
	pub fn go_back(&mut self) {
		if self.torn_down {
			return;
		}
		self.bridge.send(HostRequest::OpenContext {
			id: self.state.current_menu.menu.clone(),
			back: true,
		});
	}

	/// Press the option identified by `key`.
	///
	/// Disabled and read-only options do nothing. An option pointing at a
	/// submenu asks the host to open it; anything else is reported as a click.
	pub fn activate(&mut self, key: &str) -> bool {
		if self.torn_down || !self.state.visible {
			return false;
		}
		let Some(option) = self.state.current_menu.options.get(key) else {
			debug!(key, "activation for unknown option");
			return false;
		};
		if !option.is_interactive() {
			return false;
		}
		let request = match &option.menu {
			Some(menu) => HostRequest::OpenContext {
				id: Some(menu.clone()),
				back: false,
			},
			None => HostRequest::ClickContext { id: key.to_string() },
		};
		self.bridge.send(request);
		true
	}

	/// Record the search field's new contents and restart the debounce.
	pub fn set_search_text(&mut self, text: impl Into<String>, now: Instant) {
		if self.torn_down {
			return;
		}
		let text = text.into();
		if text == self.state.search_text {
			return;
		}
		self.state.search_text = text;
		self.filter
			.schedule(self.state.search_text.clone(), self.state.revision, now);
	}

	/// Run any deferred work that is due. Returns whether the state changed.
	pub fn pump(&mut self, now: Instant) -> bool {
		if self.torn_down {
			return false;
		}
		let mut changed = false;

		if let Some(reveal) = self.reveal.take_due(now) {
			if reveal.generation == self.generation {
				self.apply_menu(reveal.payload);
				changed = true;
			} else {
				trace!(generation = reveal.generation, "discarding superseded reveal");
			}
		}

		if let Some(query) = self.filter.take_due(now, self.state.revision) {
			self.refilter(&query);
			changed = true;
		}

		changed
	}

	/// The earliest instant at which [`pump`](Self::pump) has work to do.
	pub fn next_deadline(&self) -> Option<Instant> {
		match (self.reveal.deadline(), self.filter.deadline()) {
			(Some(reveal), Some(filter)) => Some(reveal.min(filter)),
			(reveal, filter) => reveal.or(filter),
		}
	}

	/// Stop reacting to anything. Pending filter work is dropped and the
	/// escape listener removed; a pending reveal may still fire but is ignored.
	pub fn teardown(&mut self) {
		if self.torn_down {
			return;
		}
		self.filter.cancel();
		self.remove_escape_listener();
		self.torn_down = true;
		debug!("context menu torn down");
	}

	pub fn is_torn_down(&self) -> bool {
		self.torn_down
	}

	pub fn is_visible(&self) -> bool {
		self.state.visible
	}

	pub fn visibility(&self) -> Visibility {
		if self.state.visible {
			Visibility::Visible
		} else {
			Visibility::Hidden
		}
	}

	/// Whether a replacement menu is waiting out the grace period.
	pub fn is_transitioning(&self) -> bool {
		self.reveal.is_pending()
	}

	pub fn current_menu(&self) -> &ContextMenuPayload {
		&self.state.current_menu
	}

	pub fn search_text(&self) -> &str {
		&self.state.search_text
	}

	/// Options surviving the last filter pass, in display order.
	pub fn visible_options(&self) -> impl Iterator<Item = (&str, &ContextOption)> {
		self.state
			.visible_options
			.iter()
			.filter_map(|&index| self.state.current_menu.options.get_index(index))
	}

	pub fn visible_len(&self) -> usize {
		self.state.visible_options.len()
	}

	pub fn visible_option_at(&self, position: usize) -> Option<(&str, &ContextOption)> {
		let index = *self.state.visible_options.get(position)?;
		self.state.current_menu.options.get_index(index)
	}

	/// Identifies the payload currently applied; bumps on every new menu.
	pub fn revision(&self) -> u64 {
		self.state.revision
	}

	pub fn timings(&self) -> MenuTimings {
		self.timings
	}

	pub fn escape_listener_active(&self) -> bool {
		self.escape_listener.is_some()
	}

	/// How many times the escape listener has been installed.
	pub fn escape_listener_installs(&self) -> u64 {
		self.listeners_installed
	}

	/// How many filter passes have run, including the ones on new menus.
	pub fn filter_passes(&self) -> u64 {
		self.filter_passes
	}

	pub fn bridge(&self) -> &B {
		&self.bridge
	}

	pub fn bridge_mut(&mut self) -> &mut B {
		&mut self.bridge
	}

	/// Swap in a new payload together with an empty search in one step.
	fn apply_menu(&mut self, payload: ContextMenuPayload) {
		self.filter.cancel();
		self.state.current_menu = payload;
		self.state.search_text.clear();
		self.state.revision = self.state.revision.wrapping_add(1);
		self.refilter("");
		self.set_visible(true);
		debug!(
			revision = self.state.revision,
			options = self.state.current_menu.options.len(),
			"menu shown"
		);
	}

	fn refilter(&mut self, query: &str) {
		self.state.visible_options = filter::filter_options(&self.state.current_menu.options, query);
		self.filter_passes += 1;
		trace!(
			query,
			matched = self.state.visible_options.len(),
			"filter pass"
		);
	}

	fn set_visible(&mut self, visible: bool) {
		self.state.visible = visible;
		if visible {
			self.install_escape_listener();
		} else {
			self.remove_escape_listener();
		}
	}

	fn install_escape_listener(&mut self) {
		if self.escape_listener.is_some() {
			return;
		}
		self.listeners_installed += 1;
		self.escape_listener = Some(EscapeListener(self.listeners_installed));
		trace!(listener = self.listeners_installed, "escape listener installed");
	}

	fn remove_escape_listener(&mut self) {
		if let Some(EscapeListener(id)) = self.escape_listener.take() {
			trace!(listener = id, "escape listener removed");
		}
	}
}
