use std::time::{Duration, Instant};

use super::*;
use crate::bridge::RecordingBridge;
use crate::menu::MenuOptions;

fn ms(value: u64) -> Duration {
	Duration::from_millis(value)
}

fn payload_with(title: &str, keys: &[&str]) -> ContextMenuPayload {
	let options: MenuOptions = keys
		.iter()
		.map(|key| (*key, ContextOption::titled(key.to_uppercase())))
		.collect();
	ContextMenuPayload::new(title, options)
}

fn vehicle() -> ContextMenuPayload {
	let options: MenuOptions = [
		("a", ContextOption::titled("Lock")),
		("b", ContextOption::titled("Unlock")),
		("c", ContextOption::described("toggle lock state")),
	]
	.into_iter()
	.collect();
	ContextMenuPayload::new("Vehicle", options)
}

fn visible_keys(menu: &ContextMenu<RecordingBridge>) -> Vec<String> {
	menu.visible_options().map(|(key, _)| key.to_string()).collect()
}

#[test]
fn starts_hidden_with_placeholder() {
	let menu = ContextMenu::new(RecordingBridge::new());
	assert_eq!(menu.visibility(), Visibility::Hidden);
	assert!(menu.current_menu().title.is_empty());
	assert_eq!(menu.visible_len(), 0);
	assert!(!menu.escape_listener_active());
	assert_eq!(menu.next_deadline(), None);
}

#[test]
fn show_while_hidden_is_immediate() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(vehicle(), t0);

	assert!(menu.is_visible());
	assert_eq!(menu.current_menu().title, "Vehicle");
	assert_eq!(visible_keys(&menu), ["a", "b", "c"]);
	assert!(menu.escape_listener_active());
	assert!(!menu.is_transitioning());
}

#[test]
fn show_while_visible_fades_out_first() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(menu_a(), t0);
	menu.set_search_text("x", t0);
	assert!(menu.pump(t0 + ms(600)));

	let t1 = t0 + ms(1000);
	menu.show(menu_b(), t1);
	assert!(!menu.is_visible());
	assert_eq!(menu.current_menu().title, "A");
	assert_eq!(menu.next_deadline(), Some(t1 + DEFAULT_GRACE));

	assert!(!menu.pump(t1 + ms(99)));
	assert!(!menu.is_visible());

	assert!(menu.pump(t1 + DEFAULT_GRACE));
	assert!(menu.is_visible());
	assert_eq!(menu.current_menu().title, "B");
	assert_eq!(menu.search_text(), "");
	assert_eq!(visible_keys(&menu), ["b1", "b2"]);
}

fn menu_a() -> ContextMenuPayload {
	payload_with("A", &["a1"])
}

fn menu_b() -> ContextMenuPayload {
	payload_with("B", &["b1", "b2"])
}

#[test]
fn latest_show_during_grace_wins() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(menu_a(), t0);
	menu.show(menu_b(), t0 + ms(10));
	menu.show(payload_with("C", &["c1"]), t0 + ms(60));

	assert!(!menu.pump(t0 + ms(110)));
	assert!(!menu.is_visible());

	assert!(menu.pump(t0 + ms(160)));
	assert_eq!(menu.current_menu().title, "C");
	assert!(menu.is_visible());

	assert!(!menu.pump(t0 + ms(1000)));
	assert_eq!(menu.current_menu().title, "C");
}

#[test]
fn hide_sends_nothing_and_cancels_pending_reveal() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(menu_a(), t0);
	menu.show(menu_b(), t0);
	menu.handle_host_event(HostEvent::HideContext, t0 + ms(50));

	assert!(!menu.pump(t0 + ms(500)));
	assert!(!menu.is_visible());
	assert_eq!(menu.current_menu().title, "A");
	assert!(menu.bridge().requests().is_empty());
}

#[test]
fn escape_closes_and_notifies_once() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(vehicle(), t0);

	assert!(menu.handle_escape());
	assert!(!menu.is_visible());
	assert!(!menu.escape_listener_active());
	assert!(!menu.handle_escape());
	assert_eq!(menu.bridge().requests(), [HostRequest::CloseContext]);
}

#[test]
fn escape_is_ignored_while_hidden() {
	let mut menu = ContextMenu::new(RecordingBridge::new());
	assert!(!menu.handle_escape());
	assert!(!menu.close());
	assert!(menu.bridge().requests().is_empty());
}

#[test]
fn modal_menu_refuses_close() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	let mut payload = vehicle();
	payload.can_close = Some(false);
	menu.show(payload, t0);

	assert!(!menu.handle_escape());
	assert!(!menu.close());
	assert!(menu.is_visible());
	assert!(menu.escape_listener_active());
	assert!(menu.bridge().requests().is_empty());

	menu.hide();
	assert!(!menu.is_visible());
	assert!(menu.bridge().requests().is_empty());
}

#[test]
fn explicit_can_close_true_closes() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	let mut payload = vehicle();
	payload.can_close = Some(true);
	menu.show(payload, t0);
	assert!(menu.close());
	assert_eq!(menu.bridge().requests(), [HostRequest::CloseContext]);
}

#[test]
fn back_requests_parent_without_hiding() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	let mut payload = vehicle();
	payload.menu = Some("garage".into());
	menu.show(payload, t0);

	menu.go_back();
	assert!(menu.is_visible());
	assert_eq!(
		menu.bridge().requests(),
		[HostRequest::OpenContext {
			id: Some("garage".into()),
			back: true,
		}]
	);

	menu.show(vehicle(), t0 + ms(5));
	menu.pump(t0 + ms(200));
	menu.go_back();
	assert_eq!(
		menu.bridge_mut().take().last(),
		Some(&HostRequest::OpenContext { id: None, back: true })
	);
}

#[test]
fn search_is_debounced() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(vehicle(), t0);
	let passes = menu.filter_passes();

	for (step, text) in ["t", "to", "tog", "toggle"].iter().enumerate() {
		menu.set_search_text(*text, t0 + ms(step as u64 * 200));
	}
	let last = t0 + ms(600);
	assert!(!menu.pump(last + ms(499)));
	assert_eq!(visible_keys(&menu), ["a", "b", "c"]);

	assert!(menu.pump(last + DEFAULT_DEBOUNCE));
	assert_eq!(visible_keys(&menu), ["c"]);
	assert_eq!(menu.filter_passes(), passes + 1);

	menu.set_search_text("lock", last + ms(600));
	menu.pump(last + ms(1100));
	assert_eq!(visible_keys(&menu), ["a", "b", "c"]);
}

#[test]
fn new_menu_discards_pending_search() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(vehicle(), t0);
	menu.set_search_text("toggle", t0 + ms(10));

	menu.hide();
	menu.show(menu_b(), t0 + ms(20));
	assert_eq!(menu.search_text(), "");
	assert_eq!(visible_keys(&menu), ["b1", "b2"]);

	menu.pump(t0 + ms(2000));
	assert_eq!(visible_keys(&menu), ["b1", "b2"]);
}

#[test]
fn activation_routes_by_option_kind() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	let options: MenuOptions = [
		("plain", ContextOption::titled("Plain")),
		(
			"sub",
			ContextOption {
				menu: Some("submenu".into()),
				..ContextOption::titled("Sub")
			},
		),
		(
			"off",
			ContextOption {
				disabled: true,
				..ContextOption::titled("Off")
			},
		),
		(
			"ro",
			ContextOption {
				read_only: true,
				..ContextOption::titled("Info")
			},
		),
	]
	.into_iter()
	.collect();
	menu.show(ContextMenuPayload::new("Kinds", options), t0);

	assert!(menu.activate("plain"));
	assert!(menu.activate("sub"));
	assert!(!menu.activate("off"));
	assert!(!menu.activate("ro"));
	assert!(!menu.activate("missing"));
	assert_eq!(
		menu.bridge().requests(),
		[
			HostRequest::ClickContext { id: "plain".into() },
			HostRequest::OpenContext {
				id: Some("submenu".into()),
				back: false,
			},
		]
	);
}

#[test]
fn escape_listener_is_installed_once_per_visible_period() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(menu_a(), t0);
	menu.show(menu_b(), t0 + ms(1));
	menu.pump(t0 + ms(200));
	menu.close();

	assert_eq!(menu.escape_listener_installs(), 2);
	assert!(!menu.escape_listener_active());
}

#[test]
fn teardown_makes_deferred_work_inert() {
	let t0 = Instant::now();
	let mut menu = ContextMenu::new(RecordingBridge::new());
	menu.show(menu_a(), t0);
	menu.set_search_text("a", t0);
	menu.show(menu_b(), t0 + ms(1));
	menu.teardown();

	assert!(!menu.escape_listener_active());
	assert!(!menu.pump(t0 + ms(5000)));
	assert_eq!(menu.current_menu().title, "A");
	assert!(!menu.handle_escape());
	menu.show(menu_a(), t0 + ms(6000));
	assert!(!menu.is_visible());
	assert!(menu.bridge().requests().is_empty());
}
