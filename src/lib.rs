//! Host-driven searchable context menu.
//!
//! A host pushes [`HostEvent`]s describing which menu to show; the
//! [`ContextMenu`] controller tracks visibility, search filtering and the
//! fade-out grace period between menus, and reports user actions back through
//! a [`HostBridge`]. The [`ui`] module renders the menu in a terminal.

pub mod app_dirs;
pub mod bridge;
pub mod logging;
pub mod menu;
pub mod timer;
pub mod ui;

pub use bridge::{HostBridge, HostEvent, HostRequest, JsonLinesBridge, RecordingBridge};
pub use menu::{
	ContextMenu, ContextMenuPayload, ContextOption, MenuOptions, MenuTimings, MetadataEntry,
	Visibility,
};
pub use ui::{App, RunOptions, Theme, run};
