//! Transport between the menu and the host that drives it.
//!
//! Inbound traffic is a stream of [`HostEvent`]s, outbound traffic a stream of
//! [`HostRequest`]s. Both travel as one JSON document per line. Requests are
//! fire-and-forget: a [`HostBridge`] never reports failure back to the menu.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::menu::ContextMenuPayload;

mod error;
mod source;

pub use error::BridgeError;
pub use source::{open_event_source, spawn_event_reader};

/// An event pushed by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "camelCase")]
pub enum HostEvent {
	ShowContext(ContextMenuPayload),
	HideContext,
}

impl HostEvent {
	pub fn name(&self) -> &'static str {
		match self {
			Self::ShowContext(_) => "showContext",
			Self::HideContext => "hideContext",
		}
	}

	pub fn from_json_line(line: &str) -> Result<Self, BridgeError> {
		serde_json::from_str(line.trim()).map_err(|source| BridgeError::Decode { source })
	}
}

/// A request sent to the host in response to user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "request", content = "body", rename_all = "camelCase")]
pub enum HostRequest {
	/// Open another menu. `back` marks a back-navigation so the host can pop
	/// its own navigation stack.
	OpenContext {
		#[serde(default, skip_serializing_if = "Option::is_none")]
		id: Option<String>,
		back: bool,
	},
	/// The user dismissed the menu.
	CloseContext,
	/// The user pressed the option with this key.
	ClickContext { id: String },
}

impl HostRequest {
	pub fn name(&self) -> &'static str {
		match self {
			Self::OpenContext { .. } => "openContext",
			Self::CloseContext => "closeContext",
			Self::ClickContext { .. } => "clickContext",
		}
	}

	pub fn to_json_line(&self) -> Result<String, BridgeError> {
		let mut line =
			serde_json::to_string(self).map_err(|source| BridgeError::Encode { source })?;
		line.push('\n');
		Ok(line)
	}
}

/// Delivery of requests to the host.
///
/// Implementations must not block for long and must swallow their own
/// failures; the menu treats every request as best effort.
pub trait HostBridge {
	fn send(&mut self, request: HostRequest);
}

impl<B: HostBridge + ?Sized> HostBridge for &mut B {
	fn send(&mut self, request: HostRequest) {
		(**self).send(request);
	}
}

impl<B: HostBridge + ?Sized> HostBridge for Box<B> {
	fn send(&mut self, request: HostRequest) {
		(**self).send(request);
	}
}

/// Writes each request as a JSON line to the wrapped writer.
pub struct JsonLinesBridge<W: Write> {
	writer: W,
}

impl<W: Write> JsonLinesBridge<W> {
	pub fn new(writer: W) -> Self {
		Self { writer }
	}

	pub fn into_inner(self) -> W {
		self.writer
	}

	fn write_line(&mut self, request: &HostRequest) -> Result<(), BridgeError> {
		let line = request.to_json_line()?;
		self.writer.write_all(line.as_bytes())?;
		self.writer.flush()?;
		Ok(())
	}
}

impl<W: Write> HostBridge for JsonLinesBridge<W> {
	fn send(&mut self, request: HostRequest) {
		match self.write_line(&request) {
			Ok(()) => debug!(request = request.name(), "sent host request"),
			Err(err) => warn!(request = request.name(), "host request dropped: {err}"),
		}
	}
}

/// Keeps every request in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingBridge {
	requests: Vec<HostRequest>,
}

impl RecordingBridge {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn requests(&self) -> &[HostRequest] {
		&self.requests
	}

	pub fn take(&mut self) -> Vec<HostRequest> {
		std::mem::take(&mut self.requests)
	}
}

impl HostBridge for RecordingBridge {
	fn send(&mut self, request: HostRequest) {
		debug!(request = request.name(), "recorded host request");
		self.requests.push(request);
	}
}
