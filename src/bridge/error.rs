use std::io;

use thiserror::Error;

/// Failures while moving events and requests across the host boundary.
#[derive(Debug, Error)]
pub enum BridgeError {
	/// An inbound line could not be decoded into a known event.
	#[error("malformed host event: {source}")]
	Decode {
		#[source]
		source: serde_json::Error,
	},

	/// An outbound request could not be encoded.
	#[error("failed to encode host request: {source}")]
	Encode {
		#[source]
		source: serde_json::Error,
	},

	#[error("host transport error: {0}")]
	Io(#[from] io::Error),
}
