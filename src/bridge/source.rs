use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use tracing::{debug, warn};

use super::{BridgeError, HostEvent};

/// Read host events from `reader` on a background thread.
///
/// Blank lines are ignored and undecodable lines are logged and skipped. The
/// thread stops at end of input, on a read error, or once the returned
/// receiver has been dropped.
pub fn spawn_event_reader<R>(reader: R) -> Receiver<HostEvent>
where
	R: BufRead + Send + 'static,
{
	let (tx, rx) = mpsc::channel();
	thread::spawn(move || {
		for (index, line) in reader.lines().enumerate() {
			let line = match line {
				Ok(line) => line,
				Err(err) => {
					warn!("host event stream failed: {err}");
					break;
				}
			};
			if line.trim().is_empty() {
				continue;
			}
			match HostEvent::from_json_line(&line) {
				Ok(event) => {
					debug!(event = event.name(), line = index + 1, "received host event");
					if tx.send(event).is_err() {
						break;
					}
				}
				Err(err) => warn!(line = index + 1, "skipping host event: {err}"),
			}
		}
		debug!("host event stream closed");
	});
	rx
}

/// Open a file or FIFO and stream its events.
pub fn open_event_source(path: &Path) -> Result<Receiver<HostEvent>, BridgeError> {
	let file = File::open(path)?;
	Ok(spawn_event_reader(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
	use std::io::{Cursor, Write};

	use super::*;

	#[test]
	fn reader_skips_blank_and_malformed_lines() {
		let input = concat!(
			r#"{"action":"showContext","data":{"title":"A"}}"#,
			"\n\n",
			"not json\n",
			r#"{"action":"hideContext"}"#,
			"\n"
		);
		let rx = spawn_event_reader(Cursor::new(input.to_string()));
		let events: Vec<_> = rx.iter().collect();
		assert_eq!(events.len(), 2);
		assert_eq!(events[0].name(), "showContext");
		assert_eq!(events[1], HostEvent::HideContext);
	}

	#[test]
	fn events_can_come_from_a_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, r#"{{"action":"hideContext"}}"#).unwrap();
		let rx = open_event_source(file.path()).unwrap();
		assert_eq!(rx.iter().collect::<Vec<_>>(), [HostEvent::HideContext]);
	}

	#[test]
	fn missing_file_is_reported() {
		let err = open_event_source(Path::new("/nonexistent/ctxmenu-events")).unwrap_err();
		assert!(matches!(err, BridgeError::Io(_)));
	}
}
