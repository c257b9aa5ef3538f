//! Debounced, case-insensitive substring search over menu options.

use std::time::{Duration, Instant};

use tracing::trace;

use super::payload::{ContextOption, MenuOptions};
use crate::timer::Timer;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Whether `option` survives `query`.
///
/// An empty query keeps everything, including options without any searchable
/// text. Otherwise the lowercased title or description must contain the
/// lowercased query.
pub fn option_matches(option: &ContextOption, query: &str) -> bool {
	if query.is_empty() {
		return true;
	}
	matches_needle(option, &query.to_lowercase())
}

fn matches_needle(option: &ContextOption, needle: &str) -> bool {
	contains_lowercase(option.title.as_deref(), needle)
		|| contains_lowercase(option.description.as_deref(), needle)
}

fn contains_lowercase(field: Option<&str>, needle: &str) -> bool {
	field.is_some_and(|text| text.to_lowercase().contains(needle))
}

/// Indices of the options matching `query`, in display order.
pub fn filter_options(options: &MenuOptions, query: &str) -> Vec<usize> {
	if query.is_empty() {
		return (0..options.len()).collect();
	}
	let needle = query.to_lowercase();
	options
		.iter()
		.enumerate()
		.filter(|(_, (_, option))| matches_needle(option, &needle))
		.map(|(index, _)| index)
		.collect()
}

#[derive(Debug)]
struct PendingPass {
	query: String,
	revision: u64,
}

/// Holds at most one pending filter pass.
///
/// Every keystroke replaces the pending pass, so a burst of typing yields a
/// single pass once input has been idle for the debounce delay. A pass is
/// tied to the option-set revision it was scheduled against and is dropped if
/// a different menu has been applied in the meantime.
#[derive(Debug)]
pub struct SearchFilter {
	debounce: Duration,
	pending: Timer<PendingPass>,
}

impl Default for SearchFilter {
	fn default() -> Self {
		Self::new(DEFAULT_DEBOUNCE)
	}
}

impl SearchFilter {
	pub fn new(debounce: Duration) -> Self {
		Self {
			debounce,
			pending: Timer::new(),
		}
	}

	pub fn debounce(&self) -> Duration {
		self.debounce
	}

	pub fn schedule(&mut self, query: impl Into<String>, revision: u64, now: Instant) {
		let query = query.into();
		if let Some(cancelled) = self.pending.schedule(
			now + self.debounce,
			PendingPass {
				query,
				revision,
			},
		) {
			trace!(query = %cancelled.query, "superseded pending filter pass");
		}
	}

	pub fn cancel(&mut self) {
		self.pending.cancel();
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_pending()
	}

	pub fn deadline(&self) -> Option<Instant> {
		self.pending.deadline()
	}

	/// Return the query to filter with once the debounce has elapsed, unless it
	/// was scheduled against another revision of the option set.
	pub fn take_due(&mut self, now: Instant, revision: u64) -> Option<String> {
		let pass = self.pending.take_due(now)?;
		if pass.revision != revision {
			trace!(
				scheduled = pass.revision,
				current = revision,
				"dropping stale filter pass"
			);
			return None;
		}
		Some(pass.query)
	}
}
