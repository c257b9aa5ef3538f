//! Single-slot deferred continuations polled from the event loop.
//!
//! A [`Timer`] holds at most one pending value together with the instant it
//! becomes due. Scheduling a new value cancels whatever was pending, which is
//! the behaviour both the search debounce and the fade-out grace period need.

use std::time::Instant;

#[derive(Debug)]
struct Scheduled<T> {
	due: Instant,
	value: T,
}

/// A cancellable scheduled callback payload.
#[derive(Debug)]
pub struct Timer<T> {
	pending: Option<Scheduled<T>>,
}

impl<T> Default for Timer<T> {
	fn default() -> Self {
		Self { pending: None }
	}
}

impl<T> Timer<T> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Schedule `value` to become due at `due`, returning the value that was
	/// cancelled to make room for it.
	pub fn schedule(&mut self, due: Instant, value: T) -> Option<T> {
		self.pending
			.replace(Scheduled { due, value })
			.map(|cancelled| cancelled.value)
	}

	pub fn cancel(&mut self) -> Option<T> {
		self.pending.take().map(|cancelled| cancelled.value)
	}

	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	pub fn deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|scheduled| scheduled.due)
	}

	/// Remove and return the pending value once `now` has reached its deadline.
	pub fn take_due(&mut self, now: Instant) -> Option<T> {
		match &self.pending {
			Some(scheduled) if scheduled.due <= now => self.cancel(),
			_ => None,
		}
	}
}
