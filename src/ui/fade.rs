use std::time::{Duration, Instant};

pub const DEFAULT_FADE: Duration = Duration::from_millis(100);

/// Opacity of the menu across visibility changes.
#[derive(Debug, Clone)]
pub(crate) struct Fade {
	duration: Duration,
	target: bool,
	changed_at: Option<Instant>,
}

impl Fade {
	pub(crate) fn new(duration: Duration) -> Self {
		Self {
			duration,
			target: false,
			changed_at: None,
		}
	}

	pub(crate) fn update(&mut self, visible: bool, now: Instant) {
		if visible != self.target {
			self.target = visible;
			self.changed_at = Some(now);
		}
	}

	/// 0.0 is fully hidden, 1.0 fully shown.
	pub(crate) fn opacity(&self, now: Instant) -> f32 {
		let Some(changed_at) = self.changed_at else {
			return if self.target { 1.0 } else { 0.0 };
		};
		let progress = if self.duration.is_zero() {
			1.0
		} else {
			(now.saturating_duration_since(changed_at).as_secs_f32()
				/ self.duration.as_secs_f32())
			.min(1.0)
		};
		if self.target { progress } else { 1.0 - progress }
	}

	pub(crate) fn is_settled(&self, now: Instant) -> bool {
		let opacity = self.opacity(now);
		opacity <= 0.0 || opacity >= 1.0
	}
}
