//! Per-node zoom animation.
//!
//! Every node is either at rest or moving between two extents. A single
//! animation-frame callback advances all nodes with the same clock, so no
//! node-level timers exist.

use super::partition::Extent;

/// Default zoom duration in milliseconds.
pub const DURATION_MS: f64 = 750.0;

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0) * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

/// Eased progress of a transition started at `started_at`, or `None` once
/// finished.
pub fn progress(started_at: f64, now: f64, duration: f64) -> Option<f64> {
	let elapsed = now - started_at;
	if duration <= 0.0 || elapsed >= duration {
		None
	} else {
		Some(ease_cubic_in_out(elapsed / duration))
	}
}

/// Animation state of one node's extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
	/// At rest.
	Idle(Extent),
	/// Interpolating from `from` to `to` since `started_at` (ms).
	Transitioning {
		/// Extent when the transition began.
		from: Extent,
		/// Extent when it ends.
		to: Extent,
		/// Clock time the transition began.
		started_at: f64,
	},
}

impl Motion {
	/// Extent at time `now`.
	pub fn current(&self, now: f64, duration: f64) -> Extent {
		match *self {
			Motion::Idle(extent) => extent,
			Motion::Transitioning {
				from,
				to,
				started_at,
			} => match progress(started_at, now, duration) {
				Some(t) => from.lerp(&to, t),
				None => to,
			},
		}
	}

	/// Pending extent, if a transition is under way.
	pub fn target(&self) -> Option<Extent> {
		match *self {
			Motion::Idle(_) => None,
			Motion::Transitioning { to, .. } => Some(to),
		}
	}

	/// Start moving toward `to` from wherever the node is at `now`.
	pub fn retarget(&mut self, to: Extent, now: f64, duration: f64) {
		*self = Motion::Transitioning {
			from: self.current(now, duration),
			to,
			started_at: now,
		};
	}

	/// Settle a finished transition. Returns whether the node is still moving.
	pub fn advance(&mut self, now: f64, duration: f64) -> bool {
		match *self {
			Motion::Idle(_) => false,
			Motion::Transitioning { to, started_at, .. } => {
				if progress(started_at, now, duration).is_none() {
					*self = Motion::Idle(to);
					false
				} else {
					true
				}
			}
		}
	}
}
