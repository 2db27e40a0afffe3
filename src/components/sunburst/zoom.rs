//! Click-to-zoom remapping and what is drawn at a given extent.

use std::f64::consts::{PI, TAU};
use std::fmt;

use super::partition::Extent;

/// Rings shown around the zoom center: the focus' children and grandchildren.
pub const VISIBLE_RINGS: (f64, f64) = (1.0, 3.0);
/// Minimum `radial × angular` area before a label is drawn.
pub const LABEL_MIN_AREA: f64 = 0.03;

/// Re-express `node` relative to a zoom `focus`: the focus' angular range is
/// stretched to the full circle and its depth becomes the center.
///
/// Angles outside the focus collapse onto its boundary. A zero-width focus
/// collapses every angle to 0 rather than producing NaN.
pub fn zoom_target(node: &Extent, focus: &Extent, focus_depth: usize) -> Extent {
	let span = focus.angular_width();
	let angle = |x: f64| ((x - focus.x0) / span).max(0.0).min(1.0) * TAU;
	let depth = focus_depth as f64;
	Extent {
		x0: angle(node.x0),
		x1: angle(node.x1),
		y0: (node.y0 - depth).max(0.0),
		y1: (node.y1 - depth).max(0.0),
	}
}

fn in_window(e: &Extent) -> bool {
	e.y1 <= VISIBLE_RINGS.1 && e.y0 >= VISIBLE_RINGS.0
}

/// Whether an arc at `e` is drawn.
pub fn arc_visible(e: &Extent) -> bool {
	in_window(e) && e.x1 > e.x0
}

/// Whether a label at `e` is drawn.
pub fn label_visible(e: &Extent) -> bool {
	in_window(e) && e.radial_width() * e.angular_width() > LABEL_MIN_AREA
}

/// Where a label sits: rotated to the middle angle, pushed out to the middle
/// radius, flipped upright on the left half.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelPlacement {
	/// Middle angle in degrees, clockwise from 12 o'clock.
	pub angle: f64,
	/// Middle radius in pixels.
	pub radius: f64,
}

impl LabelPlacement {
	/// Placement for `e` with ring thickness `ring_px`. NaN components become 0.
	pub fn new(e: &Extent, ring_px: f64) -> Self {
		let angle = (e.x0 + e.x1) / 2.0 * 180.0 / PI;
		let radius = (e.y0 + e.y1) / 2.0 * ring_px;
		Self {
			angle: if angle.is_nan() { 0.0 } else { angle },
			radius: if radius.is_nan() { 0.0 } else { radius },
		}
	}

	/// Labels past the vertical midline are turned 180° to stay readable.
	pub fn flipped(&self) -> bool {
		self.angle >= 180.0
	}
}

impl fmt::Display for LabelPlacement {
	/// SVG `transform` attribute value.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"rotate({}) translate({},0) rotate({})",
			self.angle - 90.0,
			self.radius,
			if self.flipped() { 180 } else { 0 }
		)
	}
}
