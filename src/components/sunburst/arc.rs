//! SVG path data for annular sectors.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write;

use super::partition::Extent;

const EPSILON: f64 = 1e-12;
const MAX_PAD_ANGLE: f64 = 0.005;

/// Minimal SVG path writer with a circular `arc` command, coordinates rounded
/// to three decimals.
#[derive(Debug, Default)]
struct PathBuilder {
	d: String,
	last: Option<(f64, f64)>,
}

fn round(v: f64) -> f64 {
	let r = (v * 1000.0).round() / 1000.0;
	// Avoid "-0" in the output.
	if r == 0.0 { 0.0 } else { r }
}

impl PathBuilder {
	fn move_to(&mut self, x: f64, y: f64) {
		let _ = write!(self.d, "M{},{}", round(x), round(y));
		self.last = Some((x, y));
	}

	fn line_to(&mut self, x: f64, y: f64) {
		let _ = write!(self.d, "L{},{}", round(x), round(y));
		self.last = Some((x, y));
	}

	fn close(&mut self) {
		if self.last.is_some() {
			self.d.push('Z');
		}
	}

	/// Circle of radius `r` around the origin from angle `a0` to `a1`.
	fn arc(&mut self, r: f64, a0: f64, a1: f64, ccw: bool) {
		let (dx, dy) = (r * a0.cos(), r * a0.sin());
		let sweep = if ccw { 0 } else { 1 };
		let mut da = if ccw { a0 - a1 } else { a1 - a0 };

		match self.last {
			None => self.move_to(dx, dy),
			Some((lx, ly)) if (lx - dx).abs() > EPSILON || (ly - dy).abs() > EPSILON => {
				self.line_to(dx, dy)
			}
			Some(_) => {}
		}
		if r == 0.0 {
			return;
		}
		if da < 0.0 {
			da = da % TAU + TAU;
		}

		let r_str = round(r);
		if da > TAU - EPSILON {
			// A full turn needs two half arcs.
			let _ = write!(
				self.d,
				"A{r_str},{r_str},0,1,{sweep},{},{}A{r_str},{r_str},0,1,{sweep},{},{}",
				round(-dx),
				round(-dy),
				round(dx),
				round(dy)
			);
			self.last = Some((dx, dy));
		} else if da > EPSILON {
			let (ex, ey) = (r * a1.cos(), r * a1.sin());
			let large = if da >= PI { 1 } else { 0 };
			let _ = write!(
				self.d,
				"A{r_str},{r_str},0,{large},{sweep},{},{}",
				round(ex),
				round(ey)
			);
			self.last = Some((ex, ey));
		}
	}
}

/// Turns [`Extent`]s into sector outlines for a chart with ring thickness
/// `radius` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcGenerator {
	/// Pixels per depth unit.
	pub radius: f64,
	/// Radius at which the pad angle is measured.
	pub pad_radius: f64,
}

impl ArcGenerator {
	/// Generator with pad radius `1.5 × radius`.
	pub fn new(radius: f64) -> Self {
		Self {
			radius,
			pad_radius: radius * 1.5,
		}
	}

	/// Inner and outer pixel radius; the outer edge is pulled in one pixel
	/// but never inside the inner one.
	pub fn radii(&self, e: &Extent) -> (f64, f64) {
		let inner = e.y0 * self.radius;
		(inner, inner.max(e.y1 * self.radius - 1.0))
	}

	/// SVG `d` attribute for the sector at `e`. Angles run clockwise from
	/// 12 o'clock.
	pub fn path(&self, e: &Extent) -> String {
		let mut path = PathBuilder::default();
		let (mut r0, mut r1) = self.radii(e);
		if r1 < r0 {
			std::mem::swap(&mut r0, &mut r1);
		}
		let (a0, a1) = (e.x0 - FRAC_PI_2, e.x1 - FRAC_PI_2);
		let da = (a1 - a0).abs();
		let cw = a1 > a0;

		if r1 <= EPSILON {
			path.move_to(0.0, 0.0);
		} else if da > TAU - EPSILON {
			path.move_to(r1 * a0.cos(), r1 * a0.sin());
			path.arc(r1, a0, a1, !cw);
			if r0 > EPSILON {
				path.move_to(r0 * a1.cos(), r0 * a1.sin());
				path.arc(r0, a1, a0, cw);
			}
		} else {
			let (mut a00, mut a10, mut a01, mut a11) = (a0, a1, a0, a1);
			let half_pad = (e.angular_width() / 2.0).min(MAX_PAD_ANGLE) / 2.0;
			let mut da0 = da;
			let mut da1 = da;
			if half_pad > EPSILON && self.pad_radius > EPSILON {
				let dir = if cw { 1.0 } else { -1.0 };
				let mut p0 = (self.pad_radius / r0 * half_pad.sin()).asin();
				let mut p1 = (self.pad_radius / r1 * half_pad.sin()).asin();
				da0 -= p0 * 2.0;
				if da0 > EPSILON {
					p0 *= dir;
					a00 += p0;
					a10 -= p0;
				} else {
					da0 = 0.0;
					a00 = (a0 + a1) / 2.0;
					a10 = a00;
				}
				da1 -= p1 * 2.0;
				if da1 > EPSILON {
					p1 *= dir;
					a01 += p1;
					a11 -= p1;
				} else {
					da1 = 0.0;
					a01 = (a0 + a1) / 2.0;
					a11 = a01;
				}
			}

			path.move_to(r1 * a01.cos(), r1 * a01.sin());
			if da1 > EPSILON {
				path.arc(r1, a01, a11, !cw);
			}
			if r0 > EPSILON && da0 > EPSILON {
				path.arc(r0, a10, a00, cw);
			} else {
				path.line_to(r0 * a10.cos(), r0 * a10.sin());
			}
		}
		path.close();
		path.d
	}
}
