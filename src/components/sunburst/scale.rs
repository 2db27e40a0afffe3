use std::collections::HashMap;
use std::f64::consts::PI;

/// An sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	/// CSS `rgb(r, g, b)` notation.
	pub fn to_css(self) -> String {
		format!("rgb({}, {}, {})", self.0, self.1, self.2)
	}
}

/// Cubehelix color (hue in degrees, saturation, lightness) to sRGB.
fn cubehelix(h: f64, s: f64, l: f64) -> Rgb {
	const A: f64 = -0.14861;
	const B: f64 = 1.78277;
	const C: f64 = -0.29227;
	const D: f64 = -0.90649;
	const E: f64 = 1.97294;

	let h = (h + 120.0) * PI / 180.0;
	let a = s * l * (1.0 - l);
	let (cos_h, sin_h) = (h.cos(), h.sin());
	let channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
	Rgb(
		channel(l + a * (A * cos_h + B * sin_h)),
		channel(l + a * (C * cos_h + D * sin_h)),
		channel(l + a * (E * cos_h)),
	)
}

/// Cyclical rainbow through cubehelix space; `t` wraps into `[0, 1)`.
pub fn interpolate_rainbow(t: f64) -> Rgb {
	let t = if (0.0..=1.0).contains(&t) { t } else { t - t.floor() };
	let ts = (t - 0.5).abs();
	cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

/// `n` evenly spaced samples of the rainbow, ends included.
pub fn quantize_rainbow(n: usize) -> Vec<String> {
	match n {
		0 => Vec::new(),
		1 => vec![interpolate_rainbow(0.0).to_css()],
		_ => (0..n)
			.map(|i| interpolate_rainbow(i as f64 / (n - 1) as f64).to_css())
			.collect(),
	}
}

/// Maps keys to colors in order of first use, cycling through the range.
#[derive(Clone, Debug, Default)]
pub struct OrdinalScale {
	range: Vec<String>,
	domain: HashMap<String, usize>,
}

impl OrdinalScale {
	/// Scale over a fixed list of colors.
	pub fn new(range: Vec<String>) -> Self {
		Self {
			range,
			domain: HashMap::new(),
		}
	}

	/// Color for `key`, assigning the next free slot on first sight.
	pub fn color(&mut self, key: &str) -> &str {
		if self.range.is_empty() {
			return "black";
		}
		let next = self.domain.len();
		let slot = *self.domain.entry(key.to_string()).or_insert(next);
		&self.range[slot % self.range.len()]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rainbow_endpoints_match_and_wrap() {
		assert_eq!(interpolate_rainbow(0.0), interpolate_rainbow(1.0));
		assert_eq!(interpolate_rainbow(1.25), interpolate_rainbow(0.25));
		assert_eq!(interpolate_rainbow(-0.75), interpolate_rainbow(0.25));
	}

	#[test]
	fn rainbow_known_samples() {
		// Reference values of the cubehelix rainbow.
		assert_eq!(interpolate_rainbow(0.0), Rgb(110, 64, 170));
		assert_eq!(interpolate_rainbow(0.5), Rgb(175, 240, 91));
	}

	#[test]
	fn quantize_gives_n_colors() {
		assert!(quantize_rainbow(0).is_empty());
		assert_eq!(quantize_rainbow(1).len(), 1);
		let five = quantize_rainbow(5);
		assert_eq!(five.len(), 5);
		assert_eq!(five[0], five[4]);
		assert_ne!(five[0], five[2]);
	}

	#[test]
	fn ordinal_scale_assigns_in_first_use_order_and_cycles() {
		let mut scale = OrdinalScale::new(vec!["a".into(), "b".into()]);
		assert_eq!(scale.color("x"), "a");
		assert_eq!(scale.color("y"), "b");
		assert_eq!(scale.color("x"), "a");
		assert_eq!(scale.color("z"), "a");
	}
}
