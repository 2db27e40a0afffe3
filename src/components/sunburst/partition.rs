use std::f64::consts::TAU;

use super::hierarchy::{Hierarchy, NodeId};

/// Radial thickness of one depth level.
const RING: f64 = 1.0;

/// Angular extent `[x0, x1)` in radians and radial extent `[y0, y1]` in depth
/// units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Extent {
	/// Start angle.
	pub x0: f64,
	/// End angle.
	pub x1: f64,
	/// Inner ring.
	pub y0: f64,
	/// Outer ring.
	pub y1: f64,
}

impl Extent {
	/// Angular width in radians.
	pub fn angular_width(&self) -> f64 {
		self.x1 - self.x0
	}

	/// Radial thickness in depth units.
	pub fn radial_width(&self) -> f64 {
		self.y1 - self.y0
	}

	/// Component-wise linear interpolation from `self` (t = 0) to `to` (t = 1).
	pub fn lerp(&self, to: &Extent, t: f64) -> Extent {
		let mix = |a: f64, b: f64| a + (b - a) * t;
		Extent {
			x0: mix(self.x0, to.x0),
			x1: mix(self.x1, to.x1),
			y0: mix(self.y0, to.y0),
			y1: mix(self.y1, to.y1),
		}
	}
}

/// Radial partition: the root spans `[0, 2π)` and one ring; every child takes
/// a slice of its parent's angle proportional to its weight, one ring further
/// out.
///
/// Returns one extent per node, indexed by [`NodeId`].
pub fn partition(hierarchy: &Hierarchy) -> Vec<Extent> {
	let mut extents = vec![Extent::default(); hierarchy.len()];
	extents[Hierarchy::ROOT] = Extent {
		x0: 0.0,
		x1: TAU,
		y0: 0.0,
		y1: RING,
	};

	for id in hierarchy.descendants() {
		dice(hierarchy, id, &mut extents);
	}
	extents
}

fn dice(hierarchy: &Hierarchy, parent: NodeId, extents: &mut [Extent]) {
	let node = hierarchy.node(parent);
	let Extent { x0, x1, .. } = extents[parent];
	let scale = if node.value > 0.0 {
		(x1 - x0) / node.value
	} else {
		0.0
	};
	let (y0, y1) = (
		RING * (node.depth + 1) as f64,
		RING * (node.depth + 2) as f64,
	);
	let mut cursor = x0;
	for &child in &node.children {
		let start = cursor;
		cursor += hierarchy.node(child).value * scale;
		extents[child] = Extent {
			x0: start,
			x1: cursor,
			y0,
			y1,
		};
	}
}
