use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::types::GraphData;

/// Library time step for one simulation step at full heat.
const FRAME_DT: f32 = 0.016;
const INITIAL_RADIUS: f64 = 10.0;

/// Position of one node after the latest step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodePosition {
	/// Simulated x.
	pub x: f64,
	/// Simulated y.
	pub y: f64,
	/// Pinned x, overriding the simulation while set.
	pub fx: Option<f64>,
	/// Pinned y, overriding the simulation while set.
	pub fy: Option<f64>,
}

impl NodePosition {
	/// Whether the node is held in place by a drag.
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() && self.fy.is_some()
	}
}

/// A force layout the graph component can drive one frame at a time.
///
/// Nodes are addressed by their position in the [`GraphData::nodes`] the
/// layout was built from.
pub trait Simulation {
	/// Advance one step and return the updated positions. A cooled simulation
	/// returns the positions unchanged.
	fn step(&mut self) -> &[NodePosition];

	/// Positions after the latest step.
	fn positions(&self) -> &[NodePosition];

	/// Links as `(source, target)` node indices.
	fn links(&self) -> &[(usize, usize)];

	/// Raise the cooling target and restart stepping.
	fn reheat(&mut self, alpha_target: f64);

	/// Let the simulation cool back toward equilibrium.
	fn cool(&mut self);

	/// Fix `node` at `(x, y)` until [`Simulation::unpin`].
	fn pin(&mut self, node: usize, x: f64, y: f64);

	/// Release a pinned node back to the simulation.
	fn unpin(&mut self, node: usize);

	/// Whether steps still move nodes.
	fn is_running(&self) -> bool;
}

/// Alpha cooling schedule.
///
/// Alpha eases toward `alpha_target` by `alpha_decay` each step; once it
/// falls under `alpha_min` the simulation stops until restarted.
#[derive(Clone, Debug, PartialEq)]
pub struct Cooling {
	/// Current heat in `[0, 1]`.
	pub alpha: f64,
	/// Heat level alpha is pulled toward.
	pub alpha_target: f64,
	/// Stop threshold.
	pub alpha_min: f64,
	/// Fraction of the remaining distance to the target closed per step.
	pub alpha_decay: f64,
	running: bool,
}

impl Default for Cooling {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			running: true,
		}
	}
}

impl Cooling {
	/// Advance alpha one step. Returns the new alpha, or `None` once cooled.
	pub fn advance(&mut self) -> Option<f64> {
		if !self.running {
			return None;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		if self.alpha < self.alpha_min {
			self.running = false;
		}
		Some(self.alpha)
	}

	/// Set a new target and restart the schedule.
	pub fn reheat(&mut self, alpha_target: f64) {
		self.alpha_target = alpha_target;
		self.running = true;
	}

	/// Target zero heat; keeps stepping until alpha drops below the minimum.
	pub fn cool(&mut self) {
		self.alpha_target = 0.0;
	}

	/// Whether steps are still being taken.
	pub fn is_running(&self) -> bool {
		self.running
	}
}

#[derive(Clone, Debug, Default)]
struct Slot {
	index: usize,
}

/// [`Simulation`] over the `force_graph` crate: charge and spring forces come
/// from the library, cooling and centering are layered on top.
pub struct ForceLayout {
	graph: ForceGraph<Slot, ()>,
	handles: Vec<DefaultNodeIdx>,
	positions: Vec<NodePosition>,
	links: Vec<(usize, usize)>,
	center: (f64, f64),
	cooling: Cooling,
}

impl ForceLayout {
	/// Build a layout centered on `(width / 2, height / 2)`.
	///
	/// Links must already be filtered with [`GraphData::retain_known_links`];
	/// any that still reference unknown ids are skipped here.
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let center = (width / 2.0, height / 2.0);
		let mut handles = Vec::with_capacity(data.nodes.len());
		let mut positions = Vec::with_capacity(data.nodes.len());
		let golden_angle = PI * (3.0 - 5f64.sqrt());

		for i in 0..data.nodes.len() {
			let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
			let angle = i as f64 * golden_angle;
			let (x, y) = (
				center.0 + radius * angle.cos(),
				center.1 + radius * angle.sin(),
			);
			handles.push(graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: false,
				user_data: Slot { index: i },
			}));
			positions.push(NodePosition {
				x,
				y,
				..NodePosition::default()
			});
		}

		let index_of = |id: &str| data.nodes.iter().position(|n| n.id == id);
		let mut links = Vec::with_capacity(data.links.len());
		for link in &data.links {
			if let (Some(src), Some(tgt)) = (index_of(&link.source), index_of(&link.target)) {
				graph.add_edge(handles[src], handles[tgt], EdgeData::default());
				links.push((src, tgt));
			}
		}

		Self {
			graph,
			handles,
			positions,
			links,
			center,
			cooling: Cooling::default(),
		}
	}

	/// Move the centering point, e.g. after a resize.
	pub fn set_center(&mut self, x: f64, y: f64) {
		self.center = (x, y);
	}

	fn recenter(&mut self) {
		let n = self.positions.len();
		if n == 0 {
			return;
		}
		let (mut sx, mut sy) = (0.0, 0.0);
		self.graph.visit_nodes(|node| {
			sx += node.x() as f64;
			sy += node.y() as f64;
		});
		let (dx, dy) = (
			(self.center.0 - sx / n as f64) as f32,
			(self.center.1 - sy / n as f64) as f32,
		);
		self.graph.visit_nodes_mut(|node| {
			if !node.data.is_anchor {
				node.data.x += dx;
				node.data.y += dy;
			}
		});
	}

	fn sync_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			let p = &mut positions[node.data.user_data.index];
			p.x = node.x() as f64;
			p.y = node.y() as f64;
		});
	}

	fn set_anchor(&mut self, node: usize, anchor: Option<(f64, f64)>) {
		let Some(&handle) = self.handles.get(node) else {
			return;
		};
		self.graph.visit_nodes_mut(|n| {
			if n.index() == handle {
				n.data.is_anchor = anchor.is_some();
				if let Some((x, y)) = anchor {
					n.data.x = x as f32;
					n.data.y = y as f32;
				}
			}
		});
		let p = &mut self.positions[node];
		p.fx = anchor.map(|(x, _)| x);
		p.fy = anchor.map(|(_, y)| y);
		if let Some((x, y)) = anchor {
			p.x = x;
			p.y = y;
		}
	}
}

impl Simulation for ForceLayout {
	fn step(&mut self) -> &[NodePosition] {
		if let Some(alpha) = self.cooling.advance() {
			self.graph.update(FRAME_DT * alpha as f32);
			self.recenter();
			self.sync_positions();
		}
		&self.positions
	}

	fn positions(&self) -> &[NodePosition] {
		&self.positions
	}

	fn links(&self) -> &[(usize, usize)] {
		&self.links
	}

	fn reheat(&mut self, alpha_target: f64) {
		self.cooling.reheat(alpha_target);
	}

	fn cool(&mut self) {
		self.cooling.cool();
	}

	fn pin(&mut self, node: usize, x: f64, y: f64) {
		self.set_anchor(node, Some((x, y)));
	}

	fn unpin(&mut self, node: usize) {
		self.set_anchor(node, None);
	}

	fn is_running(&self) -> bool {
		self.cooling.is_running()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	fn triangle() -> GraphData {
		let ids = ["Ada", "Grace", "Edsger"];
		GraphData {
			nodes: ids.iter().map(|id| GraphNode { id: (*id).into() }).collect(),
			links: vec![
				GraphLink {
					source: "Ada".into(),
					target: "Grace".into(),
				},
				GraphLink {
					source: "Grace".into(),
					target: "Edsger".into(),
				},
			],
		}
	}

	#[test]
	fn cooling_stops_after_about_three_hundred_steps() {
		let mut cooling = Cooling::default();
		let mut steps = 0;
		while cooling.advance().is_some() {
			steps += 1;
			assert!(steps < 1000, "cooling never settled");
		}
		assert!((295..=305).contains(&steps), "settled after {steps} steps");
		assert!(!cooling.is_running());
	}

	#[test]
	fn reheated_cooling_keeps_running() {
		let mut cooling = Cooling::default();
		cooling.reheat(0.3);
		for _ in 0..2000 {
			assert!(cooling.advance().is_some());
		}
		assert!((cooling.alpha - 0.3).abs() < 1e-6);

		cooling.cool();
		let mut steps = 0;
		while cooling.advance().is_some() {
			steps += 1;
		}
		assert!(steps > 0 && !cooling.is_running());
	}

	#[test]
	fn reheat_restarts_a_cooled_schedule() {
		let mut cooling = Cooling::default();
		while cooling.advance().is_some() {}
		cooling.reheat(0.3);
		assert!(cooling.is_running());
		assert!(cooling.advance().is_some());
	}

	#[test]
	fn starts_around_the_center() {
		let layout = ForceLayout::new(&triangle(), 1000.0, 800.0);
		assert_eq!(layout.positions().len(), 3);
		assert_eq!(layout.links(), &[(0, 1), (1, 2)]);
		for p in layout.positions() {
			assert!((p.x - 500.0).abs() < 50.0 && (p.y - 400.0).abs() < 50.0);
			assert!(!p.is_pinned());
		}
	}

	#[test]
	fn skips_links_that_were_not_filtered() {
		let mut data = triangle();
		data.links.push(GraphLink {
			source: "Ada".into(),
			target: "Nobody".into(),
		});
		let layout = ForceLayout::new(&data, 100.0, 100.0);
		assert_eq!(layout.links().len(), 2);
	}

	#[test]
	fn pinned_node_holds_its_position() {
		let mut layout = ForceLayout::new(&triangle(), 1000.0, 1000.0);
		layout.pin(0, 120.0, 80.0);
		for _ in 0..20 {
			layout.step();
		}
		let p = layout.positions()[0];
		assert_eq!((p.fx, p.fy), (Some(120.0), Some(80.0)));
		assert!((p.x - 120.0).abs() < 1e-3 && (p.y - 80.0).abs() < 1e-3);

		layout.unpin(0);
		let p = layout.positions()[0];
		assert_eq!((p.fx, p.fy), (None, None));
	}

	#[test]
	fn cooled_layout_stops_moving() {
		let mut layout = ForceLayout::new(&triangle(), 400.0, 400.0);
		while layout.is_running() {
			layout.step();
		}
		let before = layout.positions().to_vec();
		layout.step();
		assert_eq!(layout.positions(), before.as_slice());
	}

	#[test]
	fn pin_out_of_range_is_ignored() {
		let mut layout = ForceLayout::new(&triangle(), 400.0, 400.0);
		layout.pin(99, 1.0, 1.0);
		assert!(layout.positions().iter().all(|p| !p.is_pinned()));
	}
}
