use log::debug;

use super::simulation::{ForceLayout, Simulation};
use super::types::GraphData;

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 12.0;
/// Cooling target while a node is being dragged.
pub const DRAG_ALPHA_TARGET: f64 = 0.3;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<usize>,
	/// Node position minus pointer position at grab time.
	pub offset_x: f64,
	pub offset_y: f64,
}

/// Everything the canvas needs between frames: the simulation, node labels,
/// and pointer interaction state.
pub struct ForceGraphState<S = ForceLayout> {
	pub simulation: S,
	pub labels: Vec<String>,
	pub drag: DragState,
	pub hover: Option<usize>,
	pub width: f64,
	pub height: f64,
}

impl ForceGraphState<ForceLayout> {
	pub fn new(data: &GraphData, width: f64, height: f64) -> Self {
		let mut data = data.clone();
		let dropped = data.retain_known_links();
		if dropped > 0 {
			log::warn!("dropped {dropped} links referencing unknown authors");
		}
		log::info!(
			"collaboration graph: {} authors, {} links",
			data.nodes.len(),
			data.links.len()
		);
		let simulation = ForceLayout::new(&data, width, height);
		Self::with_simulation(simulation, &data, width, height)
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.simulation.set_center(width / 2.0, height / 2.0);
	}
}

impl<S: Simulation> ForceGraphState<S> {
	pub fn with_simulation(simulation: S, data: &GraphData, width: f64, height: f64) -> Self {
		Self {
			simulation,
			labels: data.nodes.iter().map(|n| n.id.clone()).collect(),
			drag: DragState::default(),
			hover: None,
			width,
			height,
		}
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		// Last drawn wins, matching paint order.
		self.simulation
			.positions()
			.iter()
			.enumerate()
			.rev()
			.find(|(_, p)| {
				let (dx, dy) = (p.x - x, p.y - y);
				(dx * dx + dy * dy).sqrt() < HIT_RADIUS
			})
			.map(|(i, _)| i)
	}

	pub fn set_hover(&mut self, node: Option<usize>) {
		self.hover = node;
	}

	/// Start dragging `node` grabbed at pointer `(x, y)`: reheat and pin it
	/// where it currently is.
	pub fn drag_start(&mut self, node: usize, x: f64, y: f64) {
		let Some(p) = self.simulation.positions().get(node).copied() else {
			return;
		};
		debug!("drag start on {}", self.labels[node]);
		self.simulation.reheat(DRAG_ALPHA_TARGET);
		self.simulation.pin(node, p.x, p.y);
		self.drag.active = true;
		self.drag.node_idx = Some(node);
		self.drag.offset_x = p.x - x;
		self.drag.offset_y = p.y - y;
	}

	/// Track the pointer with the dragged node's pin, keeping the grab offset.
	pub fn drag_move(&mut self, x: f64, y: f64) {
		if let (true, Some(node)) = (self.drag.active, self.drag.node_idx) {
			let (dx, dy) = (self.drag.offset_x, self.drag.offset_y);
			self.simulation.pin(node, x + dx, y + dy);
		}
	}

	/// Release the dragged node and let the layout cool.
	pub fn drag_end(&mut self) {
		if let Some(node) = self.drag.node_idx.take() {
			debug!("drag end on {}", self.labels[node]);
			self.simulation.unpin(node);
			self.simulation.cool();
		}
		self.drag.active = false;
	}

	pub fn tick(&mut self) {
		if self.simulation.is_running() {
			self.simulation.step();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::simulation::{Cooling, NodePosition};
	use crate::components::force_graph::types::{GraphLink, GraphNode};

	/// Records calls instead of simulating.
	#[derive(Default)]
	struct Recorder {
		positions: Vec<NodePosition>,
		cooling: Cooling,
		steps: usize,
	}

	impl Simulation for Recorder {
		fn step(&mut self) -> &[NodePosition] {
			self.steps += 1;
			self.cooling.advance();
			&self.positions
		}
		fn positions(&self) -> &[NodePosition] {
			&self.positions
		}
		fn links(&self) -> &[(usize, usize)] {
			&[]
		}
		fn reheat(&mut self, alpha_target: f64) {
			self.cooling.reheat(alpha_target);
		}
		fn cool(&mut self) {
			self.cooling.cool();
		}
		fn pin(&mut self, node: usize, x: f64, y: f64) {
			let p = &mut self.positions[node];
			(p.x, p.y, p.fx, p.fy) = (x, y, Some(x), Some(y));
		}
		fn unpin(&mut self, node: usize) {
			let p = &mut self.positions[node];
			(p.fx, p.fy) = (None, None);
		}
		fn is_running(&self) -> bool {
			self.cooling.is_running()
		}
	}

	fn state() -> ForceGraphState<Recorder> {
		let data = GraphData {
			nodes: vec![GraphNode { id: "A".into() }, GraphNode { id: "B".into() }],
			links: vec![],
		};
		let recorder = Recorder {
			positions: vec![
				NodePosition {
					x: 10.0,
					y: 10.0,
					..Default::default()
				},
				NodePosition {
					x: 100.0,
					y: 100.0,
					..Default::default()
				},
			],
			..Default::default()
		};
		ForceGraphState::with_simulation(recorder, &data, 200.0, 200.0)
	}

	#[test]
	fn hit_test_uses_world_radius() {
		let s = state();
		assert_eq!(s.node_at_position(12.0, 12.0), Some(0));
		assert_eq!(s.node_at_position(100.0, 111.0), Some(1));
		assert_eq!(s.node_at_position(50.0, 50.0), None);
	}

	#[test]
	fn drag_pins_tracks_and_releases() {
		let mut s = state();
		s.drag_start(1, 100.0, 100.0);
		assert!(s.drag.active);
		assert_eq!(s.simulation.cooling.alpha_target, DRAG_ALPHA_TARGET);
		assert_eq!(s.simulation.positions[1].fx, Some(100.0));

		s.drag_move(140.0, 60.0);
		let p = s.simulation.positions[1];
		assert_eq!((p.fx, p.fy), (Some(140.0), Some(60.0)));

		s.drag_end();
		let p = s.simulation.positions[1];
		assert!(!p.is_pinned());
		assert_eq!(s.simulation.cooling.alpha_target, 0.0);
		assert!(!s.drag.active && s.drag.node_idx.is_none());
	}

	#[test]
	fn drag_keeps_grab_offset() {
		let mut s = state();
		// Grabbed 4px right of and 3px above the node's center.
		s.drag_start(1, 104.0, 97.0);
		assert_eq!(s.simulation.positions[1].fx, Some(100.0));

		s.drag_move(104.0, 97.0);
		let p = s.simulation.positions[1];
		assert_eq!((p.fx, p.fy), (Some(100.0), Some(100.0)));

		s.drag_move(144.0, 57.0);
		let p = s.simulation.positions[1];
		assert_eq!((p.fx, p.fy), (Some(140.0), Some(60.0)));
	}

	#[test]
	fn move_without_drag_does_nothing() {
		let mut s = state();
		s.drag_move(5.0, 5.0);
		assert!(s.simulation.positions.iter().all(|p| !p.is_pinned()));
	}

	#[test]
	fn tick_stops_once_cooled() {
		let mut s = state();
		for _ in 0..1000 {
			s.tick();
		}
		let steps = s.simulation.steps;
		assert!(steps < 1000);
		s.tick();
		assert_eq!(s.simulation.steps, steps);
	}

	#[test]
	fn new_filters_bad_links() {
		let data = GraphData {
			nodes: vec![GraphNode { id: "A".into() }, GraphNode { id: "B".into() }],
			links: vec![
				GraphLink {
					source: "A".into(),
					target: "B".into(),
				},
				GraphLink {
					source: "A".into(),
					target: "Z".into(),
				},
			],
		};
		let s = ForceGraphState::new(&data, 300.0, 300.0);
		assert_eq!(s.simulation.links(), &[(0, 1)]);
		assert_eq!(s.labels, vec!["A".to_string(), "B".to_string()]);
	}
}
