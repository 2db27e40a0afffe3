use log::{debug, info};

use super::arc::ArcGenerator;
use super::hierarchy::{Hierarchy, NodeId};
use super::partition::{Extent, partition};
use super::scale::{OrdinalScale, quantize_rainbow};
use super::transition::{self, DURATION_MS, Motion};
use super::types::TreeData;
use super::zoom::{LabelPlacement, arc_visible, label_visible, zoom_target};

/// Chart dimensions and timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SunburstConfig {
	/// Width and height of the square viewBox, in pixels.
	pub width: f64,
	/// Pixels per ring.
	pub radius: f64,
	/// Zoom transition length in milliseconds.
	pub duration_ms: f64,
}

impl SunburstConfig {
	/// Config for a chart `width` pixels wide: seven rings fit across.
	pub fn with_width(width: f64) -> Self {
		Self {
			width,
			radius: width / 7.0,
			duration_ms: DURATION_MS,
		}
	}
}

impl Default for SunburstConfig {
	fn default() -> Self {
		Self::with_width(1000.0)
	}
}

/// Rendered attributes of one node's arc and label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArcFrame {
	/// SVG path data.
	pub d: String,
	/// Arc fill opacity.
	pub fill_opacity: f64,
	/// Whether the arc receives pointer events.
	pub interactive: bool,
	/// Label fill opacity.
	pub label_opacity: f64,
	/// Label SVG transform.
	pub label_transform: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Fade {
	from: f64,
	to: f64,
}

impl Fade {
	fn at(&self, t: f64) -> f64 {
		self.from + (self.to - self.from) * t
	}
}

/// Layout, zoom focus and animation state of a sunburst chart.
pub struct SunburstState {
	hierarchy: Hierarchy,
	layout: Vec<Extent>,
	motion: Vec<Motion>,
	frames: Vec<ArcFrame>,
	fills: Vec<String>,
	drawn: Vec<NodeId>,
	arc_fades: Vec<Option<Fade>>,
	label_fades: Vec<Fade>,
	back: NodeId,
	started_at: Option<f64>,
	now: f64,
	arc: ArcGenerator,
	config: SunburstConfig,
}

impl SunburstState {
	/// Lay out `tree` with the root as zoom focus.
	pub fn new(tree: TreeData, config: SunburstConfig) -> Self {
		let hierarchy = Hierarchy::new(tree);
		let layout = partition(&hierarchy);
		let arc = ArcGenerator::new(config.radius);

		let mut scale = OrdinalScale::new(quantize_rainbow(hierarchy.root().children.len() + 1));
		let drawn: Vec<NodeId> = hierarchy.descendants().into_iter().skip(1).collect();
		let mut fills = vec![String::new(); hierarchy.len()];
		for &id in &drawn {
			let top = hierarchy.top_level_ancestor(id);
			fills[id] = scale.color(&hierarchy.node(top).meta.name).to_string();
		}

		let mut state = Self {
			motion: layout.iter().copied().map(Motion::Idle).collect(),
			frames: vec![ArcFrame::default(); hierarchy.len()],
			arc_fades: vec![None; hierarchy.len()],
			label_fades: vec![Fade { from: 0.0, to: 0.0 }; hierarchy.len()],
			fills,
			drawn,
			layout,
			hierarchy,
			back: Hierarchy::ROOT,
			started_at: None,
			now: 0.0,
			arc,
			config,
		};
		for i in 0..state.drawn.len() {
			let id = state.drawn[i];
			let extent = state.layout[id];
			let opacity = state.arc_opacity(id, &extent);
			let frame = &mut state.frames[id];
			frame.d = arc.path(&extent);
			frame.fill_opacity = opacity;
			frame.interactive = arc_visible(&extent);
			frame.label_opacity = if label_visible(&extent) { 1.0 } else { 0.0 };
			frame.label_transform = LabelPlacement::new(&extent, config.radius).to_string();
		}
		info!(
			"sunburst: {} nodes, {} rings, total weight {}",
			state.hierarchy.len(),
			state.hierarchy.root().height + 1,
			state.hierarchy.root().value
		);
		state
	}

	/// The weighted tree.
	pub fn hierarchy(&self) -> &Hierarchy {
		&self.hierarchy
	}

	/// Non-root nodes in drawing order.
	pub fn drawn(&self) -> &[NodeId] {
		&self.drawn
	}

	/// Extent of `id` as of the latest frame.
	#[cfg(test)]
	fn current(&self, id: NodeId) -> Extent {
		self.motion[id].current(self.now, self.config.duration_ms)
	}

	/// Pending extent of `id` while a zoom is animating.
	#[cfg(test)]
	fn target(&self, id: NodeId) -> Option<Extent> {
		self.motion[id].target()
	}

	/// Node a click on the center circle zooms to.
	pub fn back(&self) -> NodeId {
		self.back
	}

	/// Fill color of `id`'s arc.
	pub fn fill(&self, id: NodeId) -> &str {
		&self.fills[id]
	}

	/// Latest rendered attributes of `id`.
	pub fn frame(&self, id: NodeId) -> &ArcFrame {
		&self.frames[id]
	}

	/// Whether a transition is under way.
	pub fn is_animating(&self) -> bool {
		self.started_at.is_some()
	}

	fn arc_opacity(&self, id: NodeId, extent: &Extent) -> f64 {
		match (arc_visible(extent), self.hierarchy.node(id).has_children()) {
			(false, _) => 0.0,
			(true, true) => 0.6,
			(true, false) => 0.4,
		}
	}

	/// Zoom to `focus` at clock time `now` (ms). Clicks on leaves are ignored,
	/// except for the root which is always a valid focus.
	pub fn click(&mut self, focus: NodeId, now: f64) {
		let node = self.hierarchy.node(focus);
		if focus != Hierarchy::ROOT && !node.has_children() {
			return;
		}
		debug!("zoom to {}", node.meta.name);
		self.back = node.parent.unwrap_or(Hierarchy::ROOT);

		let (extent, depth) = (self.layout[focus], node.depth);
		for id in 0..self.motion.len() {
			let target = zoom_target(&self.layout[id], &extent, depth);
			self.motion[id].retarget(target, now, self.config.duration_ms);
		}

		for i in 0..self.drawn.len() {
			let id = self.drawn[i];
			let Some(target) = self.motion[id].target() else {
				continue;
			};
			let (fill, label) = (self.frames[id].fill_opacity, self.frames[id].label_opacity);
			let visible = arc_visible(&target);
			// Arcs hidden before and after keep their stale path.
			let arc_fade = (fill > 0.0 || visible).then(|| Fade {
				from: fill,
				to: self.arc_opacity(id, &target),
			});
			if arc_fade.is_some() {
				self.frames[id].interactive = visible;
			}
			self.arc_fades[id] = arc_fade;
			self.label_fades[id] = Fade {
				from: label,
				to: if label_visible(&target) { 1.0 } else { 0.0 },
			};
		}
		self.started_at = Some(now);
		self.now = now;
	}

	/// Zoom out to the center circle's node.
	pub fn click_back(&mut self, now: f64) {
		self.click(self.back, now);
	}

	/// Recompute frames for clock time `now`. Returns whether anything changed.
	pub fn advance(&mut self, now: f64) -> bool {
		let Some(started_at) = self.started_at else {
			return false;
		};
		self.now = now;
		let duration = self.config.duration_ms;
		let t = transition::progress(started_at, now, duration).unwrap_or(1.0);

		for &id in &self.drawn {
			let extent = self.motion[id].current(now, duration);
			let frame = &mut self.frames[id];
			if let Some(fade) = self.arc_fades[id] {
				frame.d = self.arc.path(&extent);
				frame.fill_opacity = fade.at(t);
			}
			frame.label_opacity = self.label_fades[id].at(t);
			frame.label_transform = LabelPlacement::new(&extent, self.config.radius).to_string();
		}

		let mut moving = false;
		for motion in &mut self.motion {
			moving |= motion.advance(now, duration);
		}
		if !moving {
			debug!("zoom settled");
			self.started_at = None;
			self.arc_fades.iter_mut().for_each(|f| *f = None);
		}
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn leaf(name: &str, value: f64) -> TreeData {
		TreeData {
			name: name.into(),
			value: Some(value),
			..Default::default()
		}
	}

	fn branch(name: &str, children: Vec<TreeData>) -> TreeData {
		TreeData {
			name: name.into(),
			children,
			..Default::default()
		}
	}

	/// Four levels below the root so the deepest ring starts hidden.
	fn authors() -> TreeData {
		branch(
			"ICSE Authors",
			vec![
				branch(
					"Author2",
					vec![
						branch(
							"CoAuthor2.1",
							vec![
								leaf("SubCoAuthor2.1.1", 30.0),
								branch("SubCoAuthor2.1.2", vec![leaf("Deep", 35.0)]),
							],
						),
						branch(
							"CoAuthor2.2",
							vec![leaf("SubCoAuthor2.2.1", 40.0), leaf("SubCoAuthor2.2.2", 45.0)],
						),
					],
				),
				leaf("Author3", 50.0),
			],
		)
	}

	fn find(state: &SunburstState, name: &str) -> NodeId {
		state
			.hierarchy()
			.descendants()
			.into_iter()
			.find(|&id| state.hierarchy().node(id).meta.name == name)
			.unwrap()
	}

	fn close(a: &Extent, b: &Extent) -> bool {
		[a.x0 - b.x0, a.x1 - b.x1, a.y0 - b.y0, a.y1 - b.y1]
			.iter()
			.all(|d| d.abs() < 1e-9)
	}

	#[test]
	fn initial_frames_follow_layout() {
		let state = SunburstState::new(authors(), SunburstConfig::default());
		assert!(!state.is_animating());
		let author = find(&state, "Author2");
		let frame = state.frame(author);
		assert_eq!(frame.fill_opacity, 0.6);
		assert!(frame.interactive);
		assert_eq!(frame.label_opacity, 1.0);
		assert_eq!(state.frame(find(&state, "Author3")).fill_opacity, 0.4);

		let deep = find(&state, "Deep");
		assert_eq!(state.frame(deep).fill_opacity, 0.0);
		assert!(!state.frame(deep).interactive);
		assert_eq!(state.target(deep), None);
		assert_eq!(state.drawn().len(), state.hierarchy().len() - 1);
	}

	#[test]
	fn descendants_inherit_top_level_color() {
		let state = SunburstState::new(authors(), SunburstConfig::default());
		let author = find(&state, "Author2");
		assert_eq!(state.fill(find(&state, "Deep")), state.fill(author));
		assert_ne!(state.fill(author), state.fill(find(&state, "Author3")));
	}

	#[test]
	fn click_sets_targets_and_back_datum() {
		let mut state = SunburstState::new(authors(), SunburstConfig::default());
		let author = find(&state, "Author2");
		let co = find(&state, "CoAuthor2.1");
		state.click(co, 0.0);

		assert_eq!(state.back(), author);
		let target = state.target(co).unwrap();
		assert!(close(&target, &Extent {
			x0: 0.0,
			x1: std::f64::consts::TAU,
			y0: 0.0,
			y1: 1.0
		}));
		let deep = state.target(find(&state, "Deep")).unwrap();
		assert_eq!((deep.y0, deep.y1), (2.0, 3.0));
		assert!(arc_visible(&deep));
	}

	#[test]
	fn click_on_leaf_is_ignored() {
		let mut state = SunburstState::new(authors(), SunburstConfig::default());
		state.click(find(&state, "Author3"), 0.0);
		assert!(!state.is_animating());
		assert_eq!(state.back(), Hierarchy::ROOT);
	}

	#[test]
	fn zoom_in_then_back_restores_extents() {
		let mut state = SunburstState::new(authors(), SunburstConfig::default());
		let before: Vec<Extent> = (0..state.hierarchy().len()).map(|id| state.current(id)).collect();

		let author = find(&state, "Author2");
		state.click(author, 0.0);
		assert_eq!(state.back(), Hierarchy::ROOT);
		state.click_back(10.0);

		for (id, extent) in before.iter().enumerate() {
			assert!(close(&state.target(id).unwrap(), extent), "node {id}");
		}
		assert_eq!(state.back(), Hierarchy::ROOT);
	}

	#[test]
	fn animation_settles_on_target() {
		let mut state = SunburstState::new(authors(), SunburstConfig::default());
		let co = find(&state, "CoAuthor2.1");
		let deep = find(&state, "Deep");
		state.click(co, 100.0);

		assert!(state.advance(100.0 + 375.0));
		assert!(state.is_animating());
		let half = state.frame(deep).fill_opacity;
		assert!(half > 0.0 && half < 0.4);

		assert!(state.advance(100.0 + 750.0));
		assert!(!state.is_animating());
		assert_eq!(state.target(deep), None);
		assert_eq!(state.frame(deep).fill_opacity, 0.4);
		assert!(state.frame(deep).interactive);
		assert_eq!(state.current(co).y0, 0.0);
		assert!(!state.advance(2000.0));
	}

	#[test]
	fn hidden_arcs_that_stay_hidden_are_not_redrawn() {
		let mut state = SunburstState::new(authors(), SunburstConfig::default());
		let deep = find(&state, "Deep");
		let before = state.frame(deep).d.clone();
		// Zooming to the root keeps depth-4 rings out of the window.
		state.click(Hierarchy::ROOT, 0.0);
		state.advance(400.0);
		assert_eq!(state.frame(deep).d, before);
		assert_eq!(state.frame(deep).fill_opacity, 0.0);
	}

	#[test]
	fn second_click_mid_zoom_fades_from_in_flight_opacity() {
		let mut state = SunburstState::new(authors(), SunburstConfig::default());
		let co = find(&state, "CoAuthor2.1");
		let deep = find(&state, "Deep");
		state.click(co, 0.0);
		state.advance(375.0);
		let in_flight = state.frame(deep).fill_opacity;
		assert!((in_flight - 0.2).abs() < 1e-12);
		let path_mid = state.frame(deep).d.clone();

		// Back to the root: "Deep" ends hidden again, but it is still partly
		// drawn, so it keeps being redrawn while it fades out.
		state.click(Hierarchy::ROOT, 375.0);
		assert!(state.is_animating());
		assert!(!state.frame(deep).interactive);
		let target = state.target(deep).unwrap();
		assert!(!arc_visible(&target));

		state.advance(375.0 + 375.0);
		assert!((state.frame(deep).fill_opacity - 0.1).abs() < 1e-12);
		assert_ne!(state.frame(deep).d, path_mid);

		state.advance(375.0 + 750.0);
		assert!(!state.is_animating());
		assert_eq!(state.frame(deep).fill_opacity, 0.0);
		assert!(close(&state.current(deep), &state.layout[deep]));
	}

	#[test]
	fn labels_fade_with_visibility() {
		let mut state = SunburstState::new(authors(), SunburstConfig::default());
		let author3 = find(&state, "Author3");
		state.click(find(&state, "Author2"), 0.0);
		state.advance(750.0);
		assert_eq!(state.frame(author3).label_opacity, 0.0);
	}

	#[test]
	fn bundled_author_tree_lays_out() {
		let tree = TreeData::from_json(include_str!("../../../public/sunburst.json")).unwrap();
		let state = SunburstState::new(tree, SunburstConfig::default());
		let h = state.hierarchy();
		assert_eq!(h.root().meta.name, "ICSE Authors");
		assert_eq!(h.root().children.len(), 10);
		let visible = state
			.drawn()
			.iter()
			.filter(|&&id| state.frame(id).fill_opacity > 0.0)
			.count();
		assert!(visible > 10);
		assert!(state.drawn().iter().all(|&id| !state.frame(id).label_transform.contains("NaN")));
	}
}
