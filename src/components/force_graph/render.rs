use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::simulation::Simulation;
use super::state::{ForceGraphState, NODE_RADIUS};

const BACKGROUND: &str = "#ffffff";
const LINK_COLOR: &str = "#999999";
const NODE_COLOR: &str = "blue";
const PINNED_COLOR: &str = "#ff7f0e";
const LABEL_COLOR: &str = "#333333";
/// Vertical offset of an author label below its node.
const LABEL_DY: f64 = 15.0;

pub fn render<S: Simulation>(state: &ForceGraphState<S>, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	draw_labels(state, ctx);
	draw_tooltip(state, ctx);
}

fn draw_links<S: Simulation>(state: &ForceGraphState<S>, ctx: &CanvasRenderingContext2d) {
	let positions = state.simulation.positions();
	ctx.set_stroke_style_str(LINK_COLOR);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	for &(src, tgt) in state.simulation.links() {
		let (a, b) = (&positions[src], &positions[tgt]);
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
	}
	ctx.stroke();
}

fn draw_nodes<S: Simulation>(state: &ForceGraphState<S>, ctx: &CanvasRenderingContext2d) {
	for p in state.simulation.positions() {
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(if p.is_pinned() { PINNED_COLOR } else { NODE_COLOR });
		ctx.fill();
	}
}

fn draw_labels<S: Simulation>(state: &ForceGraphState<S>, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font("10px sans-serif");
	for (p, label) in state.simulation.positions().iter().zip(&state.labels) {
		let _ = ctx.fill_text(label, p.x, p.y + LABEL_DY);
	}
}

fn draw_tooltip<S: Simulation>(state: &ForceGraphState<S>, ctx: &CanvasRenderingContext2d) {
	let Some(idx) = state.hover else {
		return;
	};
	let (Some(p), Some(label)) = (state.simulation.positions().get(idx), state.labels.get(idx))
	else {
		return;
	};
	ctx.set_font("12px sans-serif");
	let width = ctx
		.measure_text(label)
		.map(|m| m.width())
		.unwrap_or(label.len() as f64 * 7.0);
	let (x, y) = (p.x + NODE_RADIUS + 4.0, p.y - NODE_RADIUS - 20.0);
	ctx.set_fill_style_str("rgba(255, 255, 224, 0.95)");
	ctx.fill_rect(x, y, width + 8.0, 18.0);
	ctx.set_stroke_style_str("#666666");
	ctx.set_line_width(0.5);
	ctx.stroke_rect(x, y, width + 8.0, 18.0);
	ctx.set_fill_style_str("black");
	let _ = ctx.fill_text(label, x + 4.0, y + 13.0);
}
