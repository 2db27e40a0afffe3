use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use web_sys::MouseEvent;

use super::hierarchy::NodeId;
use super::state::{ArcFrame, SunburstConfig, SunburstState};
use super::types::TreeData;
use crate::components::frame_loop::{FrameLoop, SharedFrameLoop};

fn snapshot(state: &SunburstState) -> Vec<ArcFrame> {
	state
		.drawn()
		.iter()
		.map(|&id| state.frame(id).clone())
		.collect()
}

/// Zoom to `focus` (or to the back node when `None`) and make sure frames are
/// being produced.
fn zoom(state: &Rc<RefCell<SunburstState>>, frame_loop: &SharedFrameLoop, focus: Option<NodeId>) {
	let now = js_sys::Date::now();
	let animating = {
		let mut s = state.borrow_mut();
		match focus {
			Some(id) => s.click(id, now),
			None => s.click_back(now),
		}
		s.is_animating()
	};
	if animating {
		frame_loop.borrow_mut().request();
	}
}

/// Zoomable sunburst of a weighted tree, rendered as inline SVG.
#[component]
pub fn SunburstChart(tree: TreeData, #[prop(default = 1000.0)] width: f64) -> impl IntoView {
	let config = SunburstConfig::with_width(width);
	let state = Rc::new(RefCell::new(SunburstState::new(tree, config)));
	let frames = RwSignal::new(snapshot(&state.borrow()));
	let frame_loop = FrameLoop::new_shared();

	let state_anim = state.clone();
	FrameLoop::set_body(&frame_loop, move || {
		let mut s = state_anim.borrow_mut();
		if s.advance(js_sys::Date::now()) {
			frames.set(snapshot(&s));
		}
		s.is_animating()
	});

	let drawn: Vec<NodeId> = state.borrow().drawn().to_vec();
	let arcs = drawn
		.iter()
		.enumerate()
		.map(|(i, &id)| {
			let (fill, title, clickable) = {
				let s = state.borrow();
				(
					s.fill(id).to_string(),
					s.hierarchy().tooltip(id),
					s.hierarchy().node(id).has_children(),
				)
			};
			let (state_click, loop_click) = (state.clone(), frame_loop.clone());
			let on_click = move |_: MouseEvent| {
				if clickable {
					zoom(&state_click, &loop_click, Some(id));
				}
			};
			view! {
				<path
					fill=fill
					fill-opacity=move || frames.with(|f| f[i].fill_opacity.to_string())
					pointer-events=move || {
						if frames.with(|f| f[i].interactive) { "auto" } else { "none" }
					}
					d=move || frames.with(|f| f[i].d.clone())
					style=if clickable { "cursor: pointer;" } else { "" }
					on:click=on_click
				>
					<title>{title}</title>
				</path>
			}
		})
		.collect_view();

	let labels = drawn
		.iter()
		.enumerate()
		.map(|(i, &id)| {
			let name = state.borrow().hierarchy().node(id).meta.name.clone();
			view! {
				<text
					dy="0.35em"
					fill-opacity=move || frames.with(|f| f[i].label_opacity.to_string())
					transform=move || frames.with(|f| f[i].label_transform.clone())
				>
					{name}
				</text>
			}
		})
		.collect_view();

	let (state_back, loop_back) = (state.clone(), frame_loop.clone());
	let on_back = move |_: MouseEvent| zoom(&state_back, &loop_back, None);

	let (size, half) = (config.width, config.width / 2.0);
	view! {
		<svg
			class="sunburst-chart"
			viewBox=format!("{} {} {} {}", -half, -half, size, size)
			width=size.to_string()
			height=size.to_string()
			style="font: 10px sans-serif; max-width: 100%; height: auto;"
		>
			<g>{arcs}</g>
			<g pointer-events="none" text-anchor="middle" style="user-select: none;">
				{labels}
			</g>
			<circle
				r=config.radius.to_string()
				fill="none"
				pointer-events="all"
				on:click=on_back
			/>
		</svg>
	}
}
