use leptos::prelude::*;

use crate::components::sunburst::{SunburstChart, TreeData};

/// Author hierarchy bundled with the app.
const SUNBURST_JSON: &str = include_str!("../../public/sunburst.json");

/// Zoomable sunburst of authors and their co-authors.
#[component]
pub fn Sunburst() -> impl IntoView {
	let tree = TreeData::from_json(SUNBURST_JSON);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div id="sunburst-chart">
				<h1>"ICSE Authors"</h1>
				<p class="subtitle">
					"Click an author to zoom in; click the center to zoom out."
				</p>
				{tree.map(|tree| view! { <SunburstChart tree=tree /> })}
			</div>
		</ErrorBoundary>
	}
}
