use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, GraphData};
use crate::fetch::fetch_json;

/// Co-authorship graph, relative to the page.
const GRAPH_URL: &str = "coauthors_collab_filtered.json";
const GRAPH_SIZE: f64 = 1000.0;

/// Default Home Page: the collaboration graph.
#[component]
pub fn Home() -> impl IntoView {
	let graph = LocalResource::new(|| fetch_json::<GraphData>(GRAPH_URL));

	view! {
		<Suspense fallback=|| view! { <p class="loading">"Loading collaboration graph…"</p> }>
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
				{move || {
					graph
						.get()
						.map(|loaded| {
							loaded
								.map(|data| {
									let data = Signal::derive(move || data.clone());
									view! {
										<div class="graph-container">
											<ForceGraphCanvas
												data=data
												width=Some(GRAPH_SIZE)
												height=Some(GRAPH_SIZE)
											/>
											<div class="graph-overlay">
												<h1>"Collaboration Graph"</h1>
												<p class="subtitle">
													"Drag an author to pin it; release to let the layout settle."
												</p>
											</div>
										</div>
									}
								})
						})
				}}
			</ErrorBoundary>
		</Suspense>
	}
}
