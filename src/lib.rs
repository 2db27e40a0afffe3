//! Leptos client-side app rendering co-authorship data as a force-directed
//! collaboration graph and a zoomable sunburst.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod components;
pub mod error;
mod fetch;
mod pages;

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;
use crate::pages::sunburst::Sunburst;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router with the collaboration graph at `/`, the sunburst at
/// `/sunburst`, and a 404 page for everything else.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Co-authorship Explorer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<nav class="top-nav">
				<A href="/">"Collaboration graph"</A>
				" | "
				<A href="/sunburst">"Sunburst"</A>
			</nav>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/sunburst") view=Sunburst />
			</Routes>
		</Router>
	}
}
