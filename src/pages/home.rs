use leptos::prelude::*;

use crate::components::force_graph::{ForceGraphCanvas, HoverInfo};
use crate::components::info_panel::InfoPanel;
use crate::components::legend::{Legend, build_legend};
use crate::loader::{load_graph_data, load_palette};

/// Registry graph with its legend and hover info panel.
#[component]
pub fn Home() -> impl IntoView {
	let (graph_data, palette) = (load_graph_data(), load_palette());
	let legend = build_legend(&graph_data, &palette);
	let data = Signal::derive(move || graph_data.clone());
	let palette = Signal::derive(move || palette.clone());
	let hover_info = RwSignal::new(None::<HoverInfo>);

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

			<div class="fullscreen-graph">
				<ForceGraphCanvas data=data palette=palette hover_info=hover_info fullscreen=true />
				<InfoPanel hover_info=hover_info />
				<Legend entries=legend />
			</div>
		</ErrorBoundary>
	}
}
