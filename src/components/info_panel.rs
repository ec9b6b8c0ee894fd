use leptos::prelude::*;

use super::force_graph::{HoverInfo, group_label};

pub const TITLE: &str = "imp Registry";
pub const HINT: &str = "Hover over nodes to highlight connections";

/// Heading for a hovered node: its name lines joined with commas.
pub fn heading(name: &str) -> String {
	name.replace('\n', ", ")
}

#[component]
pub fn InfoPanel(hover_info: RwSignal<Option<HoverInfo>>) -> impl IntoView {
	view! {
		<div id="info" class="info">
			{move || match hover_info.get() {
				Some(info) => {
					view! {
						<h3>{heading(&info.name)}</h3>
						<div class="cluster">{group_label(&info.group)}</div>
						<div class="nodes">{info.name}</div>
					}
						.into_any()
				}
				None => {
					view! {
						<h3>{TITLE}</h3>
						<div class="hint">{HINT}</div>
					}
						.into_any()
				}
			}}
		</div>
	}
}
