//! Group legend shown beside the graph.

use std::collections::BTreeSet;

use leptos::prelude::*;

use super::force_graph::{GraphData, Palette, group_label};

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
	pub group: String,
	pub color: String,
	pub label: String,
}

/// One entry per distinct group, sorted by group name.
pub fn build_legend(data: &GraphData, palette: &Palette) -> Vec<LegendEntry> {
	data.nodes
		.iter()
		.map(|n| n.group.as_str())
		.collect::<BTreeSet<_>>()
		.into_iter()
		.map(|group| LegendEntry {
			group: group.to_owned(),
			color: palette.color_for(group).to_string(),
			label: group_label(group),
		})
		.collect()
}

#[component]
pub fn Legend(entries: Vec<LegendEntry>) -> impl IntoView {
	view! {
		<div id="legend" class="legend">
			{entries
				.into_iter()
				.map(|e| {
					view! {
						<div class="legend-item" title=e.group>
							<div class="legend-color" style:background=e.color></div>
							<span>{e.label}</span>
						</div>
					}
				})
				.collect_view()}
		</div>
	}
}
