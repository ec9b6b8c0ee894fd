//! Reads the graph data and cluster colors the generator embeds in the page.

use log::{info, warn};
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use crate::components::force_graph::{ClusterColors, GraphData, Palette};

/// Element holding the `{ nodes, links }` JSON.
pub const GRAPH_DATA_ID: &str = "graph-data";
/// Element holding the group-to-color JSON object.
pub const CLUSTER_COLORS_ID: &str = "cluster-colors";

#[derive(Debug, Error)]
pub enum LoadError {
	#[error("no browser document available")]
	NoDocument,
	#[error("element #{0} not found")]
	MissingElement(&'static str),
	#[error("element #{0} is not a <script>")]
	NotAScript(&'static str),
	#[error("failed to parse #{element}: {source}")]
	Parse {
		element: &'static str,
		#[source]
		source: serde_json::Error,
	},
}

/// Parse embedded JSON text.
pub fn parse_embedded<T: DeserializeOwned>(
	element: &'static str,
	text: &str,
) -> Result<T, LoadError> {
	serde_json::from_str(text).map_err(|source| LoadError::Parse { element, source })
}

fn read_script<T: DeserializeOwned>(element: &'static str) -> Result<T, LoadError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(LoadError::NoDocument)?;
	let script: HtmlScriptElement = document
		.get_element_by_id(element)
		.ok_or(LoadError::MissingElement(element))?
		.dyn_into()
		.map_err(|_| LoadError::NotAScript(element))?;
	let text = script.text().map_err(|_| LoadError::NotAScript(element))?;
	parse_embedded(element, &text)
}

/// Graph data from `<script id="graph-data">`, empty when absent or malformed.
pub fn load_graph_data() -> GraphData {
	match read_script::<GraphData>(GRAPH_DATA_ID) {
		Ok(data) => {
			info!(
				"imp-graph: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			data
		}
		Err(e) => {
			warn!("imp-graph: {}", e);
			GraphData::default()
		}
	}
}

/// Group palette from `<script id="cluster-colors">`; every group falls back to
/// the default color when the element is absent or malformed.
pub fn load_palette() -> Palette {
	let colors = read_script::<ClusterColors>(CLUSTER_COLORS_ID).unwrap_or_else(|e| {
		warn!("imp-graph: {}", e);
		ClusterColors::new()
	});
	Palette::new(&colors)
}
