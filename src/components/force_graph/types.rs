//! Graph data structures injected into the page by the registry generator.

use std::collections::HashMap;

use serde::Deserialize;

/// A registry entry.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier. Links reference nodes by this id.
	pub id: String,
	/// Display name, one attribute path per line.
	pub name: String,
	/// Sizing weight; larger values render larger discs.
	#[serde(default)]
	pub val: f64,
	/// Cluster label such as `modules.home` or `outputs.nixosConfigurations`.
	pub group: String,
}

/// A directed dependency edge.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
}

/// Nodes and links as produced upstream.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

/// Group label to CSS color string, as injected next to the graph data.
pub type ClusterColors = HashMap<String, String>;

/// What the info panel shows about the hovered node.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverInfo {
	pub name: String,
	pub group: String,
}

/// Human-readable group label: the first `.` becomes ` / `.
pub fn group_label(group: &str) -> String {
	group.replacen('.', " / ", 1)
}
