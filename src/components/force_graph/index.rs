//! Adjacency index and sink classification over an immutable dataset.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::style::{SINK_GROUPS, SINK_MASS, SINK_RADIUS};
use super::types::{GraphData, GraphNode};

/// Position of a node in [`GraphData::nodes`].
pub type NodeId = usize;
/// Position of a link in [`GraphData::links`].
pub type LinkId = usize;

#[derive(Clone, Debug, Default)]
struct Adjacency {
	neighbors: Vec<NodeId>,
	links: Vec<LinkId>,
}

/// Neighbor and incident-link lists for every node, built once per dataset.
#[derive(Clone, Debug)]
pub struct GraphIndex {
	nodes: Vec<GraphNode>,
	adjacency: Vec<Adjacency>,
	link_ends: Vec<Option<(NodeId, NodeId)>>,
	has_outgoing: HashSet<NodeId>,
	by_id: HashMap<String, NodeId>,
}

impl GraphIndex {
	pub fn build(data: &GraphData) -> Self {
		let mut by_id = HashMap::with_capacity(data.nodes.len());
		for (i, node) in data.nodes.iter().enumerate() {
			by_id.entry(node.id.clone()).or_insert(i);
		}

		let mut index = Self {
			nodes: data.nodes.clone(),
			adjacency: vec![Adjacency::default(); data.nodes.len()],
			link_ends: Vec::with_capacity(data.links.len()),
			has_outgoing: HashSet::new(),
			by_id,
		};
		for (li, link) in data.links.iter().enumerate() {
			let (Some(a), Some(b)) = (index.node_id(&link.source), index.node_id(&link.target)) else {
				debug!("imp-graph: skipping link {} -> {}", link.source, link.target);
				index.link_ends.push(None);
				continue;
			};
			index.has_outgoing.insert(a);
			index.adjacency[a].neighbors.push(b);
			index.adjacency[b].neighbors.push(a);
			index.adjacency[a].links.push(li);
			index.adjacency[b].links.push(li);
			index.link_ends.push(Some((a, b)));
		}
		index
	}

	/// Node with the given identifier; the first one wins when ids repeat.
	pub fn node_id(&self, id: &str) -> Option<NodeId> {
		self.by_id.get(id).copied()
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Number of links in the source data, resolvable or not.
	pub fn link_count(&self) -> usize {
		self.link_ends.len()
	}

	pub fn node(&self, id: NodeId) -> &GraphNode {
		&self.nodes[id]
	}

	pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
		self.nodes.iter().enumerate()
	}

	pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
		&self.adjacency[id].neighbors
	}

	pub fn incident_links(&self, id: NodeId) -> &[LinkId] {
		&self.adjacency[id].links
	}

	/// Source and target of a link, `None` when an endpoint was missing.
	pub fn link_ends(&self, id: LinkId) -> Option<(NodeId, NodeId)> {
		self.link_ends.get(id).copied().flatten()
	}

	pub fn resolved_links(&self) -> impl Iterator<Item = (LinkId, NodeId, NodeId)> + '_ {
		self.link_ends
			.iter()
			.enumerate()
			.filter_map(|(li, ends)| ends.map(|(a, b)| (li, a, b)))
	}

	pub fn has_outgoing(&self, id: NodeId) -> bool {
		self.has_outgoing.contains(&id)
	}

	/// Terminal configuration output with nothing depending on it downstream.
	pub fn is_sink(&self, id: NodeId) -> bool {
		SINK_GROUPS.contains(&self.nodes[id].group.as_str()) && !self.has_outgoing(id)
	}

	/// Sinks are drawn at a fixed size; others scale with `sqrt(val)`.
	pub fn node_radius(&self, id: NodeId) -> f64 {
		if self.is_sink(id) {
			SINK_RADIUS
		} else {
			(self.nodes[id].val + 2.0).max(0.0).sqrt() * 4.0
		}
	}

	/// Physics weight of a node.
	pub fn node_mass(&self, id: NodeId) -> f64 {
		if self.is_sink(id) {
			SINK_MASS
		} else {
			self.nodes[id].val + 2.0
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::types::GraphLink;

	fn node(id: &str, group: &str, val: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: id.into(),
			val,
			group: group.into(),
		}
	}

	fn link(source: &str, target: &str) -> GraphLink {
		GraphLink {
			source: source.into(),
			target: target.into(),
		}
	}

	#[test]
	fn indexes_both_endpoints() {
		let data = GraphData {
			nodes: vec![node("a", "x", 1.0), node("b", "x", 1.0), node("c", "x", 1.0)],
			links: vec![link("a", "b"), link("b", "c")],
		};
		let index = GraphIndex::build(&data);

		assert_eq!(index.neighbors(0), &[1]);
		assert_eq!(index.neighbors(1), &[0, 2]);
		assert_eq!(index.neighbors(2), &[1]);
		assert_eq!(index.incident_links(1), &[0, 1]);
		assert!(index.has_outgoing(0));
		assert!(index.has_outgoing(1));
		assert!(!index.has_outgoing(2));
	}

	#[test]
	fn skips_dangling_links() {
		let data = GraphData {
			nodes: vec![node("a", "x", 0.0), node("b", "x", 0.0)],
			links: vec![link("a", "ghost"), link("ghost", "b"), link("a", "b")],
		};
		let index = GraphIndex::build(&data);

		assert_eq!(index.link_count(), 3);
		assert_eq!(index.link_ends(0), None);
		assert_eq!(index.link_ends(1), None);
		assert_eq!(index.link_ends(2), Some((0, 1)));
		assert_eq!(index.incident_links(0), &[2]);
		assert_eq!(index.resolved_links().collect::<Vec<_>>(), vec![(2, 0, 1)]);
	}

	#[test]
	fn one_entry_per_link_occurrence() {
		let data = GraphData {
			nodes: vec![node("a", "x", 0.0), node("b", "x", 0.0)],
			links: vec![link("a", "b"), link("a", "b"), link("a", "a")],
		};
		let index = GraphIndex::build(&data);

		assert_eq!(index.neighbors(0), &[1, 1, 0, 0]);
		assert_eq!(index.neighbors(1), &[0, 0]);
		assert_eq!(index.incident_links(0), &[0, 1, 2, 2]);
		assert_eq!(index.incident_links(1), &[0, 1]);
	}

	#[test]
	fn sink_requires_output_group_and_no_outgoing_edge() {
		let data = GraphData {
			nodes: vec![
				node("a", "modules.nixos", 2.0),
				node("b", "outputs.nixosConfigurations", 0.0),
				node("c", "outputs.homeConfigurations", 0.0),
				node("d", "outputs.homeConfigurations", 0.0),
				node("e", "outputs.packages", 0.0),
			],
			links: vec![link("a", "b"), link("c", "d")],
		};
		let index = GraphIndex::build(&data);

		assert!(!index.is_sink(0));
		assert!(index.is_sink(1));
		assert!(!index.is_sink(2));
		assert!(index.is_sink(3));
		assert!(!index.is_sink(4));
	}

	#[test]
	fn radius_and_mass() {
		let data = GraphData {
			nodes: vec![node("a", "x", 2.0), node("b", "outputs.nixosConfigurations", 0.0)],
			links: vec![link("a", "b")],
		};
		let index = GraphIndex::build(&data);

		assert_eq!(index.node_radius(0), 8.0);
		assert_eq!(index.node_radius(1), SINK_RADIUS);
		assert_eq!(index.node_mass(0), 4.0);
		assert_eq!(index.node_mass(1), SINK_MASS);
	}

	#[test]
	fn first_duplicate_id_wins() {
		let data = GraphData {
			nodes: vec![node("a", "x", 0.0), node("a", "y", 0.0), node("b", "x", 0.0)],
			links: vec![link("b", "a")],
		};
		let index = GraphIndex::build(&data);
		assert_eq!(index.node_id("a"), Some(0));
		assert_eq!(index.node_id("b"), Some(2));
		assert_eq!(index.node_id("ghost"), None);
		assert_eq!(index.link_ends(0), Some((2, 0)));
		assert!(index.neighbors(1).is_empty());
	}
}
