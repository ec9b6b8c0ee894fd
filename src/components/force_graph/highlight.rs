//! Per-node and per-link highlight intensities easing toward hover targets.

use super::index::{GraphIndex, LinkId, NodeId};
use super::style::{SNAP_THRESHOLD, TRANSITION_SPEED};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Channel {
	pub value: f64,
	pub target: f64,
}

impl Channel {
	/// Move a fixed fraction of the remaining distance, snapping once close.
	fn step(&mut self) {
		if self.value == self.target {
			return;
		}
		let next = self.value + (self.target - self.value) * TRANSITION_SPEED;
		self.value = if (next - self.target).abs() < SNAP_THRESHOLD {
			self.target
		} else {
			next
		};
	}

	fn settled(&self) -> bool {
		self.value == self.target
	}
}

pub struct HighlightAnimator {
	nodes: Vec<Channel>,
	links: Vec<Channel>,
}

impl HighlightAnimator {
	pub fn new(node_count: usize, link_count: usize) -> Self {
		Self {
			nodes: vec![Channel::default(); node_count],
			links: vec![Channel::default(); link_count],
		}
	}

	pub fn clear(&mut self) {
		for c in self.nodes.iter_mut().chain(self.links.iter_mut()) {
			c.target = 0.0;
		}
	}

	/// Light up a node, its neighbors and its incident links.
	pub fn focus_node(&mut self, id: NodeId, index: &GraphIndex) {
		self.clear();
		self.nodes[id].target = 1.0;
		for &n in index.neighbors(id) {
			self.nodes[n].target = 1.0;
		}
		for &l in index.incident_links(id) {
			self.links[l].target = 1.0;
		}
	}

	/// Light up a link and both of its endpoints.
	pub fn focus_link(&mut self, id: LinkId, index: &GraphIndex) {
		self.clear();
		let Some((a, b)) = index.link_ends(id) else {
			return;
		};
		self.links[id].target = 1.0;
		self.nodes[a].target = 1.0;
		self.nodes[b].target = 1.0;
	}

	pub fn step(&mut self) {
		for c in self.nodes.iter_mut().chain(self.links.iter_mut()) {
			c.step();
		}
	}

	pub fn node(&self, id: NodeId) -> f64 {
		self.nodes[id].value
	}

	pub fn link(&self, id: LinkId) -> f64 {
		self.links[id].value
	}

	#[cfg(test)]
	pub fn node_channel(&self, id: NodeId) -> Channel {
		self.nodes[id]
	}

	#[cfg(test)]
	pub fn link_channel(&self, id: LinkId) -> Channel {
		self.links[id]
	}

	/// No channel is still moving toward its target.
	pub fn is_settled(&self) -> bool {
		self.nodes.iter().chain(self.links.iter()).all(Channel::settled)
	}
}
