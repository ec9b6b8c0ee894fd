use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::debug;

use super::color::Palette;
use super::dash;
use super::highlight::HighlightAnimator;
use super::index::{GraphIndex, LinkId, NodeId};
use super::style::{HOVER_PADDING, LINK_HIT_DISTANCE, simulation_parameters};
use super::types::{GraphData, HoverInfo};

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<NodeId>,
	/// Set once the pointer moves; a press and release in place is a click.
	pub moved: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Entity under the pointer. Nodes win over links.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverTarget {
	#[default]
	None,
	Node(NodeId),
	Link(LinkId),
}

/// Render-session context: the dataset, physics and every piece of per-frame state.
pub struct GraphSession {
	pub graph: ForceGraph<NodeId, ()>,
	pub index: GraphIndex,
	pub palette: Palette,
	pub highlight: HighlightAnimator,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	/// Current four-segment line dash for link strokes.
	pub line_dash: [f64; 4],
	hover: HoverTarget,
	hovered_node: Option<NodeId>,
	handles: Vec<DefaultNodeIdx>,
	positions: Vec<(f64, f64)>,
	started_ms: f64,
}

impl GraphSession {
	pub fn new(
		data: &GraphData,
		palette: Palette,
		width: f64,
		height: f64,
		now_ms: f64,
	) -> Self {
		let index = GraphIndex::build(data);
		let mut graph = ForceGraph::new(simulation_parameters());
		let n = index.node_count().max(1) as f64;
		let spread = 30.0 * n.sqrt();

		let mut handles = Vec::with_capacity(index.node_count());
		let mut positions = Vec::with_capacity(index.node_count());
		for (id, _) in index.nodes() {
			let angle = (id as f64) * 2.0 * PI / n;
			let (x, y) = (spread * angle.cos(), spread * angle.sin());
			handles.push(graph.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: index.node_mass(id) as f32,
				is_anchor: false,
				user_data: id,
			}));
			positions.push((x, y));
		}

		for (_, a, b) in index.resolved_links() {
			// Self-loops contribute no spring force.
			if a != b {
				graph.add_edge(handles[a], handles[b], EdgeData::default());
			}
		}

		debug!(
			"imp-graph: session with {} nodes, {} links",
			index.node_count(),
			index.link_count()
		);

		Self {
			highlight: HighlightAnimator::new(index.node_count(), index.link_count()),
			graph,
			index,
			palette,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			line_dash: dash::pattern(0.0),
			hover: HoverTarget::None,
			hovered_node: None,
			handles,
			positions,
			started_ms: now_ms,
		}
	}

	/// Advance one frame: physics, highlight easing and dash phase.
	pub fn tick(&mut self, dt: f32, now_ms: f64) {
		self.graph.update(dt);
		self.sync_positions();
		if !self.highlight.is_settled() {
			self.highlight.step();
		}
		self.line_dash = dash::pattern(dash::phase(now_ms - self.started_ms));
	}

	fn sync_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			positions[node.data.user_data] = (node.x() as f64, node.y() as f64);
		});
	}

	pub fn position(&self, id: NodeId) -> (f64, f64) {
		self.positions[id]
	}

	/// Move a node in graph space and pin it there.
	pub fn place_node(&mut self, id: NodeId, x: f64, y: f64) {
		let handle = self.handles[id];
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
		self.positions[id] = (x, y);
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node whose padded disc contains the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.positions
			.iter()
			.enumerate()
			.rev()
			.find(|&(id, &(x, y))| {
				let reach = self.index.node_radius(id) + HOVER_PADDING;
				(x - gx).powi(2) + (y - gy).powi(2) < reach * reach
			})
			.map(|(id, _)| id)
	}

	/// Closest link within a few screen pixels of the point.
	pub fn link_at_position(&self, sx: f64, sy: f64) -> Option<LinkId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let threshold = LINK_HIT_DISTANCE / self.transform.k;
		self.index
			.resolved_links()
			.filter(|&(_, a, b)| a != b)
			.map(|(li, a, b)| (li, segment_distance((gx, gy), self.positions[a], self.positions[b])))
			.filter(|&(_, d)| d < threshold)
			.min_by(|x, y| x.1.total_cmp(&y.1))
			.map(|(li, _)| li)
	}

	pub fn target_at(&self, sx: f64, sy: f64) -> HoverTarget {
		if let Some(id) = self.node_at_position(sx, sy) {
			HoverTarget::Node(id)
		} else if let Some(li) = self.link_at_position(sx, sy) {
			HoverTarget::Link(li)
		} else {
			HoverTarget::None
		}
	}

	pub fn hovered_node(&self) -> Option<NodeId> {
		self.hovered_node
	}

	/// Switch hover focus. Returns `true` when the focus changed.
	pub fn set_hover(&mut self, target: HoverTarget) -> bool {
		if self.hover == target {
			return false;
		}
		match target {
			HoverTarget::None => self.highlight.clear(),
			HoverTarget::Node(id) => self.highlight.focus_node(id, &self.index),
			HoverTarget::Link(li) => self.highlight.focus_link(li, &self.index),
		}
		self.hovered_node = match target {
			HoverTarget::Node(id) => Some(id),
			_ => None,
		};
		self.hover = target;
		true
	}

	pub fn hover_info(&self) -> Option<HoverInfo> {
		self.hovered_node.map(|id| {
			let node = self.index.node(id);
			HoverInfo {
				name: node.name.clone(),
				group: node.group.clone(),
			}
		})
	}

	pub fn begin_drag(&mut self, id: NodeId, sx: f64, sy: f64) {
		let (nx, ny) = self.positions[id];
		self.drag = DragState {
			active: true,
			node: Some(id),
			moved: false,
			start_x: sx,
			start_y: sy,
			node_start_x: nx,
			node_start_y: ny,
		};
	}

	pub fn drag_to(&mut self, sx: f64, sy: f64) {
		let Some(id) = self.drag.node else {
			return;
		};
		self.drag.moved = true;
		let (dx, dy) = (
			(sx - self.drag.start_x) / self.transform.k,
			(sy - self.drag.start_y) / self.transform.k,
		);
		self.place_node(id, self.drag.node_start_x + dx, self.drag.node_start_y + dy);
	}

	/// Finish a drag; a moved node keeps its dropped position.
	pub fn end_drag(&mut self) {
		if let (Some(id), true) = (self.drag.node.take(), self.drag.moved) {
			let (x, y) = self.positions[id];
			self.place_node(id, x, y);
		}
		self.drag.active = false;
		self.drag.moved = false;
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
		self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
	}

	/// Zoom by `factor` keeping the screen point fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64, min: f64, max: f64) {
		let new_k = (self.transform.k * factor).clamp(min, max);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

fn segment_distance(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
	let (abx, aby) = (b.0 - a.0, b.1 - a.1);
	let len2 = abx * abx + aby * aby;
	let t = if len2 < f64::EPSILON {
		0.0
	} else {
		(((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len2).clamp(0.0, 1.0)
	};
	let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
	((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::color::Rgba;
	use crate::components::force_graph::style::SINK_RADIUS;
	use crate::components::force_graph::types::{ClusterColors, GraphLink, GraphNode};

	fn free_session() -> GraphSession {
		let data = GraphData {
			nodes: vec![
				GraphNode {
					id: "A".into(),
					name: "modules.base\nmodules.extra".into(),
					val: 2.0,
					group: "X".into(),
				},
				GraphNode {
					id: "B".into(),
					name: "server".into(),
					val: 0.0,
					group: "outputs.nixosConfigurations".into(),
				},
			],
			links: vec![GraphLink {
				source: "A".into(),
				target: "B".into(),
			}],
		};
		let mut colors = ClusterColors::new();
		colors.insert("X".into(), "#42a5f5".into());
		GraphSession::new(&data, Palette::new(&colors), 800.0, 600.0, 0.0)
	}

	fn session() -> GraphSession {
		let mut s = free_session();
		s.place_node(0, -100.0, 0.0);
		s.place_node(1, 100.0, 0.0);
		s
	}

	fn is_anchored(s: &GraphSession, id: NodeId) -> bool {
		let mut anchored = false;
		s.graph.visit_nodes(|node| {
			if node.data.user_data == id {
				anchored = node.data.is_anchor;
			}
		});
		anchored
	}

	fn screen_of(s: &GraphSession, id: NodeId) -> (f64, f64) {
		let (x, y) = s.position(id);
		(
			x * s.transform.k + s.transform.x,
			y * s.transform.k + s.transform.y,
		)
	}

	fn near(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
	}

	fn settle(s: &mut GraphSession) {
		for _ in 0..200 {
			s.highlight.step();
		}
	}

	#[test]
	fn sink_and_radius_classification() {
		let s = session();
		assert!(!s.index.is_sink(0));
		assert!(s.index.is_sink(1));
		assert_eq!(s.index.node_radius(0), 8.0);
		assert_eq!(s.index.node_radius(1), SINK_RADIUS);
	}

	#[test]
	fn hovering_a_node_then_leaving_clears_everything() {
		let mut s = session();
		assert!(s.set_hover(HoverTarget::Node(0)));
		settle(&mut s);
		assert_eq!(s.highlight.node(0), 1.0);
		assert_eq!(s.highlight.node(1), 1.0);
		assert_eq!(s.highlight.link(0), 1.0);
		assert_eq!(
			s.hover_info(),
			Some(HoverInfo {
				name: "modules.base\nmodules.extra".into(),
				group: "X".into(),
			})
		);

		assert!(s.set_hover(HoverTarget::None));
		assert_eq!(s.highlight.node_channel(0).target, 0.0);
		assert_eq!(s.highlight.node_channel(1).target, 0.0);
		assert_eq!(s.highlight.link_channel(0).target, 0.0);
		settle(&mut s);
		assert!(s.highlight.is_settled());
		assert_eq!(s.highlight.node(0), 0.0);
		assert_eq!(s.hover_info(), None);
	}

	#[test]
	fn repeated_hover_is_not_a_change() {
		let mut s = session();
		assert!(s.set_hover(HoverTarget::Link(0)));
		assert!(!s.set_hover(HoverTarget::Link(0)));
		assert_eq!(s.hovered_node(), None);
		assert_eq!(s.hover_info(), None);
	}

	#[test]
	fn hit_testing_prefers_nodes_over_links() {
		let s = session();
		// Graph origin sits at the canvas center with k = 1.
		assert_eq!(s.target_at(300.0, 300.0), HoverTarget::Node(0));
		assert_eq!(s.target_at(500.0, 300.0), HoverTarget::Node(1));
		assert_eq!(s.target_at(400.0, 302.0), HoverTarget::Link(0));
		assert_eq!(s.target_at(400.0, 350.0), HoverTarget::None);
	}

	#[test]
	fn hover_padding_extends_node_reach() {
		let s = session();
		// Radius 8 plus padding 8.
		assert_eq!(s.node_at_position(300.0 + 15.0, 300.0), Some(0));
		assert_eq!(s.node_at_position(300.0 - 17.0, 300.0), None);
	}

	#[test]
	fn drag_end_pins_node_at_drop_point() {
		let mut s = free_session();
		assert!(!is_anchored(&s, 0));
		let start = s.position(0);
		for _ in 0..20 {
			s.tick(0.016, 16.0);
		}
		assert!(!near(s.position(0), start), "free node should move under physics");

		let (sx, sy) = screen_of(&s, 0);
		let before = s.position(0);
		s.begin_drag(0, sx, sy);
		s.drag_to(sx + 20.0, sy + 40.0);
		s.end_drag();

		let drop = (before.0 + 20.0, before.1 + 40.0);
		assert!(!s.drag.active);
		assert!(is_anchored(&s, 0));
		assert!(near(s.position(0), drop));

		for i in 0..20 {
			s.tick(0.016, 16.0 * i as f64);
			assert!(near(s.position(0), drop));
		}
	}

	#[test]
	fn click_without_movement_leaves_node_free() {
		let mut s = free_session();
		let (sx, sy) = screen_of(&s, 0);
		s.begin_drag(0, sx, sy);
		s.end_drag();

		assert!(!s.drag.active);
		assert!(!s.drag.moved);
		assert!(!is_anchored(&s, 0));
		assert!(!is_anchored(&s, 1));
	}

	#[test]
	fn session_uses_the_given_palette() {
		let s = free_session();
		assert_eq!(s.palette.color_for("X"), Rgba::rgb(0x42, 0xa5, 0xf5));
		assert_eq!(s.palette.color_for("missing"), Rgba::rgb(158, 158, 158));
	}

	#[test]
	fn zoom_keeps_point_under_cursor() {
		let mut s = session();
		let before = s.screen_to_graph(250.0, 120.0);
		s.zoom_at(250.0, 120.0, 1.1, 0.1, 10.0);
		let after = s.screen_to_graph(250.0, 120.0);
		assert!((before.0 - after.0).abs() < 1e-9);
		assert!((before.1 - after.1).abs() < 1e-9);
	}

	#[test]
	fn tick_advances_dash_pattern() {
		let mut s = session();
		s.tick(0.016, 100.0);
		assert_eq!(s.line_dash, dash::pattern(0.25));
	}

	#[test]
	fn segment_distance_clamps_to_endpoints() {
		assert_eq!(segment_distance((0.0, 5.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
		assert_eq!(segment_distance((-3.0, 4.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
		assert_eq!(segment_distance((1.0, 1.0), (0.0, 0.0), (0.0, 0.0)), 2f64.sqrt());
	}
}
