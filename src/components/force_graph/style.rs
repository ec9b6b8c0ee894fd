//! Visual and behavioral constants for the registry graph.

use force_graph::SimulationParameters;

use super::color::Rgba;

// --- Colors ---
pub const BACKGROUND: &str = "#2d2d2d";
/// `#9e9e9e`, used for groups missing from the palette.
pub const DEFAULT_NODE_COLOR: Rgba = Rgba::rgb(158, 158, 158);
pub const LINK_BASE: Rgba = Rgba::rgba(255, 255, 255, 0.4);
pub const ARROW_BASE: Rgba = Rgba::rgba(255, 255, 255, 0.6);
pub const ACCENT: Rgba = Rgba::rgb(255, 87, 34);
/// Ring of the hovered node; alpha follows its intensity.
pub const RING_HOVERED: Rgba = Rgba::rgb(255, 87, 34);
/// Ring of every other highlighted node.
pub const RING_NEIGHBOR: Rgba = Rgba::rgb(255, 171, 0);
pub const LABEL_COLOR: &str = "#fff";
pub const LABEL_FONT: &str = "bold 10px sans-serif";
pub const TOOLTIP_FONT: &str = "12px sans-serif";
pub const TOOLTIP_BG: &str = "rgba(20,20,20,0.85)";

// --- Nodes ---
pub const SINK_RADIUS: f64 = 20.0;
pub const SINK_MASS: f64 = 12.0;
pub const HOVER_PADDING: f64 = 8.0;
pub const RING_GROWTH: f64 = 0.4;
/// Group labels of terminal configuration outputs.
pub const SINK_GROUPS: [&str; 2] = ["outputs.nixosConfigurations", "outputs.homeConfigurations"];

// --- Links ---
pub const LINK_WIDTH: f64 = 2.0;
pub const LINK_WIDTH_HIGHLIGHT: f64 = 1.5;
pub const LINK_HIT_DISTANCE: f64 = 4.0;
pub const ARROW_LENGTH: f64 = 6.0;

// --- Animation ---
pub const TRANSITION_SPEED: f64 = 0.15;
pub const SNAP_THRESHOLD: f64 = 0.01;
pub const DASH_LEN: f64 = 4.0;
pub const GAP_LEN: f64 = 6.0;
pub const DASH_PERIOD_MS: f64 = 400.0;
pub const FRAME_DT: f32 = 0.016;

// --- Zoom ---
pub const ZOOM_MIN: f64 = 0.1;
pub const ZOOM_MAX: f64 = 10.0;

/// Physics parameters for the registry layout.
pub fn simulation_parameters() -> SimulationParameters {
	SimulationParameters {
		force_charge: 250.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	}
}
