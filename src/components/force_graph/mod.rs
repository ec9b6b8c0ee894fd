mod color;
mod component;
mod dash;
mod highlight;
mod index;
mod render;
mod state;
mod style;
pub mod types;

pub use color::Palette;
pub use component::ForceGraphCanvas;
pub use types::{ClusterColors, GraphData, HoverInfo, group_label};
