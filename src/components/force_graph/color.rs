//! Color parsing, interpolation and the group palette.

use std::collections::HashMap;
use std::fmt;

use log::warn;

use super::style::DEFAULT_NODE_COLOR;
use super::types::ClusterColors;

/// RGBA color with integer channels and fractional alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Rgba {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Parse `#rgb`, `#rrggbb`, `rgb(r,g,b)` or `rgba(r,g,b,a)`.
	pub fn parse(s: &str) -> Option<Self> {
		let s = s.trim();
		if let Some(hex) = s.strip_prefix('#') {
			return Self::parse_hex(hex);
		}
		let body = s
			.strip_prefix("rgba(")
			.or_else(|| s.strip_prefix("rgb("))?
			.strip_suffix(')')?;
		let parts: Vec<&str> = body.split(',').map(str::trim).collect();
		let channel = |p: &str| p.parse::<f64>().ok().filter(|v| (0.0..=255.0).contains(v));
		match parts.as_slice() {
			[r, g, b] => Some(Self::rgb(
				channel(r)?.round() as u8,
				channel(g)?.round() as u8,
				channel(b)?.round() as u8,
			)),
			[r, g, b, a] => Some(Self {
				r: channel(r)?.round() as u8,
				g: channel(g)?.round() as u8,
				b: channel(b)?.round() as u8,
				a: a.parse::<f64>().ok()?.clamp(0.0, 1.0),
			}),
			_ => None,
		}
	}

	fn parse_hex(hex: &str) -> Option<Self> {
		if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
			return None;
		}
		let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
		let single = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
		match hex.len() {
			3 => Some(Self::rgb(single(0)?, single(1)?, single(2)?)),
			6 => Some(Self::rgb(pair(0)?, pair(2)?, pair(4)?)),
			_ => None,
		}
	}

	/// Linear blend from `self` to `other`; RGB rounded, alpha kept to two decimals.
	pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
		let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
		let alpha = self.a + (other.a - self.a) * t;
		Rgba {
			r: mix(self.r, other.r),
			g: mix(self.g, other.g),
			b: mix(self.b, other.b),
			a: (alpha * 100.0).round() / 100.0,
		}
	}

	/// Same color with a different alpha.
	pub fn with_alpha(self, a: f64) -> Rgba {
		Rgba { a, ..self }
	}
}

impl fmt::Display for Rgba {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgba({},{},{},{:.2})", self.r, self.g, self.b, self.a)
	}
}

/// Validated group colors with a fallback for unknown or malformed entries.
#[derive(Clone, Debug)]
pub struct Palette {
	colors: HashMap<String, Rgba>,
	default: Rgba,
}

impl Palette {
	pub fn new(raw: &ClusterColors) -> Self {
		let colors: HashMap<String, Rgba> = raw
			.iter()
			.filter_map(|(group, css)| match Rgba::parse(css) {
				Some(c) => Some((group.clone(), c)),
				None => {
					warn!("imp-graph: ignoring malformed color {:?} for group {}", css, group);
					None
				}
			})
			.collect();
		Self {
			colors,
			default: DEFAULT_NODE_COLOR,
		}
	}

	pub fn color_for(&self, group: &str) -> Rgba {
		self.colors.get(group).copied().unwrap_or(self.default)
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new(&ClusterColors::new())
	}
}
