use std::f64::consts::PI;

use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::GraphSession;
use super::style::{
	ACCENT, ARROW_BASE, ARROW_LENGTH, BACKGROUND, LABEL_COLOR, LABEL_FONT, LINK_BASE, LINK_WIDTH,
	LINK_WIDTH_HIGHLIGHT, RING_GROWTH, RING_HOVERED, RING_NEIGHBOR, SNAP_THRESHOLD, TOOLTIP_BG,
	TOOLTIP_FONT,
};

pub fn render(state: &GraphSession, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_links(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_tooltip(state, ctx);
}

/// Link stroke width for a highlight intensity, in screen pixels.
pub fn link_width(hl: f64) -> f64 {
	LINK_WIDTH + hl * LINK_WIDTH_HIGHLIGHT
}

fn draw_links(state: &GraphSession, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let dash: Array = state
		.line_dash
		.iter()
		.map(|v| JsValue::from_f64(v / k))
		.collect();

	for (li, a, b) in state.index.resolved_links() {
		let ((x1, y1), (x2, y2)) = (state.position(a), state.position(b));
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let hl = state.highlight.link(li);
		let (ux, uy) = (dx / dist, dy / dist);
		let target_r = state.index.node_radius(b);
		let (tip_x, tip_y) = (x2 - ux * target_r, y2 - uy * target_r);
		let (back_x, back_y) = (tip_x - ux * ARROW_LENGTH, tip_y - uy * ARROW_LENGTH);

		ctx.set_stroke_style_str(&LINK_BASE.lerp(ACCENT, hl).to_string());
		ctx.set_line_width(link_width(hl) / k);
		let _ = ctx.set_line_dash(&dash);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(back_x, back_y);
		ctx.stroke();

		let _ = ctx.set_line_dash(&Array::new());
		ctx.set_fill_style_str(&ARROW_BASE.lerp(ACCENT, hl).to_string());
		let (px, py) = (-uy * ARROW_LENGTH * 0.5, ux * ARROW_LENGTH * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&Array::new());
}

fn draw_nodes(state: &GraphSession, ctx: &CanvasRenderingContext2d) {
	let hovered = state.hovered_node();

	for (id, node) in state.index.nodes() {
		let (x, y) = state.position(id);
		let radius = state.index.node_radius(id);
		let hl = state.highlight.node(id);

		if hl > SNAP_THRESHOLD {
			let ring = if hovered == Some(id) {
				RING_HOVERED
			} else {
				RING_NEIGHBOR
			};
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius * (1.0 + RING_GROWTH * hl), 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&ring.with_alpha(hl).to_string());
			ctx.fill();
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&state.palette.color_for(&node.group).to_string());
		ctx.fill();

		if state.index.is_sink(id) {
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			ctx.set_fill_style_str(LABEL_COLOR);
			ctx.set_font(LABEL_FONT);
			let _ = ctx.fill_text(first_line(&node.name), x, y);
		}
	}
}

/// Name tooltip for a hovered node that has no label of its own.
fn draw_tooltip(state: &GraphSession, ctx: &CanvasRenderingContext2d) {
	let Some(id) = state.hovered_node() else {
		return;
	};
	if state.index.is_sink(id) {
		return;
	}
	let (gx, gy) = state.position(id);
	let (sx, sy) = (
		gx * state.transform.k + state.transform.x,
		gy * state.transform.k + state.transform.y,
	);
	let lines: Vec<&str> = state.index.node(id).name.lines().collect();
	if lines.is_empty() {
		return;
	}

	ctx.set_font(TOOLTIP_FONT);
	ctx.set_text_align("left");
	ctx.set_text_baseline("top");
	let width = lines
		.iter()
		.filter_map(|l| ctx.measure_text(l).ok())
		.map(|m| m.width())
		.fold(0.0, f64::max);
	let (line_h, pad) = (15.0, 6.0);
	let (box_w, box_h) = (width + 2.0 * pad, lines.len() as f64 * line_h + 2.0 * pad);
	let offset = state.index.node_radius(id) * state.transform.k + 10.0;
	let left = (sx + offset).min(state.width - box_w).max(0.0);
	let top = (sy - box_h / 2.0).clamp(0.0, (state.height - box_h).max(0.0));

	ctx.set_fill_style_str(TOOLTIP_BG);
	ctx.fill_rect(left, top, box_w, box_h);
	ctx.set_fill_style_str(LABEL_COLOR);
	for (i, line) in lines.iter().enumerate() {
		let _ = ctx.fill_text(line, left + pad, top + pad + i as f64 * line_h);
	}
}

fn first_line(name: &str) -> &str {
	name.split('\n').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn link_width_grows_with_highlight() {
		assert_eq!(link_width(0.0), 2.0);
		assert_eq!(link_width(1.0), 3.5);
	}

	#[test]
	fn sink_label_uses_first_line() {
		assert_eq!(first_line("server\nhosts.server"), "server");
		assert_eq!(first_line(""), "");
	}
}
