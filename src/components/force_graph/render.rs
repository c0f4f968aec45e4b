use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{EdgeInfo, ForceGraphState};

const BACKGROUND: &str = "#1a1a2e";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let arrow_size = 8.0 / k;
	let t = ease_out_cubic(state.hover.highlight_t);
	let positions = state.positions();

	for (src, tgt, edge) in &state.edges {
		let (Some(&(x1, y1, r1)), Some(&(x2, y2, r2))) = (positions.get(src), positions.get(tgt))
		else {
			continue;
		};

		let is_highlighted = state.is_highlighted(*src) && state.is_highlighted(*tgt);
		// t=0: every edge at its own opacity; t=1: highlighted edges brighten, others dim
		let (alpha, width_factor) = if is_highlighted {
			((edge.opacity + 0.4 * t).min(1.0), 1.0 + 0.3 * t)
		} else {
			(edge.opacity * (1.0 - 0.7 * t), 1.0 - 0.3 * t)
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&edge.color);
		ctx.set_fill_style_str(&edge.color);
		ctx.set_line_width((edge.width * width_factor).max(0.5 / k));

		if edge.self_loop {
			draw_self_loop(ctx, x1, y1, r1, edge);
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		// control point sits `curve_offset` to the left of the midpoint
		let (cx, cy) = (
			(x1 + x2) / 2.0 - uy * edge.curve_offset,
			(y1 + y2) / 2.0 + ux * edge.curve_offset,
		);
		// direction into the target along the curve
		let (ex, ey) = (x2 - cx, y2 - cy);
		let elen = (ex * ex + ey * ey).sqrt().max(0.001);
		let (vx, vy) = (ex / elen, ey / elen);
		let tip_gap = if edge.arrow { r2 + arrow_size } else { r2 };

		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		if edge.curve_offset == 0.0 {
			ctx.line_to(x2 - ux * tip_gap, y2 - uy * tip_gap);
		} else {
			ctx.quadratic_curve_to(cx, cy, x2 - vx * tip_gap, y2 - vy * tip_gap);
		}
		ctx.stroke();

		if edge.arrow {
			let (tip_x, tip_y) = (x2 - vx * r2, y2 - vy * r2);
			let (back_x, back_y) = (tip_x - vx * arrow_size, tip_y - vy * arrow_size);
			let (px, py) = (-vy * arrow_size * 0.5, vx * arrow_size * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
	ctx.set_global_alpha(1.0);
}

fn draw_self_loop(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, edge: &EdgeInfo) {
	// a circle of diameter `curve_offset / 2` resting on top of the node
	let loop_radius = edge.curve_offset / 4.0;
	ctx.begin_path();
	let _ = ctx.arc(x, y - radius - loop_radius, loop_radius, 0.0, 2.0 * PI);
	ctx.stroke();
}

fn fill_node(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, fill: &str) {
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(fill);
	ctx.fill();
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (alpha, radius) = (1.0 - 0.7 * t, info.radius * (1.0 - 0.15 * t));

		ctx.set_global_alpha(alpha * info.fill_opacity);
		fill_node(ctx, x, y, radius, &info.fill);
		ctx.set_global_alpha(alpha);
		if let Some(stroke) = &info.stroke {
			ctx.set_stroke_style_str(stroke);
			ctx.set_line_width(1.0 / k);
			ctx.stroke();
		}
		ctx.set_global_alpha(1.0);

		if let Some(label) = &info.label {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.8));
			ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(
				info.radius * (1.0 + 0.35 * t),
				info.radius * (1.8 + 1.2 * t),
			)
		} else if is_neighbor {
			(info.radius * (1.0 + 0.2 * t), info.radius * (1.4 + 0.6 * t))
		} else {
			(info.radius, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius)
			{
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.set_global_alpha(info.fill_opacity);
		fill_node(ctx, x, y, radius, &info.fill);
		ctx.set_global_alpha(1.0);

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		if let Some(label) = &info.label {
			ctx.set_fill_style_str("white");
			ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
			let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
		}
	});
}
