use std::str::FromStr;

use leptos::prelude::*;
use web_sys::Event;

use super::force_graph::RenderOptions;
use crate::network::FilterConfig;

fn parse_value<T: FromStr>(ev: &Event) -> Option<T> {
	event_target_value(ev).trim().parse().ok()
}

/// Empty text clears an override.
fn optional_text(ev: &Event) -> Option<String> {
	let value = event_target_value(ev).trim().to_string();
	(!value.is_empty()).then_some(value)
}

/// Controls for the [`FilterConfig`] applied before drawing, plus render toggles.
#[component]
pub fn FilterPanel(
	filters: RwSignal<FilterConfig>,
	options: RwSignal<RenderOptions>,
) -> impl IntoView {
	view! {
		<section class="filter-panel">
			<strong>"Filter"</strong>
			<label>
				"Top nodes "
				<input
					type="number"
					min="0"
					prop:value=move || filters.with(|f| f.node_top_count.to_string())
					on:input=move |ev| {
						if let Some(v) = parse_value::<usize>(&ev) {
							filters.update(|f| f.node_top_count = v);
						}
					}
				/>
			</label>
			<label>
				"Edges per node "
				<input
					type="number"
					min="0"
					prop:value=move || filters.with(|f| f.edge_top_count.to_string())
					on:input=move |ev| {
						if let Some(v) = parse_value::<usize>(&ev) {
							filters.update(|f| f.edge_top_count = v);
						}
					}
				/>
			</label>
			<label>
				"Min edge value "
				<input
					type="number"
					min="0"
					step="1"
					prop:value=move || filters.with(|f| f.min_edge_value.to_string())
					on:input=move |ev| {
						if let Some(v) = parse_value::<f64>(&ev) {
							filters.update(|f| f.min_edge_value = v);
						}
					}
				/>
			</label>

			<strong>"Style"</strong>
			<label>
				"Node size "
				<input
					type="range"
					min="0.1"
					max="3"
					step="0.1"
					prop:value=move || filters.with(|f| f.node_size_scale.to_string())
					on:input=move |ev| {
						if let Some(v) = parse_value::<f64>(&ev).filter(|v| *v >= 0.0) {
							filters.update(|f| f.node_size_scale = v);
						}
					}
				/>
			</label>
			<label>
				"Edge width "
				<input
					type="range"
					min="0.1"
					max="3"
					step="0.1"
					prop:value=move || filters.with(|f| f.edge_line_width_scale.to_string())
					on:input=move |ev| {
						if let Some(v) = parse_value::<f64>(&ev).filter(|v| *v >= 0.0) {
							filters.update(|f| f.edge_line_width_scale = v);
						}
					}
				/>
			</label>
			<label>
				"Node fill "
				<input
					type="text"
					placeholder="#5b8ff9"
					prop:value=move || filters.with(|f| f.node_style.fill.clone().unwrap_or_default())
					on:change=move |ev| filters.update(|f| f.node_style.fill = optional_text(&ev))
				/>
			</label>
			<label>
				"Node stroke "
				<input
					type="text"
					prop:value=move || filters.with(|f| f.node_style.stroke.clone().unwrap_or_default())
					on:change=move |ev| filters.update(|f| f.node_style.stroke = optional_text(&ev))
				/>
			</label>
			<label>
				"Node opacity "
				<input
					type="number"
					min="0"
					max="1"
					step="0.1"
					prop:value=move || {
						filters.with(|f| f.node_style.fill_opacity.map(|v| v.to_string()).unwrap_or_default())
					}
					on:change=move |ev| {
						let v = parse_value::<f64>(&ev).map(|v| v.clamp(0.0, 1.0));
						filters.update(|f| f.node_style.fill_opacity = v);
					}
				/>
			</label>
			<label>
				"Edge stroke "
				<input
					type="text"
					prop:value=move || filters.with(|f| f.edge_style.stroke.clone().unwrap_or_default())
					on:change=move |ev| filters.update(|f| f.edge_style.stroke = optional_text(&ev))
				/>
			</label>
			<label>
				"Edge opacity "
				<input
					type="number"
					min="0"
					max="1"
					step="0.1"
					prop:value=move || {
						filters.with(|f| f.edge_style.opacity.map(|v| v.to_string()).unwrap_or_default())
					}
					on:change=move |ev| {
						let v = parse_value::<f64>(&ev).map(|v| v.clamp(0.0, 1.0));
						filters.update(|f| f.edge_style.opacity = v);
					}
				/>
			</label>
			<label>
				<input
					type="checkbox"
					prop:checked=move || options.with(|o| o.show_arrows)
					on:change=move |ev| {
						let checked = event_target_checked(&ev);
						options.update(|o| o.show_arrows = checked);
					}
				/>
				" Arrows"
			</label>
			<button on:click=move |_| filters.set(FilterConfig::default())>"Reset"</button>
		</section>
	}
}
