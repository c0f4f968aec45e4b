use leptos::prelude::*;
use log::{info, warn};
use web_sys::{Event, MouseEvent};

use super::download::{download_file, export_file_name};
use crate::network::{
	DEFAULT_DEMO_DATASET, Network, StyleRow, apply_style_rows, demo_dataset_names, get_demo_data,
	network_to_correlation_text, network_to_json, parse_network_text, style_rows,
};

/// Dataset picker, paste import, exports and the bulk style editor.
///
/// `network` is the canonical network; it is only ever replaced wholesale,
/// and only when an import or edit succeeds.
#[component]
pub fn DataPanel(network: RwSignal<Network>) -> impl IntoView {
	let import_name = RwSignal::new(String::from("import.csv"));
	let import_text = RwSignal::new(String::new());
	let message = RwSignal::new(None::<String>);
	let export_text = RwSignal::new(String::new());
	let export_name = RwSignal::new(String::new());
	let style_text = RwSignal::new(String::new());

	let on_demo = move |ev: Event| {
		let name = event_target_value(&ev);
		match get_demo_data(&name) {
			Ok(demo) => {
				message.set(None);
				network.set(demo);
			}
			Err(e) => message.set(Some(e.to_string())),
		}
	};

	let on_import = move |_: MouseEvent| {
		let name = import_name.get_untracked();
		match import_text.with_untracked(|text| parse_network_text(&name, text)) {
			Ok(imported) => {
				let dangling = imported.dangling_edges().len();
				if dangling > 0 {
					warn!("{name}: {dangling} edges reference missing nodes");
				}
				info!(
					"imported {name}: {} nodes, {} edges",
					imported.nodes.len(),
					imported.edges.len()
				);
				message.set(None);
				network.set(imported);
			}
			Err(e) => {
				warn!("import rejected: {e}");
				message.set(Some(e.to_string()));
			}
		}
	};

	let on_export_json = move |_: MouseEvent| match network.with_untracked(network_to_json) {
		Ok(text) => {
			export_name.set(network.with_untracked(|n| export_file_name(&n.name, "json")));
			export_text.set(text);
		}
		Err(e) => message.set(Some(e.to_string())),
	};

	let on_export_matrix = move |_: MouseEvent| {
		export_name.set(network.with_untracked(|n| export_file_name(&n.name, "csv")));
		export_text.set(network.with_untracked(network_to_correlation_text));
	};

	let on_download = move |_: MouseEvent| {
		let name = export_name.get_untracked();
		if let Err(e) = export_text.with_untracked(|text| download_file(&name, text)) {
			warn!("download of {name} failed: {e:?}");
		}
	};

	let on_load_styles = move |_: MouseEvent| {
		let rows = network.with_untracked(style_rows);
		match serde_json::to_string_pretty(&rows) {
			Ok(text) => style_text.set(text),
			Err(e) => message.set(Some(e.to_string())),
		}
	};

	let on_apply_styles = move |_: MouseEvent| {
		match style_text.with_untracked(|text| serde_json::from_str::<Vec<StyleRow>>(text)) {
			Ok(rows) => {
				let edited = network.with_untracked(|n| apply_style_rows(n, &rows));
				message.set(None);
				network.set(edited);
			}
			Err(e) => message.set(Some(format!("style rows: {e}"))),
		}
	};

	view! {
		<section class="data-panel">
			<div>
				<div>"Network: " {move || network.with(|n| n.name.clone())}</div>
				<div>"Nodes: " {move || network.with(|n| n.nodes.len())}</div>
				<div>"Edges: " {move || network.with(|n| n.edges.len())}</div>
				<div>
					"Directed: " {move || if network.with(Network::is_directed) { "yes" } else { "no" }}
				</div>
			</div>

			<label>
				"Demo data "
				<select on:change=on_demo>
					{demo_dataset_names()
						.into_iter()
						.map(|name| {
							view! {
								<option value=name selected={name == DEFAULT_DEMO_DATASET}>
									{name}
								</option>
							}
						})
						.collect_view()}
				</select>
			</label>

			<div class="import">
				<input
					type="text"
					prop:value=move || import_name.get()
					on:input=move |ev| import_name.set(event_target_value(&ev))
				/>
				<textarea
					rows="6"
					placeholder="JSON network, or one comma separated group per line"
					prop:value=move || import_text.get()
					on:input=move |ev| import_text.set(event_target_value(&ev))
				/>
				<button on:click=on_import>"Import"</button>
			</div>

			{move || message.get().map(|text| view! { <p class="error">{text}</p> })}

			<div class="export">
				<button on:click=on_export_json>"Export JSON"</button>
				<button on:click=on_export_matrix>"Export correlation"</button>
				<button
					on:click=on_download
					disabled=move || export_text.with(String::is_empty)
				>
					{move || {
						let name = export_name.get();
						if name.is_empty() { "Download".to_string() } else { format!("Download {name}") }
					}}
				</button>
				<textarea rows="6" readonly=true prop:value=move || export_text.get() />
			</div>

			<div class="styles">
				<button on:click=on_load_styles>"Edit styles"</button>
				<button on:click=on_apply_styles>"Apply styles"</button>
				<textarea
					rows="8"
					prop:value=move || style_text.get()
					on:input=move |ev| style_text.set(event_target_value(&ev))
				/>
			</div>
		</section>
	}
}
