use leptos::prelude::*;
use log::error;

use crate::components::data_panel::DataPanel;
use crate::components::filter_panel::FilterPanel;
use crate::components::force_graph::{ForceGraphCanvas, GraphData, RenderOptions};
use crate::network::{DEFAULT_DEMO_DATASET, FilterConfig, Network, filter_network, get_demo_data};

fn initial_network() -> Network {
	get_demo_data(DEFAULT_DEMO_DATASET).unwrap_or_else(|e| {
		error!("{e}");
		Network::empty(DEFAULT_DEMO_DATASET)
	})
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// canonical network; the panels replace it, never patch it
	let network = RwSignal::new(initial_network());
	let filters = RwSignal::new(FilterConfig::default());
	let options = RwSignal::new(RenderOptions::default());

	// disposable filtered copy, recomputed on every change
	let graph_data = Memo::new(move |_| {
		let filtered = filters.with(|f| network.with(|n| filter_network(n, f)));
		GraphData::from_network(&filtered, options.get())
	});

	view! {
		<div class="fullscreen-graph">
			<ForceGraphCanvas data=graph_data fullscreen=true />
			<div class="graph-overlay">
				<h1>"pNetView"</h1>
				<p class="subtitle">
					"Drag nodes to pin them, double click to release. Scroll to zoom. Drag background to pan."
				</p>
			</div>
			<aside class="left-toolbox">
				<strong>"Data"</strong>
				<DataPanel network=network />
			</aside>
			<aside class="right-toolbox">
				<FilterPanel filters=filters options=options />
			</aside>
		</div>
	}
}
