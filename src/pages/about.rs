use leptos::prelude::*;
use leptos_router::components::A;

/// Project page with links to the hosted demo and the source.
#[component]
pub fn About() -> impl IntoView {
	view! {
		<div class="about">
			<h1>"pNetView"</h1>
			<p>
				"Co-occurrence network viewer: import token groups or a network document, "
				"filter it down to the strongest links and explore it on a force-directed canvas."
			</p>
			<p>
				<a href="https://phyng.com/pnetview">"Demo"</a>
				" "
				<a href="https://github.com/phyng/pnetview">"Github"</a>
			</p>
			<A href="/">"Back to the network"</A>
		</div>
	}
}
