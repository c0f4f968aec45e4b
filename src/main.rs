use leptos::prelude::*;
use netview::{App, init_logging};

fn main() {
	init_logging();
	mount_to_body(App);
}
