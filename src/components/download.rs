use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Saves `text` as a plain text file through a temporary object URL.
pub fn download_file(file_name: &str, text: &str) -> Result<(), JsValue> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| JsValue::from_str("no document"))?;
	let body = document
		.body()
		.ok_or_else(|| JsValue::from_str("document has no body"))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let options = BlobPropertyBag::new();
	options.set_type("text/plain");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	body.append_child(&anchor)?;
	anchor.click();
	body.remove_child(&anchor)?;
	Url::revoke_object_url(&url)
}

/// `name` with its extension replaced by `extension`.
pub fn export_file_name(name: &str, extension: &str) -> String {
	let stem = match name.rsplit_once('.') {
		Some((stem, _)) if !stem.is_empty() => stem,
		_ => name,
	};
	let stem = if stem.is_empty() { "network" } else { stem };
	format!("{stem}.{extension}")
}
