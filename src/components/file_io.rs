//! Browser file plumbing: reading an uploaded file, offering a download, and
//! blocking notifications.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, File, FileReader, HtmlAnchorElement, Url};

use crate::error::{GrafoError, Result};

fn io_error(value: JsValue) -> GrafoError {
	GrafoError::Io(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

type Completion = Rc<RefCell<Option<Box<dyn FnOnce(Result<String>)>>>>;

/// Reads `file` as UTF-8 text and calls `on_done` once with the contents.
pub fn read_file_text(file: &File, on_done: impl FnOnce(Result<String>) + 'static) -> Result<()> {
	let reader = FileReader::new().map_err(io_error)?;
	let completion: Completion = Rc::new(RefCell::new(Some(Box::new(on_done))));

	let (reader_load, completion_load) = (reader.clone(), completion.clone());
	let onload = wasm_bindgen::closure::Closure::once_into_js(move || {
		let text = reader_load
			.result()
			.ok()
			.and_then(|value| value.as_string())
			.ok_or_else(|| GrafoError::Io("file contents are not text".to_string()));
		if let Some(done) = completion_load.borrow_mut().take() {
			done(text);
		}
	});
	let (reader_error, completion_error) = (reader.clone(), completion);
	let onerror = wasm_bindgen::closure::Closure::once_into_js(move || {
		let message = reader_error
			.error()
			.map(|e| e.message())
			.unwrap_or_else(|| "unknown error".to_string());
		if let Some(done) = completion_error.borrow_mut().take() {
			done(Err(GrafoError::Io(message)));
		}
	});

	reader.set_onload(Some(onload.unchecked_ref()));
	reader.set_onerror(Some(onerror.unchecked_ref()));
	reader.read_as_text(file).map_err(io_error)
}

/// Offers `text` as a JSON file download named `file_name`.
pub fn download_json(file_name: &str, text: &str) -> Result<()> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| GrafoError::Io("no document".to_string()))?;

	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&Array::of1(&JsValue::from_str(text)), &options)
		.map_err(io_error)?;
	let url = Url::create_object_url_with_blob(&blob).map_err(io_error)?;

	let anchor: HtmlAnchorElement = document
		.create_element("a")
		.map_err(io_error)?
		.dyn_into()
		.map_err(|_| GrafoError::Io("could not create link element".to_string()))?;
	anchor.set_href(&url);
	anchor.set_download(file_name);
	anchor.click();

	Url::revoke_object_url(&url).map_err(io_error)
}

/// Shows a blocking message to the user.
pub fn notify(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}
