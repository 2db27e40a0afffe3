//! One-shot JSON fetch through `window.fetch`.

use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::error::{Result, VizError};

/// Fetch `url` and decode the body as JSON into `T`.
///
/// There is no retry or caching: a failed request is reported once and the
/// caller decides what to render instead.
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T> {
	let fetch_err = |reason: String| VizError::Fetch {
		url: url.to_string(),
		reason,
	};

	let opts = RequestInit::new();
	opts.set_method("GET");
	opts.set_mode(RequestMode::SameOrigin);

	let request = Request::new_with_str_and_init(url, &opts)
		.map_err(|e| fetch_err(format!("request error: {:?}", e)))?;

	let window = web_sys::window().ok_or_else(|| VizError::Dom("no window".into()))?;
	let resp_value = JsFuture::from(window.fetch_with_request(&request))
		.await
		.map_err(|e| fetch_err(format!("{:?}", e)))?;

	let resp: Response = resp_value
		.dyn_into()
		.map_err(|_| VizError::Dom("fetch did not yield a Response".into()))?;

	if !resp.ok() {
		return Err(VizError::Status {
			url: url.to_string(),
			status: resp.status(),
		});
	}

	let text = JsFuture::from(
		resp.text()
			.map_err(|e| fetch_err(format!("body error: {:?}", e)))?,
	)
	.await
	.map_err(|e| fetch_err(format!("body error: {:?}", e)))?;
	let text = text
		.as_string()
		.ok_or_else(|| fetch_err("body is not text".into()))?;

	serde_json::from_str(&text).map_err(|e| VizError::decode(url, e))
}
