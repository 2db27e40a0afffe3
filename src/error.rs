//! Error type shared by the data loaders.

use thiserror::Error;

/// Failures while loading visualization data.
///
/// Variants hold rendered messages, never `JsValue`s; the type is
/// `Send + Sync` and renders inside an `ErrorBoundary`.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum VizError {
	/// The request could not be built or the network call was rejected.
	#[error("fetch of {url} failed: {reason}")]
	Fetch {
		/// Requested resource.
		url: String,
		/// Browser-reported cause.
		reason: String,
	},

	/// The server answered with a non-success status.
	#[error("fetch of {url} returned HTTP {status}")]
	Status {
		/// Requested resource.
		url: String,
		/// HTTP status code.
		status: u16,
	},

	/// The payload was not the JSON shape we expected.
	#[error("could not decode {what}: {reason}")]
	Decode {
		/// What was being decoded.
		what: String,
		/// Parser message.
		reason: String,
	},

	/// A browser API we depend on was unavailable.
	#[error("browser API unavailable: {0}")]
	Dom(String),
}

impl VizError {
	pub(crate) fn decode(what: impl Into<String>, err: serde_json::Error) -> Self {
		Self::Decode {
			what: what.into(),
			reason: err.to_string(),
		}
	}
}

/// Convenience alias used across the crate.
pub type Result<T, E = VizError> = std::result::Result<T, E>;
