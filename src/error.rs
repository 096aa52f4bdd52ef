//! Broker-level error types shared across routes, codecs, and the preview tooling.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Context codec failure while round-tripping query-string state.
	#[error(transparent)]
	Codec(#[from] CodecError),
	/// Frame validation failure raised by the frame builder.
	#[error(transparent)]
	Frame(#[from] crate::frame::FrameError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Developer preview failure while replaying a frame action.
	#[error(transparent)]
	Preview(#[from] PreviewError),
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Base URL cannot carry path segments (e.g. `data:` or `mailto:` URLs).
	#[error("Base URL `{url}` cannot be used as a base for frame routes.")]
	BaseUrlCannotBeBase {
		/// Offending base URL.
		url: String,
	},
	/// Mount path failed validation.
	#[error("Frame mount path is invalid.")]
	InvalidFramePath(#[from] crate::context::FramePathError),
	/// Two frames were mounted on the same path.
	#[error("Frame mount path `{path}` is already registered.")]
	DuplicateFramePath {
		/// Path that was registered twice.
		path: String,
	},
	/// A route method was invoked for a path no frame was mounted on.
	#[error("No frame is mounted on `{path}`.")]
	UnknownFramePath {
		/// Path that was requested.
		path: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures raised while encoding or decoding serialized frame contexts.
#[derive(Debug, ThisError)]
pub enum CodecError {
	/// Context value could not be serialized to JSON.
	#[error("Context could not be serialized.")]
	Encode {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// Serialized context exceeds the documented budget.
	#[error("Serialized context is {len} bytes which exceeds the {max} byte budget.")]
	PayloadTooLarge {
		/// Serialized payload length in bytes.
		len: usize,
		/// Maximum permitted length in bytes.
		max: usize,
	},
	/// Query parameter is not valid URL-safe base64.
	#[error("Context parameter is not valid URL-safe base64.")]
	Base64(#[from] base64::DecodeError),
	/// Decoded payload is malformed JSON or violates the context schema.
	#[error("Context payload is malformed JSON.")]
	Decode {
		/// Structured parsing failure carrying the failing path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the frame endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the frame endpoint.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Failures raised by the developer preview while simulating a frame interaction.
#[derive(Debug, ThisError)]
pub enum PreviewError {
	/// Initial fetch of the frame page was rejected.
	#[error("Frame page fetch was rejected: HTTP {status} {status_text}.")]
	FrameFetchRejected {
		/// HTTP status code returned by the frame page.
		status: u16,
		/// HTTP status text surfaced to the preview UI.
		status_text: String,
	},
	/// The single fallback fetch after a rejected replay also failed.
	#[error("Fallback fetch of the original frame page failed: HTTP {status}.")]
	FallbackFailed {
		/// HTTP status code returned by the fallback fetch.
		status: u16,
	},
	/// The replayed document does not carry the expected frame meta-tags.
	#[error("Replayed document is missing the `{missing}` meta-tag.")]
	MalformedFrameDocument {
		/// Property name of the absent meta-tag.
		missing: &'static str,
	},
	/// The post URL submitted by the preview form could not be parsed.
	#[error("Preview post URL is invalid.")]
	InvalidPostUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
