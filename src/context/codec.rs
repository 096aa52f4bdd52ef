//! Opaque query-string codec for frame contexts.
//!
//! Contexts are serialized to JSON and carried as URL-safe base64 (no padding) in the `context`
//! and `previousContext` query parameters. The codec has no versioning and no schema negotiation;
//! an absent parameter decodes to `None`, and anything else either decodes wholesale or fails
//! with a typed [`CodecError`].

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{_prelude::*, error::CodecError};

/// Query parameter carrying the serialized context consumed by the image route.
pub const CONTEXT_PARAM: &str = "context";
/// Query parameter carrying the serialized previous context consumed by the post route.
pub const PREVIOUS_CONTEXT_PARAM: &str = "previousContext";

/// Serialized-context byte budget; aligned with the protocol's 4 KiB state allowance.
pub const DEFAULT_MAX_SERIALIZED_LEN: usize = 4_096;

/// Codec turning JSON-shaped context values into URL-safe query parameter strings and back.
#[derive(Clone, Copy, Debug)]
pub struct ContextCodec {
	max_serialized_len: usize,
}
impl ContextCodec {
	/// Creates a codec with a custom serialized-payload budget.
	pub const fn with_max_serialized_len(max_serialized_len: usize) -> Self {
		Self { max_serialized_len }
	}

	/// Returns the serialized-payload budget in bytes.
	pub const fn max_serialized_len(&self) -> usize {
		self.max_serialized_len
	}

	/// Serializes a context value into a query-parameter-safe string.
	pub fn encode<T>(&self, value: &T) -> Result<String, CodecError>
	where
		T: Serialize,
	{
		let bytes = serde_json::to_vec(value).map_err(|source| CodecError::Encode { source })?;

		if bytes.len() > self.max_serialized_len {
			return Err(CodecError::PayloadTooLarge {
				len: bytes.len(),
				max: self.max_serialized_len,
			});
		}

		Ok(URL_SAFE_NO_PAD.encode(bytes))
	}

	/// Decodes a context value from a query parameter.
	pub fn decode<T>(&self, raw: &str) -> Result<T, CodecError>
	where
		T: serde::de::DeserializeOwned,
	{
		let bytes = URL_SAFE_NO_PAD.decode(raw)?;

		if bytes.len() > self.max_serialized_len {
			return Err(CodecError::PayloadTooLarge {
				len: bytes.len(),
				max: self.max_serialized_len,
			});
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&bytes);

		serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| CodecError::Decode { source })
	}

	/// Decodes an optional query parameter; an absent parameter yields `None`.
	pub fn decode_opt<T>(&self, raw: Option<&str>) -> Result<Option<T>, CodecError>
	where
		T: serde::de::DeserializeOwned,
	{
		raw.map(|raw| self.decode(raw)).transpose()
	}
}
impl Default for ContextCodec {
	fn default() -> Self {
		Self::with_max_serialized_len(DEFAULT_MAX_SERIALIZED_LEN)
	}
}

/// Parses a JSON document into a typed value, reporting the failing path on mismatch.
///
/// Shared by the post route (action bodies) and the codec above so every decode boundary
/// surfaces the same error shape.
pub(crate) fn decode_json_str<T>(raw: &str) -> Result<T, CodecError>
where
	T: serde::de::DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_str(raw);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| CodecError::Decode { source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::context::{FrameContext, PreviousContext};

	fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse successfully.")
	}

	#[test]
	fn context_round_trips_through_query_string_encoding() {
		let codec = ContextCodec::default();
		let mut ctx = FrameContext::initial(url("https://frames.example.com/quiz"));

		ctx.state = Some(serde_json::json!({ "round": 3, "score": [1, 2] }));

		let encoded = codec.encode(&ctx).expect("Context should encode.");

		assert!(
			encoded.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
			"Encoded context must stay URL-safe without percent-escaping."
		);

		let decoded: FrameContext = codec.decode(&encoded).expect("Context should decode.");

		assert_eq!(decoded, ctx);
	}

	#[test]
	fn absent_parameter_decodes_to_none() {
		let codec = ContextCodec::default();
		let decoded: Option<PreviousContext> =
			codec.decode_opt(None).expect("Absent parameter should not be an error.");

		assert_eq!(decoded, None);
	}

	#[test]
	fn corrupted_base64_is_a_typed_error() {
		let codec = ContextCodec::default();
		let err = codec
			.decode::<FrameContext>("not%%%base64")
			.expect_err("Corrupted base64 should fail.");

		assert!(matches!(err, CodecError::Base64(_)));
	}

	#[test]
	fn malformed_json_reports_the_failing_path() {
		let codec = ContextCodec::default();
		let raw = URL_SAFE_NO_PAD.encode(b"{\"url\":\"https://x.example\",\"status\":7}");
		let err =
			codec.decode::<FrameContext>(&raw).expect_err("Schema violation should fail.");

		let CodecError::Decode { source } = err else {
			panic!("Expected a decode error, got {err:?}.");
		};

		assert_eq!(source.path().to_string(), "status");
	}

	#[test]
	fn payload_budget_is_enforced_on_encode_and_decode() {
		let codec = ContextCodec::with_max_serialized_len(32);
		let mut ctx = FrameContext::initial(url("https://frames.example.com/quiz"));

		ctx.state = Some(serde_json::json!({ "filler": "x".repeat(64) }));

		assert!(matches!(codec.encode(&ctx), Err(CodecError::PayloadTooLarge { .. })));

		let oversized = URL_SAFE_NO_PAD.encode([b' '; 64]);

		assert!(matches!(
			codec.decode::<FrameContext>(&oversized),
			Err(CodecError::PayloadTooLarge { .. })
		));
	}
}
