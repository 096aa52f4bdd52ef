//! Wire-facing frame action payload POSTed by Farcaster clients (and by the local preview).
//!
//! Field names follow the protocol's camelCase JSON. The broker only reads the untrusted half;
//! verifying `trustedData` against a hub is out of scope and stays with upstream infrastructure.

// self
use crate::{_prelude::*, context::Fid};

/// Full POST body delivered to a frame's post URL when a button is pressed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameActionRequest {
	/// Client-asserted interaction data; readable without protocol verification.
	pub untrusted_data: FrameActionPayload,
	/// Signed protocol message produced by the interacting client.
	pub trusted_data: TrustedPayload,
}

/// Client-asserted half of a frame action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameActionPayload {
	/// Fid of the interacting user.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fid: Option<Fid>,
	/// URL of the frame the interaction happened on.
	pub url: String,
	/// Hash of the signed protocol message, `0x`-hex encoded.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub message_hash: Option<String>,
	/// Seconds since the Farcaster epoch at signing time.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timestamp: Option<u64>,
	/// Farcaster network identifier (1 = mainnet).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub network: Option<u8>,
	/// 1-based index of the pressed button.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub button_index: Option<u8>,
	/// Text entered into the frame's input, when one was declared.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub input_text: Option<String>,
	/// Cast the frame was embedded in.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cast_id: Option<CastId>,
}

/// Identifier of the cast a frame interaction originated from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastId {
	/// Fid of the cast author.
	pub fid: Fid,
	/// Cast hash, `0x`-hex encoded.
	pub hash: String,
}

/// Signed half of a frame action; opaque to the broker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedPayload {
	/// Serialized signed message bytes as produced by the signing client.
	pub message_bytes: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn action_payload_uses_camel_case_wire_names() {
		let request = FrameActionRequest {
			untrusted_data: FrameActionPayload {
				fid: Some(Fid::new(42).expect("Fid fixture should be valid.")),
				url: "https://frames.example.com/quiz".into(),
				button_index: Some(2),
				input_text: Some("hello".into()),
				..Default::default()
			},
			trusted_data: TrustedPayload { message_bytes: "0a0b0c".into() },
		};
		let payload =
			serde_json::to_string(&request).expect("Action request should serialize to JSON.");

		assert!(payload.contains("\"untrustedData\""));
		assert!(payload.contains("\"trustedData\""));
		assert!(payload.contains("\"buttonIndex\":2"));
		assert!(payload.contains("\"inputText\":\"hello\""));
		assert!(payload.contains("\"messageBytes\":\"0a0b0c\""));

		let round_trip: FrameActionRequest =
			serde_json::from_str(&payload).expect("Serialized request should deserialize.");

		assert_eq!(round_trip, request);
	}

	#[test]
	fn absent_optional_fields_deserialize_to_none() {
		let raw = "{\"untrustedData\":{\"url\":\"https://frames.example.com/quiz\"},\
			\"trustedData\":{\"messageBytes\":\"\"}}";
		let request: FrameActionRequest =
			serde_json::from_str(raw).expect("Sparse request should deserialize.");

		assert_eq!(request.untrusted_data.fid, None);
		assert_eq!(request.untrusted_data.button_index, None);
		assert_eq!(request.untrusted_data.input_text, None);
		assert_eq!(request.untrusted_data.cast_id, None);
	}
}
