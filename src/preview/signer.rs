//! Ephemeral signing of simulated frame actions.
//!
//! The preview impersonates nobody: every action carries the placeholder fid 1, a zeroed cast
//! hash, and a signature from a key pair generated for that single request. The resulting
//! message exercises a frame handler's parsing path but can never pass hub verification, which
//! keeps the preview strictly a development tool.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};
use time::{OffsetDateTime, macros::datetime};
// self
use crate::{
	_prelude::*,
	context::{CastId, Fid, FrameActionPayload, FrameActionRequest, TrustedPayload},
	error::CodecError,
};

/// Fid asserted by every preview action.
pub const PREVIEW_FID: Fid = Fid::FIRST;
/// Farcaster network identifier asserted by every preview action (1 = mainnet).
pub const PREVIEW_NETWORK: u8 = 1;
/// Zeroed cast hash standing in for the cast a real interaction would reference.
pub const PREVIEW_CAST_HASH: &str = "0x0000000000000000000000000000000000000000";

/// Start of the Farcaster epoch; action timestamps count seconds from here.
pub const FARCASTER_EPOCH: OffsetDateTime = datetime!(2021-01-01 0:00 UTC);

/// Inputs for one simulated button press.
#[derive(Clone, Debug)]
pub struct PreviewAction<'a> {
	/// URL of the frame the simulated interaction happens on.
	pub frame_url: &'a Url,
	/// 1-based index of the pressed button.
	pub button_index: u8,
	/// Text entered into the frame's input, if any.
	pub input_text: Option<&'a str>,
}

/// A signed simulated action plus the verification material tests inspect.
#[derive(Clone, Debug)]
pub struct SignedAction {
	/// The POST body to replay against the frame's post URL.
	pub request: FrameActionRequest,
	/// Public half of the ephemeral key pair.
	pub verifying_key: VerifyingKey,
	/// Signature over the serialized untrusted payload.
	pub signature: Signature,
}

/// Builds and signs a simulated frame action with placeholder identities.
///
/// The fixed sequence: fill the untrusted payload, hash it to produce `messageHash`, then sign
/// the finalized payload bytes with a freshly generated key. `trustedData.messageBytes` carries
/// the signature concatenated with the payload, base64 encoded.
pub fn sign_preview_action(action: &PreviewAction) -> Result<SignedAction, CodecError> {
	let mut payload = FrameActionPayload {
		fid: Some(PREVIEW_FID),
		url: action.frame_url.as_str().to_owned(),
		message_hash: None,
		timestamp: Some(farcaster_timestamp(OffsetDateTime::now_utc())),
		network: Some(PREVIEW_NETWORK),
		button_index: Some(action.button_index),
		input_text: action.input_text.map(ToOwned::to_owned),
		cast_id: Some(CastId { fid: PREVIEW_FID, hash: PREVIEW_CAST_HASH.into() }),
	};
	let unhashed_bytes =
		serde_json::to_vec(&payload).map_err(|source| CodecError::Encode { source })?;
	let digest = Sha256::digest(&unhashed_bytes);

	// The protocol identifies messages by a truncated 20-byte hash.
	payload.message_hash = Some(format!("0x{}", hex::encode(&digest[..20])));

	let payload_bytes =
		serde_json::to_vec(&payload).map_err(|source| CodecError::Encode { source })?;
	let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
	let verifying_key = signing_key.verifying_key();
	let signature = signing_key.sign(&payload_bytes);
	let mut message_bytes = signature.to_bytes().to_vec();

	message_bytes.extend_from_slice(&payload_bytes);

	let request = FrameActionRequest {
		untrusted_data: payload,
		trusted_data: TrustedPayload { message_bytes: STANDARD.encode(message_bytes) },
	};

	Ok(SignedAction { request, verifying_key, signature })
}

/// Converts a wall-clock instant into seconds since the Farcaster epoch.
pub fn farcaster_timestamp(now: OffsetDateTime) -> u64 {
	let seconds = (now - FARCASTER_EPOCH).whole_seconds();

	seconds.max(0) as u64
}
