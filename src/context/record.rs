//! Context records constructed per request and round-tripped through query strings.

// self
use crate::{
	_prelude::*,
	context::{Fid, FrameActionPayload},
	error::CodecError,
	frame::{Button, Intent},
};

/// Render status of a frame request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameStatus {
	/// First render of the frame; no interaction happened yet.
	#[default]
	Initial,
	/// Render triggered by a frame action round-trip.
	Response,
}
impl FrameStatus {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FrameStatus::Initial => "initial",
			FrameStatus::Response => "response",
		}
	}
}
impl Display for FrameStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable per-request context handed to a [`FrameHandler`](crate::handler::FrameHandler).
///
/// Constructed from query parameters and/or the incoming action payload; never persisted
/// server-side. Its only durable representation is the serialized query string round-tripped to
/// the client and back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameContext {
	/// Public URL of the frame being rendered.
	pub url: Url,
	/// Whether this is the initial render or an action round-trip.
	#[serde(default)]
	pub status: FrameStatus,
	/// State computed by the previous handler invocation, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<serde_json::Value>,
	/// 1-based index of the pressed button, when the request carries an action.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub button_index: Option<u8>,
	/// Text entered into the frame's input, when one was declared and filled.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub input_text: Option<String>,
	/// Fid asserted by the interacting client.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fid: Option<Fid>,
	/// Button resolved positionally against the previously declared intents.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pressed_button: Option<Button>,
}
impl FrameContext {
	/// Creates the context for an initial render of the frame at `url`.
	pub fn initial(url: Url) -> Self {
		Self {
			url,
			status: FrameStatus::Initial,
			state: None,
			button_index: None,
			input_text: None,
			fid: None,
			pressed_button: None,
		}
	}

	/// Derives the context for an action round-trip.
	///
	/// Copies the pressed button index, input text, and fid out of the client payload, carries
	/// the previously computed state forward, and resolves the pressed button positionally
	/// against the previously declared intents. An absent previous context yields a response
	/// context with no state and no resolved button.
	pub fn from_action(
		url: Url,
		previous: Option<&PreviousContext>,
		payload: &FrameActionPayload,
	) -> Self {
		let button_index = payload.button_index;
		let pressed_button = match (previous, button_index) {
			(Some(previous), Some(index)) => previous.button_at(index).cloned(),
			_ => None,
		};
		let input_text = payload.input_text.clone().filter(|text| !text.is_empty());

		Self {
			url,
			status: FrameStatus::Response,
			state: previous.and_then(|previous| previous.state.clone()),
			button_index,
			input_text,
			fid: payload.fid,
			pressed_button,
		}
	}

	/// Deserializes the carried state into a caller-provided type.
	///
	/// Returns `Ok(None)` when no state was carried.
	pub fn state_as<T>(&self) -> Result<Option<T>, CodecError>
	where
		T: serde::de::DeserializeOwned,
	{
		self.state
			.clone()
			.map(|state| {
				serde_path_to_error::deserialize(state)
					.map_err(|source| CodecError::Decode { source })
			})
			.transpose()
	}
}

/// The prior request's context carried on the frame's post URL, together with the state snapshot
/// the prior handler computed and the intents it declared.
///
/// The intents let the next request interpret its `buttonIndex` positionally; the state snapshot
/// becomes the next context's `state`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PreviousContext {
	/// Request context the previous frame was derived from.
	pub context: FrameContext,
	/// State computed by the previous handler invocation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<serde_json::Value>,
	/// Intents declared by the previous frame, in declaration order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub intents: Vec<Intent>,
}
impl PreviousContext {
	/// Returns the declared buttons in order.
	pub fn buttons(&self) -> impl Iterator<Item = &Button> {
		self.intents.iter().filter_map(Intent::as_button)
	}

	/// Resolves a 1-based button index against the declared intents.
	pub fn button_at(&self, index: u8) -> Option<&Button> {
		if index == 0 {
			return None;
		}

		self.buttons().nth(usize::from(index) - 1)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::frame::TextInput;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse successfully.")
	}

	fn previous() -> PreviousContext {
		PreviousContext {
			context: FrameContext::initial(url("https://frames.example.com/quiz")),
			state: Some(serde_json::json!({ "round": 3 })),
			intents: vec![
				Intent::TextInput(TextInput::new("Your answer")),
				Intent::Button(Button::post("Submit")),
				Intent::Button(Button::link(
					"Docs",
					url("https://docs.example.com"),
				)),
			],
		}
	}

	#[test]
	fn button_resolution_is_positional_and_skips_inputs() {
		let previous = previous();

		assert_eq!(previous.button_at(1).map(|b| b.label.as_str()), Some("Submit"));
		assert_eq!(previous.button_at(2).map(|b| b.label.as_str()), Some("Docs"));
		assert_eq!(previous.button_at(0), None);
		assert_eq!(previous.button_at(3), None);
	}

	#[test]
	fn action_derivation_copies_payload_fields_and_prior_state() {
		let previous = previous();
		let payload = FrameActionPayload {
			fid: Some(Fid::new(42).expect("Fid fixture should be valid.")),
			url: "https://frames.example.com/quiz".into(),
			button_index: Some(1),
			input_text: Some("blue".into()),
			..Default::default()
		};
		let ctx = FrameContext::from_action(
			url("https://frames.example.com/quiz"),
			Some(&previous),
			&payload,
		);

		assert_eq!(ctx.status, FrameStatus::Response);
		assert_eq!(ctx.button_index, Some(1));
		assert_eq!(ctx.input_text.as_deref(), Some("blue"));
		assert_eq!(ctx.fid.map(Fid::get), Some(42));
		assert_eq!(ctx.pressed_button.as_ref().map(|b| b.label.as_str()), Some("Submit"));
		assert_eq!(ctx.state, Some(serde_json::json!({ "round": 3 })));
	}

	#[test]
	fn action_derivation_without_previous_context_yields_bare_response() {
		let payload = FrameActionPayload {
			button_index: Some(1),
			input_text: Some(String::new()),
			..Default::default()
		};
		let ctx =
			FrameContext::from_action(url("https://frames.example.com/quiz"), None, &payload);

		assert_eq!(ctx.status, FrameStatus::Response);
		assert_eq!(ctx.state, None);
		assert_eq!(ctx.pressed_button, None);
		assert_eq!(ctx.input_text, None, "Empty input text must be treated as absent.");
	}

	#[test]
	fn typed_state_access_round_trips() {
		#[derive(Debug, PartialEq, Deserialize)]
		struct QuizState {
			round: u8,
		}

		let mut ctx = FrameContext::initial(url("https://frames.example.com/quiz"));

		assert_eq!(
			ctx.state_as::<QuizState>().expect("Absent state should decode to None."),
			None
		);

		ctx.state = Some(serde_json::json!({ "round": 3 }));

		assert_eq!(
			ctx.state_as::<QuizState>().expect("Carried state should decode."),
			Some(QuizState { round: 3 })
		);

		ctx.state = Some(serde_json::json!({ "round": "three" }));

		let err = ctx.state_as::<QuizState>().expect_err("Mismatched state should fail.");

		assert!(err.to_string().contains("malformed"));
	}
}
