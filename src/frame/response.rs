//! The validated frame value returned by handlers, and its builder.

// self
use crate::{
	_prelude::*,
	frame::{AspectRatio, Button, ButtonAction, ImageSource, Intent, TextInput},
};

/// Protocol limit on the number of buttons per frame.
pub const MAX_BUTTONS: usize = 4;
/// Protocol limit on a button label, in bytes.
pub const MAX_BUTTON_LABEL_BYTES: usize = 256;
/// Protocol limit on the input placeholder, in bytes.
pub const MAX_INPUT_PLACEHOLDER_BYTES: usize = 32;
/// Budget for the serialized per-frame state, in bytes.
pub const MAX_STATE_BYTES: usize = 4_096;

/// Errors raised while constructing or validating frames.
#[derive(Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum FrameError {
	/// More than [`MAX_BUTTONS`] buttons were declared.
	#[error("Frame declares {count} buttons; the protocol allows at most {MAX_BUTTONS}.")]
	TooManyButtons {
		/// Number of buttons that were declared.
		count: usize,
	},
	/// More than one text input was declared.
	#[error("Frame declares more than one text input.")]
	MultipleTextInputs,
	/// A button label was empty.
	#[error("Button {index} has an empty label.")]
	EmptyButtonLabel {
		/// 1-based index of the offending button.
		index: usize,
	},
	/// A button label exceeded [`MAX_BUTTON_LABEL_BYTES`].
	#[error("Button {index} label is {len} bytes; the protocol allows at most {max}.")]
	ButtonLabelTooLong {
		/// 1-based index of the offending button.
		index: usize,
		/// Label length in bytes.
		len: usize,
		/// Maximum permitted length in bytes.
		max: usize,
	},
	/// A `link`, `mint`, or `tx` button was declared without a target.
	#[error("Button {index} uses the {action} action but declares no target.")]
	MissingButtonTarget {
		/// 1-based index of the offending button.
		index: usize,
		/// Action that requires a target.
		action: ButtonAction,
	},
	/// The input placeholder exceeded [`MAX_INPUT_PLACEHOLDER_BYTES`].
	#[error("Input placeholder is {len} bytes; the protocol allows at most {max}.")]
	InputPlaceholderTooLong {
		/// Placeholder length in bytes.
		len: usize,
		/// Maximum permitted length in bytes.
		max: usize,
	},
	/// The serialized state exceeded [`MAX_STATE_BYTES`].
	#[error("Serialized frame state is {len} bytes; the budget is {max}.")]
	StateTooLarge {
		/// Serialized state length in bytes.
		len: usize,
		/// Maximum permitted length in bytes.
		max: usize,
	},
}

/// A fully validated frame as returned by a handler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
	/// Image shown in the frame card.
	pub image: ImageSource,
	/// Aspect ratio of the frame image.
	#[serde(default)]
	pub aspect_ratio: AspectRatio,
	/// Declared UI controls, in order.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub intents: Vec<Intent>,
	/// State carried to the next round-trip via the post URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state: Option<serde_json::Value>,
	/// Page title emitted as `og:title`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
}
impl Frame {
	/// Creates a new builder seeded with the provided image source.
	pub fn builder(image: ImageSource) -> FrameBuilder {
		FrameBuilder::new(image)
	}

	/// Returns the declared buttons in order.
	pub fn buttons(&self) -> impl Iterator<Item = &Button> {
		self.intents.iter().filter_map(Intent::as_button)
	}

	/// Returns the declared text input, if any.
	pub fn input(&self) -> Option<&TextInput> {
		self.intents.iter().find_map(Intent::as_text_input)
	}
}

/// Builder for [`Frame`] values.
#[derive(Debug)]
pub struct FrameBuilder {
	/// Image shown in the frame card.
	pub image: ImageSource,
	/// Aspect ratio of the frame image.
	pub aspect_ratio: AspectRatio,
	/// Declared UI controls, in order.
	pub intents: Vec<Intent>,
	/// State carried to the next round-trip.
	pub state: Option<serde_json::Value>,
	/// Page title emitted as `og:title`.
	pub title: Option<String>,
}
impl FrameBuilder {
	/// Creates a new builder seeded with the provided image source.
	pub fn new(image: ImageSource) -> Self {
		Self {
			image,
			aspect_ratio: AspectRatio::default(),
			intents: Vec::new(),
			state: None,
			title: None,
		}
	}

	/// Appends a button intent.
	pub fn button(mut self, button: Button) -> Self {
		self.intents.push(Intent::Button(button));

		self
	}

	/// Appends multiple button intents.
	pub fn buttons<I>(mut self, buttons: I) -> Self
	where
		I: IntoIterator<Item = Button>,
	{
		self.intents.extend(buttons.into_iter().map(Intent::Button));

		self
	}

	/// Appends the frame's text input.
	pub fn input(mut self, input: TextInput) -> Self {
		self.intents.push(Intent::TextInput(input));

		self
	}

	/// Sets the state carried to the next round-trip.
	pub fn state(mut self, state: serde_json::Value) -> Self {
		self.state = Some(state);

		self
	}

	/// Sets the page title.
	pub fn title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());

		self
	}

	/// Overrides the image aspect ratio.
	pub fn aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
		self.aspect_ratio = aspect_ratio;

		self
	}

	/// Consumes the builder and validates the resulting frame.
	pub fn build(self) -> Result<Frame, FrameError> {
		let frame = Frame {
			image: self.image,
			aspect_ratio: self.aspect_ratio,
			intents: self.intents,
			state: self.state,
			title: self.title,
		};

		frame.validate()?;

		Ok(frame)
	}
}

impl Frame {
	/// Validates invariants for the frame.
	fn validate(&self) -> Result<(), FrameError> {
		let button_count = self.buttons().count();

		if button_count > MAX_BUTTONS {
			return Err(FrameError::TooManyButtons { count: button_count });
		}
		if self.intents.iter().filter_map(Intent::as_text_input).count() > 1 {
			return Err(FrameError::MultipleTextInputs);
		}

		for (idx, button) in self.buttons().enumerate() {
			let index = idx + 1;

			if button.label.is_empty() {
				return Err(FrameError::EmptyButtonLabel { index });
			}
			if button.label.len() > MAX_BUTTON_LABEL_BYTES {
				return Err(FrameError::ButtonLabelTooLong {
					index,
					len: button.label.len(),
					max: MAX_BUTTON_LABEL_BYTES,
				});
			}
			if button.action.requires_target() && button.target.is_none() {
				return Err(FrameError::MissingButtonTarget { index, action: button.action });
			}
		}

		if let Some(input) = self.input()
			&& input.placeholder.len() > MAX_INPUT_PLACEHOLDER_BYTES
		{
			return Err(FrameError::InputPlaceholderTooLong {
				len: input.placeholder.len(),
				max: MAX_INPUT_PLACEHOLDER_BYTES,
			});
		}
		if let Some(state) = self.state.as_ref() {
			let len = state.to_string().len();

			if len > MAX_STATE_BYTES {
				return Err(FrameError::StateTooLarge { len, max: MAX_STATE_BYTES });
			}
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse successfully.")
	}

	fn image() -> ImageSource {
		ImageSource::remote(url("https://img.example.com/card.png"))
	}

	#[test]
	fn builder_accepts_a_full_frame() {
		let frame = Frame::builder(image())
			.title("Quiz")
			.input(TextInput::new("Your answer"))
			.button(Button::post("Submit"))
			.button(Button::link("Docs", url("https://docs.example.com")))
			.state(serde_json::json!({ "round": 1 }))
			.aspect_ratio(AspectRatio::Square)
			.build()
			.expect("Frame fixture should pass validation.");

		assert_eq!(frame.buttons().count(), 2);
		assert_eq!(
			frame.input().map(|input| input.placeholder.as_str()),
			Some("Your answer")
		);
		assert_eq!(frame.aspect_ratio, AspectRatio::Square);
	}

	#[test]
	fn button_count_is_capped() {
		let err = Frame::builder(image())
			.buttons((0..5).map(|i| Button::post(format!("B{i}"))))
			.build()
			.expect_err("A fifth button must be rejected.");

		assert_eq!(err, FrameError::TooManyButtons { count: 5 });
	}

	#[test]
	fn label_and_target_rules_are_enforced() {
		let err = Frame::builder(image())
			.button(Button::post(""))
			.build()
			.expect_err("Empty labels must be rejected.");

		assert_eq!(err, FrameError::EmptyButtonLabel { index: 1 });

		let err = Frame::builder(image())
			.button(Button::post("ok"))
			.button(Button {
				label: "Open".into(),
				action: ButtonAction::Link,
				target: None,
			})
			.build()
			.expect_err("Targetless link buttons must be rejected.");

		assert_eq!(
			err,
			FrameError::MissingButtonTarget { index: 2, action: ButtonAction::Link }
		);

		let err = Frame::builder(image())
			.button(Button::post("x".repeat(MAX_BUTTON_LABEL_BYTES + 1)))
			.build()
			.expect_err("Oversized labels must be rejected.");

		assert!(matches!(err, FrameError::ButtonLabelTooLong { index: 1, .. }));
	}

	#[test]
	fn single_input_and_state_budget_are_enforced() {
		let err = Frame::builder(image())
			.input(TextInput::new("one"))
			.input(TextInput::new("two"))
			.build()
			.expect_err("A second input must be rejected.");

		assert_eq!(err, FrameError::MultipleTextInputs);

		let err = Frame::builder(image())
			.input(TextInput::new("p".repeat(MAX_INPUT_PLACEHOLDER_BYTES + 1)))
			.build()
			.expect_err("Oversized placeholders must be rejected.");

		assert!(matches!(err, FrameError::InputPlaceholderTooLong { .. }));

		let err = Frame::builder(image())
			.state(serde_json::json!({ "filler": "x".repeat(MAX_STATE_BYTES) }))
			.build()
			.expect_err("Oversized state must be rejected.");

		assert!(matches!(err, FrameError::StateTooLarge { .. }));
	}
}
