//! Declarative UI controls attached to a frame.

// self
use crate::_prelude::*;

/// Actions a frame button can perform, with their protocol wire labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
	/// POST the signed action back to the frame's post URL.
	#[default]
	Post,
	/// POST the signed action, then follow the handler's redirect.
	PostRedirect,
	/// Open an external link.
	Link,
	/// Mint the target token.
	Mint,
	/// Request a wallet transaction from the target endpoint.
	Tx,
}
impl ButtonAction {
	/// Returns the protocol identifier for the action.
	pub const fn as_str(self) -> &'static str {
		match self {
			ButtonAction::Post => "post",
			ButtonAction::PostRedirect => "post_redirect",
			ButtonAction::Link => "link",
			ButtonAction::Mint => "mint",
			ButtonAction::Tx => "tx",
		}
	}

	/// Returns true when the action is meaningless without a target.
	pub const fn requires_target(self) -> bool {
		matches!(self, ButtonAction::Link | ButtonAction::Mint | ButtonAction::Tx)
	}
}
impl Display for ButtonAction {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// A frame button; identity is positional within the declared intent sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Button {
	/// Visible button label.
	pub label: String,
	/// Action performed when the button is pressed.
	#[serde(default)]
	pub action: ButtonAction,
	/// Action target; required for `link`, `mint`, and `tx`, optional per-button post override
	/// for `post` and `post_redirect`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub target: Option<Url>,
}
impl Button {
	/// Creates a button POSTing back to the frame's own post URL.
	pub fn post(label: impl Into<String>) -> Self {
		Self { label: label.into(), action: ButtonAction::Post, target: None }
	}

	/// Creates a post button overriding the post URL for this button only.
	pub fn post_to(label: impl Into<String>, target: Url) -> Self {
		Self { label: label.into(), action: ButtonAction::Post, target: Some(target) }
	}

	/// Creates a post button whose response redirects the user.
	pub fn post_redirect(label: impl Into<String>) -> Self {
		Self { label: label.into(), action: ButtonAction::PostRedirect, target: None }
	}

	/// Creates a button opening an external link.
	pub fn link(label: impl Into<String>, target: Url) -> Self {
		Self { label: label.into(), action: ButtonAction::Link, target: Some(target) }
	}

	/// Creates a mint button for the provided token target.
	pub fn mint(label: impl Into<String>, target: Url) -> Self {
		Self { label: label.into(), action: ButtonAction::Mint, target: Some(target) }
	}

	/// Creates a transaction button backed by the provided endpoint.
	pub fn tx(label: impl Into<String>, target: Url) -> Self {
		Self { label: label.into(), action: ButtonAction::Tx, target: Some(target) }
	}
}

/// A single-line text input attached to a frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextInput {
	/// Placeholder text shown in the empty input.
	pub placeholder: String,
}
impl TextInput {
	/// Creates a text input with the provided placeholder.
	pub fn new(placeholder: impl Into<String>) -> Self {
		Self { placeholder: placeholder.into() }
	}
}

/// Ordered declarative UI control supplied by a frame handler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Intent {
	/// A button; interpreted positionally via `buttonIndex` on the next round-trip.
	Button(Button),
	/// The frame's text input; at most one per frame.
	TextInput(TextInput),
}
impl Intent {
	/// Returns the contained button, if this intent is one.
	pub fn as_button(&self) -> Option<&Button> {
		match self {
			Intent::Button(button) => Some(button),
			Intent::TextInput(_) => None,
		}
	}

	/// Returns the contained text input, if this intent is one.
	pub fn as_text_input(&self) -> Option<&TextInput> {
		match self {
			Intent::Button(_) => None,
			Intent::TextInput(input) => Some(input),
		}
	}
}
impl From<Button> for Intent {
	fn from(button: Button) -> Self {
		Self::Button(button)
	}
}
impl From<TextInput> for Intent {
	fn from(input: TextInput) -> Self {
		Self::TextInput(input)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn action_labels_match_the_protocol() {
		assert_eq!(ButtonAction::Post.as_str(), "post");
		assert_eq!(ButtonAction::PostRedirect.as_str(), "post_redirect");
		assert_eq!(ButtonAction::Link.as_str(), "link");
		assert_eq!(ButtonAction::Mint.as_str(), "mint");
		assert_eq!(ButtonAction::Tx.as_str(), "tx");
	}

	#[test]
	fn target_requirements_cover_all_actions() {
		assert!(!ButtonAction::Post.requires_target());
		assert!(!ButtonAction::PostRedirect.requires_target());
		assert!(ButtonAction::Link.requires_target());
		assert!(ButtonAction::Mint.requires_target());
		assert!(ButtonAction::Tx.requires_target());
	}

	#[test]
	fn intents_serialize_with_a_kind_tag() {
		let intent = Intent::Button(Button::post("Next"));
		let payload = serde_json::to_string(&intent).expect("Intent should serialize.");

		assert!(payload.contains("\"kind\":\"button\""));

		let round_trip: Intent =
			serde_json::from_str(&payload).expect("Serialized intent should deserialize.");

		assert_eq!(round_trip, intent);
	}
}
