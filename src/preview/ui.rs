//! Preview UI rendering and meta-tag extraction.
//!
//! The preview drives itself by reading frame meta-tags back out of replayed HTML documents.
//! Extraction is deliberately small: it understands `<meta property content>` pairs in either
//! attribute order, which covers everything the broker's own renderer (and the mainstream frame
//! toolkits) emit. It is not a general HTML parser.

// self
use crate::{_prelude::*, render};

/// A frame reconstructed from the meta-tags of a rendered document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedFrame {
	/// `fc:frame:image` content.
	pub image: Option<String>,
	/// `fc:frame:post_url` content.
	pub post_url: Option<String>,
	/// `og:title` content.
	pub title: Option<String>,
	/// `fc:frame:input:text` content.
	pub input_placeholder: Option<String>,
	/// Buttons keyed by their 1-based index.
	pub buttons: Vec<ParsedButton>,
}

/// A button reconstructed from its indexed meta-tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedButton {
	/// 1-based button index.
	pub index: u8,
	/// Visible button label.
	pub label: String,
	/// Declared action label, when present.
	pub action: Option<String>,
	/// Declared target, when present.
	pub target: Option<String>,
}

/// Reads the frame meta-tags out of an HTML document.
pub fn extract_frame_tags(html: &str) -> ParsedFrame {
	let mut properties: HashMap<String, String> = HashMap::new();
	let mut rest = html;

	while let Some(start) = rest.find("<meta") {
		let tag_rest = &rest[start..];
		let Some(end) = tag_rest.find('>') else {
			break;
		};
		let tag = &tag_rest[..end];

		if let (Some(property), Some(content)) =
			(attribute_value(tag, "property"), attribute_value(tag, "content"))
		{
			properties.entry(property).or_insert(content);
		}

		rest = &tag_rest[end..];
	}

	let mut parsed = ParsedFrame {
		image: properties.remove("fc:frame:image"),
		post_url: properties.remove("fc:frame:post_url"),
		title: properties.remove("og:title"),
		input_placeholder: properties.remove("fc:frame:input:text"),
		buttons: Vec::new(),
	};

	for index in 1..=crate::frame::MAX_BUTTONS as u8 {
		let Some(label) = properties.remove(&format!("fc:frame:button:{index}")) else {
			break;
		};

		parsed.buttons.push(ParsedButton {
			index,
			label,
			action: properties.remove(&format!("fc:frame:button:{index}:action")),
			target: properties.remove(&format!("fc:frame:button:{index}:target")),
		});
	}

	parsed
}

fn attribute_value(tag: &str, name: &str) -> Option<String> {
	let marker = format!("{name}=\"");
	let start = tag.find(&marker)? + marker.len();
	let end = tag[start..].find('"')? + start;

	Some(render::unescape_attribute(&tag[start..end]))
}

/// Renders the self-contained preview page for a parsed frame.
///
/// The form POSTs back to the preview route with the pressed button index, any input text, and
/// the frame's post URL as a hidden field, so the replay needs no server-side session. Link
/// buttons render as plain anchors since no round-trip is involved.
pub fn render_preview_document(
	frame_url: &Url,
	parsed: &ParsedFrame,
	banner: Option<&str>,
) -> String {
	let mut html = String::with_capacity(1_024);
	let title = parsed.title.as_deref().unwrap_or("Frame Preview");

	html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
	html.push_str(&format!("<title>{} — preview</title>\n", render::escape_attribute(title)));
	html.push_str(PREVIEW_STYLE);
	html.push_str("</head>\n<body>\n<main>\n");
	html.push_str(&format!(
		"<p class=\"frame-url\">{}</p>\n",
		render::escape_attribute(frame_url.as_str()),
	));

	if let Some(banner) = banner {
		html.push_str(&format!(
			"<p class=\"banner\">{}</p>\n",
			render::escape_attribute(banner),
		));
	}
	if let Some(image) = parsed.image.as_deref() {
		html.push_str(&format!(
			"<img src=\"{}\" alt=\"frame image\" />\n",
			render::escape_attribute(image),
		));
	}

	html.push_str("<form method=\"post\">\n");

	if let Some(post_url) = parsed.post_url.as_deref() {
		html.push_str(&format!(
			"<input type=\"hidden\" name=\"postUrl\" value=\"{}\" />\n",
			render::escape_attribute(post_url),
		));
	}
	if let Some(placeholder) = parsed.input_placeholder.as_deref() {
		html.push_str(&format!(
			"<input type=\"text\" name=\"inputText\" placeholder=\"{}\" />\n",
			render::escape_attribute(placeholder),
		));
	}

	for button in &parsed.buttons {
		match (button.action.as_deref(), button.target.as_deref()) {
			(Some("link"), Some(target)) => {
				html.push_str(&format!(
					"<a href=\"{}\" target=\"_blank\">{}</a>\n",
					render::escape_attribute(target),
					render::escape_attribute(&button.label),
				));
			},
			_ => {
				html.push_str(&format!(
					"<button type=\"submit\" name=\"buttonIndex\" value=\"{}\">{}</button>\n",
					button.index,
					render::escape_attribute(&button.label),
				));
			},
		}
	}

	html.push_str("</form>\n</main>\n</body>\n</html>\n");

	html
}

const PREVIEW_STYLE: &str = "<style>\n\
	main { max-width: 640px; margin: 2rem auto; font-family: monospace; }\n\
	img { width: 100%; border-radius: 8px; }\n\
	.banner { background: #7a1f1f; color: #fff; padding: 0.5rem; border-radius: 4px; }\n\
	.frame-url { color: #888; }\n\
	form { display: flex; flex-wrap: wrap; gap: 0.5rem; margin-top: 0.5rem; }\n\
	input[type=text] { flex: 1 1 100%; padding: 0.5rem; }\n\
	button, a { flex: 1; padding: 0.5rem; text-align: center; }\n\
	</style>\n";
