//! Meta-tag assembly, HTML document emission, and the image renderer seam.
//!
//! The broker emits `fc:frame` vNext meta-tags alongside the OpenGraph pair, escaping every
//! attribute value it interpolates. Image rasterization stays behind [`ImageRenderer`] so
//! downstream crates can plug in a real graphics pipeline; the built-in [`SvgSceneRenderer`]
//! covers development and text-only frames without extra dependencies.

// self
use crate::{
	_prelude::*,
	frame::{AspectRatio, Frame, ImageScene},
};

/// Frame protocol version emitted as `fc:frame`.
pub const FRAME_VERSION: &str = "vNext";

/// A single `<meta property content>` pair destined for the document head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaTag {
	/// Value of the `property` attribute.
	pub property: String,
	/// Value of the `content` attribute.
	pub content: String,
}
impl MetaTag {
	/// Creates a meta-tag pair.
	pub fn new(property: impl Into<String>, content: impl Into<String>) -> Self {
		Self { property: property.into(), content: content.into() }
	}
}

/// Translates a frame into its ordered meta-tag sequence.
///
/// `image_url` is what clients will fetch for the card (remote source or the broker's image
/// route); `post_url` already carries the serialized previous context.
pub fn frame_meta_tags(frame: &Frame, image_url: &Url, post_url: &Url) -> Vec<MetaTag> {
	let mut tags = vec![
		MetaTag::new("fc:frame", FRAME_VERSION),
		MetaTag::new("fc:frame:image", image_url.as_str()),
		MetaTag::new("fc:frame:image:aspect_ratio", frame.aspect_ratio.as_str()),
		MetaTag::new("og:image", image_url.as_str()),
		MetaTag::new("fc:frame:post_url", post_url.as_str()),
	];

	if let Some(title) = frame.title.as_deref() {
		tags.push(MetaTag::new("og:title", title));
	}
	if let Some(input) = frame.input() {
		tags.push(MetaTag::new("fc:frame:input:text", input.placeholder.as_str()));
	}

	for (idx, button) in frame.buttons().enumerate() {
		let index = idx + 1;

		tags.push(MetaTag::new(format!("fc:frame:button:{index}"), button.label.as_str()));
		tags.push(MetaTag::new(
			format!("fc:frame:button:{index}:action"),
			button.action.as_str(),
		));

		if let Some(target) = button.target.as_ref() {
			tags.push(MetaTag::new(
				format!("fc:frame:button:{index}:target"),
				target.as_str(),
			));
		}
	}

	tags
}

/// Renders the full HTML document carrying the provided meta-tags.
pub fn render_document(title: &str, tags: &[MetaTag]) -> String {
	let mut html = String::with_capacity(512);

	html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
	html.push_str(&format!("<title>{}</title>\n", escape_attribute(title)));

	for tag in tags {
		html.push_str(&format!(
			"<meta property=\"{}\" content=\"{}\" />\n",
			escape_attribute(&tag.property),
			escape_attribute(&tag.content),
		));
	}

	html.push_str("</head>\n<body></body>\n</html>\n");

	html
}

/// Escapes a string for interpolation into an HTML attribute value.
pub(crate) fn escape_attribute(raw: &str) -> String {
	let mut escaped = String::with_capacity(raw.len());

	for c in raw.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#39;"),
			_ => escaped.push(c),
		}
	}

	escaped
}

/// Reverses [`escape_attribute`] when reading meta-tags back out of a document.
pub(crate) fn unescape_attribute(raw: &str) -> String {
	raw.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&quot;", "\"")
		.replace("&#39;", "'")
		.replace("&amp;", "&")
}

/// A rendered frame image ready to serve.
#[derive(Clone, Debug)]
pub struct RenderedImage {
	/// Encoded image bytes.
	pub bytes: Vec<u8>,
	/// MIME type of the encoded image.
	pub content_type: String,
}

/// Future returned by [`ImageRenderer::render`].
pub type RenderFuture<'a> = Pin<Box<dyn Future<Output = Result<RenderedImage>> + 'a + Send>>;

/// Rasterization seam for on-demand frame images.
///
/// The broker never draws pixels itself; the image route hands the declarative scene to an
/// implementation of this trait. Implementations must be `Send + Sync` so one renderer instance
/// can serve the whole router.
pub trait ImageRenderer
where
	Self: Send + Sync,
{
	/// Renders the scene at the provided aspect ratio.
	fn render<'a>(&'a self, scene: &'a ImageScene, aspect_ratio: AspectRatio)
	-> RenderFuture<'a>;
}

/// Built-in renderer emitting an SVG document by string assembly.
///
/// Produces `image/svg+xml`, which the major Farcaster clients accept for frame cards. Swap in a
/// rasterizing [`ImageRenderer`] when PNG output is required.
#[derive(Clone, Copy, Debug, Default)]
pub struct SvgSceneRenderer;
impl SvgSceneRenderer {
	fn render_now(scene: &ImageScene, aspect_ratio: AspectRatio) -> RenderedImage {
		let (width, height) = aspect_ratio.dimensions();
		let mut svg = String::with_capacity(512);

		svg.push_str(&format!(
			"<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" \
			 viewBox=\"0 0 {width} {height}\">\n",
		));
		svg.push_str(&format!(
			"<rect width=\"100%\" height=\"100%\" fill=\"{}\" />\n",
			escape_attribute(&scene.background),
		));

		let line_count = scene.lines.len().max(1) as u32;
		let font_size = (height / (line_count * 3).max(6)).clamp(16, 72);

		for (idx, line) in scene.lines.iter().enumerate() {
			let y = (height as f64 / (line_count as f64 + 1.0)) * (idx as f64 + 1.0);

			svg.push_str(&format!(
				"<text x=\"50%\" y=\"{y:.0}\" fill=\"{}\" font-family=\"monospace\" \
				 font-size=\"{font_size}\" text-anchor=\"middle\" \
				 dominant-baseline=\"middle\">{}</text>\n",
				escape_attribute(&scene.foreground),
				escape_attribute(line),
			));
		}

		svg.push_str("</svg>\n");

		RenderedImage { bytes: svg.into_bytes(), content_type: "image/svg+xml".into() }
	}
}
impl ImageRenderer for SvgSceneRenderer {
	fn render<'a>(
		&'a self,
		scene: &'a ImageScene,
		aspect_ratio: AspectRatio,
	) -> RenderFuture<'a> {
		Box::pin(async move { Ok(Self::render_now(scene, aspect_ratio)) })
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::frame::{Button, ImageSource, TextInput};

	fn url(value: &str) -> Url {
		Url::parse(value).expect("URL fixture should parse successfully.")
	}

	fn frame() -> Frame {
		Frame::builder(ImageSource::remote(url("https://img.example.com/card.png")))
			.title("Quiz")
			.input(TextInput::new("Your answer"))
			.button(Button::post("Submit"))
			.button(Button::link("Docs", url("https://docs.example.com")))
			.build()
			.expect("Frame fixture should pass validation.")
	}

	#[test]
	fn meta_tags_cover_the_frame_in_declaration_order() {
		let image_url = url("https://img.example.com/card.png");
		let post_url = url("https://frames.example.com/quiz?previousContext=abc");
		let tags = frame_meta_tags(&frame(), &image_url, &post_url);
		let properties: Vec<&str> = tags.iter().map(|tag| tag.property.as_str()).collect();

		assert_eq!(
			properties,
			vec![
				"fc:frame",
				"fc:frame:image",
				"fc:frame:image:aspect_ratio",
				"og:image",
				"fc:frame:post_url",
				"og:title",
				"fc:frame:input:text",
				"fc:frame:button:1",
				"fc:frame:button:1:action",
				"fc:frame:button:2",
				"fc:frame:button:2:action",
				"fc:frame:button:2:target",
			]
		);
		assert_eq!(tags[0].content, FRAME_VERSION);
		assert_eq!(tags[4].content, post_url.as_str());
		assert_eq!(tags[8].content, "post");
		assert_eq!(tags[11].content, "https://docs.example.com/");
	}

	#[test]
	fn documents_escape_interpolated_values() {
		let tags = vec![MetaTag::new("fc:frame:button:1", "a<b> & \"c\"")];
		let html = render_document("Quiz <1>", &tags);

		assert!(html.contains("<title>Quiz &lt;1&gt;</title>"));
		assert!(html.contains("content=\"a&lt;b&gt; &amp; &quot;c&quot;\""));
		assert!(!html.contains("a<b>"));
	}

	#[test]
	fn escaping_round_trips() {
		let raw = "a<b> & \"c\" 'd'";

		assert_eq!(unescape_attribute(&escape_attribute(raw)), raw);
	}

	#[tokio::test]
	async fn svg_renderer_draws_every_line() {
		let scene = ImageScene::new(["Round 3", "Score <42>"]);
		let rendered = SvgSceneRenderer
			.render(&scene, AspectRatio::Wide)
			.await
			.expect("Built-in renderer should not fail.");
		let svg = String::from_utf8(rendered.bytes).expect("SVG output should be UTF-8.");

		assert_eq!(rendered.content_type, "image/svg+xml");
		assert!(svg.contains("width=\"955\" height=\"500\""));
		assert!(svg.contains(">Round 3</text>"));
		assert!(svg.contains(">Score &lt;42&gt;</text>"));
	}
}
