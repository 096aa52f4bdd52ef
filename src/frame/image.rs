//! Frame image sources and the declarative scene rendered by the built-in renderer.

// self
use crate::_prelude::*;

/// Aspect ratios the protocol accepts for frame images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectRatio {
	/// Landscape card (1.91:1); the protocol default.
	#[default]
	Wide,
	/// Square card (1:1).
	Square,
}
impl AspectRatio {
	/// Returns the protocol identifier for the aspect ratio.
	pub const fn as_str(self) -> &'static str {
		match self {
			AspectRatio::Wide => "1.91:1",
			AspectRatio::Square => "1:1",
		}
	}

	/// Returns the pixel dimensions the built-in renderer uses for this ratio.
	pub const fn dimensions(self) -> (u32, u32) {
		match self {
			AspectRatio::Wide => (955, 500),
			AspectRatio::Square => (600, 600),
		}
	}
}
impl Display for AspectRatio {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Declarative image content rendered on demand by an
/// [`ImageRenderer`](crate::render::ImageRenderer).
///
/// Intentionally minimal: a background, a text color, and centered text lines. Anything richer
/// belongs in a custom renderer behind the same seam.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageScene {
	/// CSS background color.
	pub background: String,
	/// CSS text color.
	pub foreground: String,
	/// Text lines drawn centered, top to bottom.
	pub lines: Vec<String>,
}
impl ImageScene {
	/// Creates a scene from text lines with the default colors.
	pub fn new<I>(lines: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<String>,
	{
		Self {
			background: "#1a1a2e".into(),
			foreground: "#f5f5f5".into(),
			lines: lines.into_iter().map(Into::into).collect(),
		}
	}

	/// Overrides the background color.
	pub fn with_background(mut self, background: impl Into<String>) -> Self {
		self.background = background.into();

		self
	}

	/// Overrides the text color.
	pub fn with_foreground(mut self, foreground: impl Into<String>) -> Self {
		self.foreground = foreground.into();

		self
	}
}

/// Where a frame's image comes from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ImageSource {
	/// An already-hosted image; the meta-tags reference it directly.
	Remote {
		/// Public URL of the hosted image.
		url: Url,
	},
	/// A declarative scene; the image route renders it on demand.
	Scene {
		/// Scene content handed to the renderer seam.
		scene: ImageScene,
	},
}
impl ImageSource {
	/// Wraps an already-hosted image URL.
	pub fn remote(url: Url) -> Self {
		Self::Remote { url }
	}

	/// Wraps a declarative scene.
	pub fn scene(scene: ImageScene) -> Self {
		Self::Scene { scene }
	}

	/// Returns true for remote sources.
	pub fn is_remote(&self) -> bool {
		matches!(self, Self::Remote { .. })
	}
}
