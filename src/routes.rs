//! The central frame broker and its route registrar.

pub mod image;
pub mod page;
pub mod preview;

mod respond;

pub use image::*;
pub use preview::*;

// crates.io
use axum::{
	Router,
	extract::{Form, Query},
	response::Html,
	routing::get,
};
// self
use crate::{
	_prelude::*,
	context::{CONTEXT_PARAM, ContextCodec, FramePath, PREVIOUS_CONTEXT_PARAM},
	error::ConfigError,
	handler::FrameHandler,
	http::ReplayHttpClient,
	preview::ReplayMetrics,
	render::{ImageRenderer, SvgSceneRenderer},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestReplayClient;

#[cfg(feature = "reqwest")]
/// Broker specialized for the crate's default reqwest transport stack.
pub type ReqwestFrameBroker = FrameBroker<ReqwestReplayClient>;

/// Coordinates frame routes against a single public base URL.
///
/// The broker owns the replay transport, the image renderer seam, the context codec, and the set
/// of mounted frames so individual route pipelines can focus on request-specific logic (context
/// derivation, meta-tag emission, preview replays). It is consumed by
/// [`into_router`](FrameBroker::into_router), which wires the page, image, and preview routes
/// for every mounted frame onto an [`axum::Router`].
#[derive(Clone)]
pub struct FrameBroker<C>
where
	C: ?Sized + ReplayHttpClient,
{
	/// HTTP client used by the developer preview's replay round-trips.
	pub http_client: Arc<C>,
	/// Public base URL the frame routes are reachable under.
	pub base_url: Url,
	/// Renderer invoked for scene-sourced frame images.
	pub renderer: Arc<dyn ImageRenderer>,
	/// Codec carrying contexts through query strings.
	pub codec: ContextCodec,
	/// Shared metrics recorder for preview replay outcomes.
	pub replay_metrics: Arc<ReplayMetrics>,
	frames: Vec<MountedFrame>,
}
impl<C> FrameBroker<C>
where
	C: ?Sized + ReplayHttpClient,
{
	/// Creates a broker that reuses the caller-provided replay transport.
	///
	/// `base_url` must be able to carry path segments; frame URLs are derived by appending each
	/// mount path to it.
	pub fn with_http_client(
		base_url: Url,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self, ConfigError> {
		if base_url.cannot_be_a_base() {
			return Err(ConfigError::BaseUrlCannotBeBase { url: base_url.to_string() });
		}

		Ok(Self {
			http_client: http_client.into(),
			base_url,
			renderer: Arc::new(SvgSceneRenderer),
			codec: ContextCodec::default(),
			replay_metrics: Default::default(),
			frames: Vec::new(),
		})
	}

	/// Replaces the image renderer invoked for scene-sourced images.
	pub fn with_renderer(mut self, renderer: impl 'static + ImageRenderer) -> Self {
		self.renderer = Arc::new(renderer);

		self
	}

	/// Replaces the context codec (e.g. to change the serialized-payload budget).
	pub fn with_codec(mut self, codec: ContextCodec) -> Self {
		self.codec = codec;

		self
	}

	/// Mounts a frame handler on the provided path.
	///
	/// Registers `GET/POST <path>` for the frame page, `GET <path>/image` for the on-demand
	/// image, and `GET/POST <path>/dev` for the developer preview once the broker is turned into
	/// a router.
	pub fn frame(
		mut self,
		path: impl AsRef<str>,
		handler: impl 'static + FrameHandler,
	) -> Result<Self, ConfigError> {
		let path = FramePath::new(path)?;

		if self.frames.iter().any(|mounted| mounted.path == path) {
			return Err(ConfigError::DuplicateFramePath { path: path.to_string() });
		}

		self.frames.push(MountedFrame { path, handler: Arc::new(handler) });

		Ok(self)
	}

	/// Returns the mounted frame paths in registration order.
	pub fn paths(&self) -> impl Iterator<Item = &FramePath> {
		self.frames.iter().map(|mounted| &mounted.path)
	}

	/// Returns the public URL of the frame mounted on `path`.
	pub fn frame_url(&self, path: &FramePath) -> Url {
		let mut url = self.base_url.clone();
		let prefix = url.path().trim_end_matches('/').to_owned();

		url.set_path(&format!("{prefix}{}", path.as_str()));
		url.set_query(None);
		url.set_fragment(None);

		url
	}

	/// Returns the public URL of the image route for the frame mounted on `path`.
	pub fn image_url(&self, path: &FramePath) -> Url {
		let mut url = self.frame_url(path);
		let suffixed = format!("{}/image", url.path().trim_end_matches('/'));

		url.set_path(&suffixed);

		url
	}

	/// Consumes the broker and wires every mounted frame onto an [`axum::Router`].
	pub fn into_router(self) -> Router {
		let shared = Arc::new(self);
		let paths: Vec<FramePath> =
			shared.frames.iter().map(|mounted| mounted.path.clone()).collect();
		let mut router = Router::new();

		for path in paths {
			let page_get = {
				let shared = shared.clone();
				let path = path.clone();

				move || async move { shared.render_initial(&path).await.map(Html) }
			};
			let page_post = {
				let shared = shared.clone();
				let path = path.clone();

				move |Query(params): Query<HashMap<String, String>>, body: String| async move {
					shared
						.render_action_raw(
							&path,
							params.get(PREVIOUS_CONTEXT_PARAM).map(String::as_str),
							&body,
						)
						.await
						.map(Html)
				}
			};
			let image_get = {
				let shared = shared.clone();
				let path = path.clone();

				move |Query(params): Query<HashMap<String, String>>| async move {
					shared
						.render_image(&path, params.get(CONTEXT_PARAM).map(String::as_str))
						.await
				}
			};
			let dev_get = {
				let shared = shared.clone();
				let path = path.clone();

				move || async move { shared.preview_page(&path).await.map(Html) }
			};
			let dev_post = {
				let shared = shared.clone();
				let path = path.clone();

				move |Form(form): Form<PreviewForm>| async move {
					shared.preview_submit(&path, form).await.map(Html)
				}
			};

			router = router
				.route(path.as_str(), get(page_get).post(page_post))
				.route(&sub_route(&path, "image"), get(image_get))
				.route(&sub_route(&path, "dev"), get(dev_get).post(dev_post));
		}

		router
	}

	pub(crate) fn mounted(&self, path: &FramePath) -> Result<&MountedFrame, ConfigError> {
		self.frames
			.iter()
			.find(|mounted| &mounted.path == path)
			.ok_or_else(|| ConfigError::UnknownFramePath { path: path.to_string() })
	}
}
#[cfg(feature = "reqwest")]
impl FrameBroker<ReqwestReplayClient> {
	/// Creates a new broker for the provided public base URL.
	///
	/// The broker provisions its own reqwest-backed replay transport so callers do not need to
	/// pass HTTP handles explicitly.
	pub fn new(base_url: Url) -> Result<Self, ConfigError> {
		Self::with_http_client(base_url, ReqwestReplayClient::default())
	}
}
impl<C> Debug for FrameBroker<C>
where
	C: ?Sized + ReplayHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FrameBroker")
			.field("base_url", &self.base_url.as_str())
			.field("frames", &self.frames.iter().map(|m| m.path.as_str()).collect::<Vec<_>>())
			.finish()
	}
}

/// A frame handler bound to its mount path.
#[derive(Clone)]
pub(crate) struct MountedFrame {
	pub(crate) path: FramePath,
	pub(crate) handler: Arc<dyn FrameHandler>,
}

/// Appends `suffix` as a path segment, treating the root mount specially.
fn sub_route(path: &FramePath, suffix: &str) -> String {
	if path.as_str() == "/" {
		format!("/{suffix}")
	} else {
		format!("{}/{suffix}", path.as_str())
	}
}

/// Returns a copy of `url` with an extra query parameter appended.
pub(crate) fn with_query_param(url: &Url, name: &str, value: &str) -> Url {
	let mut url = url.clone();

	url.query_pairs_mut().append_pair(name, value);

	url
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	async fn noop_handler(_ctx: crate::context::FrameContext) -> Result<crate::frame::Frame> {
		Ok(test_frame("Noop"))
	}

	#[test]
	fn duplicate_mounts_are_rejected() {
		let err = build_reqwest_test_broker(
			Url::parse("https://frames.example.com").expect("Base fixture should parse."),
		)
		.frame("/quiz", noop_handler)
		.expect("First mount should succeed.")
		.frame("/quiz", noop_handler)
		.expect_err("Second mount on the same path must fail.");

		assert!(matches!(err, ConfigError::DuplicateFramePath { .. }));
	}

	#[test]
	fn frame_urls_respect_base_path_prefixes() {
		let broker = build_reqwest_test_broker(
			Url::parse("https://frames.example.com/apps/").expect("Base fixture should parse."),
		)
		.frame("/quiz", noop_handler)
		.expect("Mount should succeed.");
		let path = test_frame_path("/quiz");

		assert_eq!(
			broker.frame_url(&path).as_str(),
			"https://frames.example.com/apps/quiz"
		);
		assert_eq!(
			broker.image_url(&path).as_str(),
			"https://frames.example.com/apps/quiz/image"
		);
	}

	#[test]
	fn root_mounts_derive_clean_sub_routes() {
		let path = test_frame_path("/");

		assert_eq!(sub_route(&path, "image"), "/image");
		assert_eq!(sub_route(&test_frame_path("/quiz"), "dev"), "/quiz/dev");
	}

	#[test]
	fn cannot_be_a_base_urls_are_rejected() {
		let err = ReqwestFrameBroker::new(
			Url::parse("data:text/plain,hello").expect("Data URL fixture should parse."),
		)
		.expect_err("Cannot-be-a-base URLs must be rejected.");

		assert!(matches!(err, ConfigError::BaseUrlCannotBeBase { .. }));
	}

	#[test]
	fn query_params_append_without_clobbering() {
		let url = Url::parse("https://frames.example.com/quiz?keep=1")
			.expect("URL fixture should parse.");
		let with = with_query_param(&url, "previousContext", "abc/==");

		assert!(with.as_str().starts_with("https://frames.example.com/quiz?keep=1&"));
		assert_eq!(
			with.query_pairs().find(|(k, _)| k == "previousContext").map(|(_, v)| v.into_owned()),
			Some("abc/==".to_owned())
		);
	}
}
