#![cfg(feature = "reqwest")]

// crates.io
use axum::{
	body::Body,
	http::{Request, StatusCode, header},
};
use tower::ServiceExt;
// self
use frame_broker::{
	_preludet::*,
	context::{CONTEXT_PARAM, ContextCodec, FrameContext},
	frame::{AspectRatio, Button, Frame, ImageScene, ImageSource},
	render::{ImageRenderer, RenderFuture, RenderedImage},
};

const BASE_URL: &str = "https://frames.example.com";

fn scene_handler(ctx: FrameContext) -> impl Future<Output = Result<Frame>> + Send {
	async move {
		let caption = ctx
			.state
			.as_ref()
			.and_then(|state| state.get("caption"))
			.and_then(|caption| caption.as_str())
			.unwrap_or("Fresh card")
			.to_owned();

		Frame::builder(ImageSource::scene(ImageScene::new([caption])))
			.aspect_ratio(AspectRatio::Square)
			.button(Button::post("Next"))
			.build()
			.map_err(Into::into)
	}
}

fn remote_handler(_ctx: FrameContext) -> impl Future<Output = Result<Frame>> + Send {
	async move {
		Frame::builder(ImageSource::remote(
			Url::parse("https://img.example.com/card.png")
				.expect("Remote image fixture should parse."),
		))
		.button(Button::post("Next"))
		.build()
		.map_err(Into::into)
	}
}

fn router() -> axum::Router {
	build_reqwest_test_broker(
		Url::parse(BASE_URL).expect("Base URL fixture should parse successfully."),
	)
	.frame("/scene", scene_handler)
	.expect("Scene frame should mount successfully.")
	.frame("/remote", remote_handler)
	.expect("Remote frame should mount successfully.")
	.into_router()
}

async fn body_text(response: axum::response::Response) -> String {
	let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Response body should be collectable.");

	String::from_utf8(bytes.to_vec()).expect("Response body should be UTF-8.")
}

#[tokio::test]
async fn scene_images_render_as_svg_with_the_declared_ratio() {
	let response = router()
		.oneshot(
			Request::builder()
				.uri("/scene/image")
				.body(Body::empty())
				.expect("GET request should build."),
		)
		.await
		.expect("Router should answer the image GET.");

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers().get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok()),
		Some("image/svg+xml")
	);

	let svg = body_text(response).await;

	assert!(svg.contains("width=\"600\" height=\"600\""), "Square ratio should be honored.");
	assert!(svg.contains(">Fresh card</text>"));
}

#[tokio::test]
async fn image_context_parameter_drives_the_rendered_scene() {
	let mut ctx = FrameContext::initial(
		Url::parse("https://frames.example.com/scene").expect("Frame URL should parse."),
	);

	ctx.state = Some(serde_json::json!({ "caption": "Round 7" }));

	let encoded = ContextCodec::default().encode(&ctx).expect("Context should encode.");
	let response = router()
		.oneshot(
			Request::builder()
				.uri(format!("/scene/image?{CONTEXT_PARAM}={encoded}"))
				.body(Body::empty())
				.expect("GET request should build."),
		)
		.await
		.expect("Router should answer the image GET.");

	assert_eq!(response.status(), StatusCode::OK);

	let svg = body_text(response).await;

	assert!(svg.contains(">Round 7</text>"), "Carried state should drive the image.");
}

#[tokio::test]
async fn remote_images_redirect_to_the_hosted_url() {
	let response = router()
		.oneshot(
			Request::builder()
				.uri("/remote/image")
				.body(Body::empty())
				.expect("GET request should build."),
		)
		.await
		.expect("Router should answer the image GET.");

	assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	assert_eq!(
		response.headers().get(header::LOCATION).and_then(|value| value.to_str().ok()),
		Some("https://img.example.com/card.png")
	);
}

#[tokio::test]
async fn custom_renderers_plug_into_the_image_route() {
	struct JoiningRenderer;
	impl ImageRenderer for JoiningRenderer {
		fn render<'a>(
			&'a self,
			scene: &'a ImageScene,
			_aspect_ratio: AspectRatio,
		) -> RenderFuture<'a> {
			Box::pin(async move {
				Ok(RenderedImage {
					bytes: scene.lines.join("|").into_bytes(),
					content_type: "image/png".into(),
				})
			})
		}
	}

	let router = build_reqwest_test_broker(
		Url::parse(BASE_URL).expect("Base URL fixture should parse successfully."),
	)
	.with_renderer(JoiningRenderer)
	.frame("/scene", scene_handler)
	.expect("Scene frame should mount successfully.")
	.into_router();
	let response = router
		.oneshot(
			Request::builder()
				.uri("/scene/image")
				.body(Body::empty())
				.expect("GET request should build."),
		)
		.await
		.expect("Router should answer the image GET.");

	assert_eq!(
		response.headers().get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok()),
		Some("image/png")
	);
	assert_eq!(body_text(response).await, "Fresh card");
}

#[tokio::test]
async fn corrupted_image_context_is_rejected_with_bad_request() {
	let response = router()
		.oneshot(
			Request::builder()
				.uri(format!("/scene/image?{CONTEXT_PARAM}=!!!"))
				.body(Body::empty())
				.expect("GET request should build."),
		)
		.await
		.expect("Router should answer the image GET.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
