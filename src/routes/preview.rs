//! Developer preview orchestration: fetch, sign, replay, fall back.

// self
use crate::{
	_prelude::*,
	context::FramePath,
	error::{CodecError, PreviewError},
	http::ReplayHttpClient,
	obs::{self, RouteKind, RouteOutcome, RouteSpan},
	preview::{PreviewAction, render_preview_document, sign_preview_action, ui},
	routes::FrameBroker,
};

/// Form submitted by the preview UI for one simulated button press.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewForm {
	/// 1-based index of the pressed button.
	pub button_index: u8,
	/// Text entered into the preview's input field.
	#[serde(default)]
	pub input_text: Option<String>,
	/// Post URL lifted off the previewed frame's meta-tags.
	pub post_url: String,
}

impl<C> FrameBroker<C>
where
	C: ?Sized + ReplayHttpClient,
{
	/// Renders the preview UI for the frame mounted on `path`.
	///
	/// Fetches the frame page over HTTP (exercising the full deployed pipeline rather than
	/// calling the handler in-process), reads the meta-tags back out of the document, and wraps
	/// them in the interactive preview page.
	pub async fn preview_page(&self, path: &FramePath) -> Result<String> {
		const KIND: RouteKind = RouteKind::Preview;

		let span = RouteSpan::new(KIND, "preview_page");

		obs::record_route_outcome(KIND, RouteOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mounted = self.mounted(path)?;
				let frame_url = self.frame_url(&mounted.path);
				let response = self.http_client.fetch(&frame_url).await?;

				if !response.is_success() {
					return Err(PreviewError::FrameFetchRejected {
						status: response.status,
						status_text: response.status_text,
					}
					.into());
				}

				let parsed = require_post_url(ui::extract_frame_tags(&response.body))?;

				Ok(render_preview_document(&frame_url, &parsed, None))
			})
			.await;

		match &result {
			Ok(_) => obs::record_route_outcome(KIND, RouteOutcome::Success),
			Err(_) => obs::record_route_outcome(KIND, RouteOutcome::Failure),
		}

		result
	}

	/// Replays a simulated button press against the frame's declared post URL.
	///
	/// Signs a placeholder-identity action and POSTs it to the post URL the preview form carried.
	/// A non-2xx response triggers a single unconditional re-fetch of the original frame page,
	/// with the rejected status line surfaced as a banner in the re-rendered preview. No retries
	/// beyond that one fallback.
	pub async fn preview_submit(&self, path: &FramePath, form: PreviewForm) -> Result<String> {
		const KIND: RouteKind = RouteKind::Preview;

		let span = RouteSpan::new(KIND, "preview_submit");

		obs::record_route_outcome(KIND, RouteOutcome::Attempt);

		let result = span.instrument(self.replay_action(path, form)).await;

		match &result {
			Ok(_) => obs::record_route_outcome(KIND, RouteOutcome::Success),
			Err(_) => obs::record_route_outcome(KIND, RouteOutcome::Failure),
		}

		result
	}

	async fn replay_action(&self, path: &FramePath, form: PreviewForm) -> Result<String> {
		let mounted = self.mounted(path)?;
		let frame_url = self.frame_url(&mounted.path);
		let post_url = Url::parse(&form.post_url)
			.map_err(|source| PreviewError::InvalidPostUrl { source })?;
		let input_text = form.input_text.as_deref().filter(|text| !text.is_empty());
		let signed = sign_preview_action(&PreviewAction {
			frame_url: &frame_url,
			button_index: form.button_index,
			input_text,
		})?;
		let body = serde_json::to_value(&signed.request)
			.map_err(|source| CodecError::Encode { source })?;

		self.replay_metrics.record_attempt();

		let response = match self.http_client.post_json(&post_url, &body).await {
			Ok(response) => response,
			Err(err) => {
				self.replay_metrics.record_failure();

				return Err(err.into());
			},
		};
		let (document, banner) = if response.is_success() {
			self.replay_metrics.record_success();

			(response.body, None)
		} else {
			let banner = response.status_line();
			let fallback = match self.http_client.fetch(&frame_url).await {
				Ok(fallback) => fallback,
				Err(err) => {
					self.replay_metrics.record_failure();

					return Err(err.into());
				},
			};

			if !fallback.is_success() {
				self.replay_metrics.record_failure();

				return Err(PreviewError::FallbackFailed { status: fallback.status }.into());
			}

			self.replay_metrics.record_fallback();

			(fallback.body, Some(banner))
		};
		let parsed = require_post_url(ui::extract_frame_tags(&document))?;

		Ok(render_preview_document(&frame_url, &parsed, banner.as_deref()))
	}
}

/// The preview cannot drive a document that declares no post URL.
fn require_post_url(parsed: ui::ParsedFrame) -> Result<ui::ParsedFrame, PreviewError> {
	if parsed.post_url.is_none() {
		return Err(PreviewError::MalformedFrameDocument { missing: "fc:frame:post_url" });
	}

	Ok(parsed)
}
