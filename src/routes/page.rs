//! Frame page pipeline: context derivation, handler invocation, and meta-tag emission.

// self
use crate::{
	_prelude::*,
	context::{
		CONTEXT_PARAM, FrameActionRequest, FrameContext, FramePath, PREVIOUS_CONTEXT_PARAM,
		PreviousContext, codec,
	},
	frame::ImageSource,
	http::ReplayHttpClient,
	obs::{self, RouteKind, RouteOutcome, RouteSpan},
	render::{frame_meta_tags, render_document},
	routes::{FrameBroker, MountedFrame, with_query_param},
};

/// Document title used when a frame declares none.
const DEFAULT_TITLE: &str = "Frame";

impl<C> FrameBroker<C>
where
	C: ?Sized + ReplayHttpClient,
{
	/// Renders the initial frame document for the frame mounted on `path`.
	pub async fn render_initial(&self, path: &FramePath) -> Result<String> {
		const KIND: RouteKind = RouteKind::Page;

		let span = RouteSpan::new(KIND, "render_initial");

		obs::record_route_outcome(KIND, RouteOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mounted = self.mounted(path)?;
				let ctx = FrameContext::initial(self.frame_url(&mounted.path));

				self.run_frame_pipeline(mounted, ctx).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_route_outcome(KIND, RouteOutcome::Success),
			Err(_) => obs::record_route_outcome(KIND, RouteOutcome::Failure),
		}

		result
	}

	/// Renders the post-action frame document for the frame mounted on `path`.
	///
	/// `previous_raw` is the serialized previous context lifted off the post URL; an absent
	/// parameter yields a response context without state or resolvable buttons.
	pub async fn render_action(
		&self,
		path: &FramePath,
		previous_raw: Option<&str>,
		action: &FrameActionRequest,
	) -> Result<String> {
		const KIND: RouteKind = RouteKind::Page;

		let span = RouteSpan::new(KIND, "render_action");

		obs::record_route_outcome(KIND, RouteOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mounted = self.mounted(path)?;
				let previous: Option<PreviousContext> = self.codec.decode_opt(previous_raw)?;
				let ctx = FrameContext::from_action(
					self.frame_url(&mounted.path),
					previous.as_ref(),
					&action.untrusted_data,
				);

				self.run_frame_pipeline(mounted, ctx).await
			})
			.await;

		match &result {
			Ok(_) => obs::record_route_outcome(KIND, RouteOutcome::Success),
			Err(_) => obs::record_route_outcome(KIND, RouteOutcome::Failure),
		}

		result
	}

	/// Parses a raw action POST body, then renders the post-action document.
	pub(crate) async fn render_action_raw(
		&self,
		path: &FramePath,
		previous_raw: Option<&str>,
		body: &str,
	) -> Result<String> {
		let action: FrameActionRequest = codec::decode_json_str(body)?;

		self.render_action(path, previous_raw, &action).await
	}

	/// Shared tail of both page routes: invoke the handler, serialize the next round-trip's
	/// previous context onto the post URL, and emit the meta-tag document.
	async fn run_frame_pipeline(
		&self,
		mounted: &MountedFrame,
		ctx: FrameContext,
	) -> Result<String> {
		let frame_url = ctx.url.clone();
		// The handler consumes a copy; the original context travels on to the image route and
		// into the next round-trip's previous context.
		let frame = mounted.handler.handle(ctx.clone()).await?;
		let previous = PreviousContext {
			context: ctx.clone(),
			state: frame.state.clone(),
			intents: frame.intents.clone(),
		};
		let post_url = with_query_param(
			&frame_url,
			PREVIOUS_CONTEXT_PARAM,
			&self.codec.encode(&previous)?,
		);
		let image_url = match &frame.image {
			ImageSource::Remote { url } => url.clone(),
			ImageSource::Scene { .. } => with_query_param(
				&self.image_url(&mounted.path),
				CONTEXT_PARAM,
				&self.codec.encode(&ctx)?,
			),
		};
		let tags = frame_meta_tags(&frame, &image_url, &post_url);
		let title = frame.title.as_deref().unwrap_or(DEFAULT_TITLE);

		Ok(render_document(title, &tags))
	}
}
