//! On-demand image pipeline behind the renderer seam.

// self
use crate::{
	_prelude::*,
	context::{FrameContext, FramePath},
	frame::ImageSource,
	http::ReplayHttpClient,
	obs::{self, RouteKind, RouteOutcome, RouteSpan},
	render::RenderedImage,
	routes::FrameBroker,
};

/// Result of the image route: bytes to serve or a redirect to a hosted image.
#[derive(Clone, Debug)]
pub enum ImageOutput {
	/// Scene source rendered through the [`ImageRenderer`](crate::render::ImageRenderer) seam.
	Rendered(RenderedImage),
	/// Remote source; clients are redirected to the hosted image.
	Redirect(Url),
}

impl<C> FrameBroker<C>
where
	C: ?Sized + ReplayHttpClient,
{
	/// Produces the OG image for the frame mounted on `path`.
	///
	/// `context_raw` is the serialized context lifted off the image URL's query string; the
	/// handler is re-invoked with it so the image reflects the interaction that produced the
	/// page. An absent parameter falls back to the initial context.
	pub async fn render_image(
		&self,
		path: &FramePath,
		context_raw: Option<&str>,
	) -> Result<ImageOutput> {
		const KIND: RouteKind = RouteKind::Image;

		let span = RouteSpan::new(KIND, "render_image");

		obs::record_route_outcome(KIND, RouteOutcome::Attempt);

		let result = span
			.instrument(async move {
				let mounted = self.mounted(path)?;
				let ctx = self
					.codec
					.decode_opt::<FrameContext>(context_raw)?
					.unwrap_or_else(|| FrameContext::initial(self.frame_url(&mounted.path)));
				let frame = mounted.handler.handle(ctx).await?;

				match frame.image {
					ImageSource::Remote { url } => Ok(ImageOutput::Redirect(url)),
					ImageSource::Scene { scene } => Ok(ImageOutput::Rendered(
						self.renderer.render(&scene, frame.aspect_ratio).await?,
					)),
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_route_outcome(KIND, RouteOutcome::Success),
			Err(_) => obs::record_route_outcome(KIND, RouteOutcome::Failure),
		}

		result
	}
}
