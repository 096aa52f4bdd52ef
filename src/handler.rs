//! The application-facing handler contract invoked once per frame request.

// self
use crate::{_prelude::*, context::FrameContext, frame::Frame};

/// Future returned by [`FrameHandler::handle`].
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Frame>> + Send>>;

/// Per-frame application logic: derive the next [`Frame`] from the request context.
///
/// The trait is the broker's only dependency on application code. Implementations must be
/// `Send + Sync` so a single handler can serve concurrent requests without wrappers; any async
/// closure returning `Result<Frame>` satisfies the contract through the blanket impl below.
pub trait FrameHandler
where
	Self: Send + Sync,
{
	/// Computes the frame to render for the provided request context.
	fn handle(&self, ctx: FrameContext) -> HandlerFuture;
}
impl<F, Fut> FrameHandler for F
where
	F: Send + Sync + Fn(FrameContext) -> Fut,
	Fut: 'static + Send + Future<Output = Result<Frame>>,
{
	fn handle(&self, ctx: FrameContext) -> HandlerFuture {
		Box::pin(self(ctx))
	}
}
