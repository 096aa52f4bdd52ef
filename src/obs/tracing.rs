// self
use crate::{_prelude::*, obs::RouteKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedRoute<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedRoute<F> = F;

/// A span builder used by broker routes.
#[derive(Clone, Debug)]
pub struct RouteSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl RouteSpan {
	/// Creates a new span tagged with the provided route kind + stage.
	pub fn new(kind: RouteKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("frame_broker.route", route = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Enters the span for synchronous sections.
	pub fn entered(self) -> RouteSpanGuard {
		#[cfg(feature = "tracing")]
		{
			RouteSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			RouteSpanGuard {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedRoute<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// RAII guard returned by [`RouteSpan::entered`].
pub struct RouteSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for RouteSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("RouteSpanGuard(..)")
	}
}
