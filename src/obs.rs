//! Optional observability helpers for broker routes.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `frame_broker.route` with the `route`
//!   (route kind) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `frame_broker_route_total` counter for every
//!   attempt/success/failure, labeled by `route` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Broker route kinds observed per request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteKind {
	/// Frame page renders (initial GET and action POST).
	Page,
	/// On-demand image renders.
	Image,
	/// Developer preview requests.
	Preview,
}
impl RouteKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RouteKind::Page => "page",
			RouteKind::Image => "image",
			RouteKind::Preview => "preview",
		}
	}
}
impl Display for RouteKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RouteOutcome {
	/// Entry to a route pipeline.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl RouteOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RouteOutcome::Attempt => "attempt",
			RouteOutcome::Success => "success",
			RouteOutcome::Failure => "failure",
		}
	}
}
impl Display for RouteOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
