// self
use crate::obs::{RouteKind, RouteOutcome};

/// Records a route outcome via the global metrics recorder (when enabled).
pub fn record_route_outcome(kind: RouteKind, outcome: RouteOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"frame_broker_route_total",
			"route" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}
