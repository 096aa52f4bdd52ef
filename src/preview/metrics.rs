//! Always-on counters for preview replay outcomes.

// std
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for preview replay attempts.
#[derive(Debug, Default)]
pub struct ReplayMetrics {
	attempts: AtomicU64,
	success: AtomicU64,
	fallbacks: AtomicU64,
	failure: AtomicU64,
}
impl ReplayMetrics {
	/// Returns the total number of replay attempts.
	pub fn attempts(&self) -> u64 {
		self.attempts.load(Ordering::Relaxed)
	}

	/// Returns the number of replays the frame handler accepted.
	pub fn successes(&self) -> u64 {
		self.success.load(Ordering::Relaxed)
	}

	/// Returns the number of rejected replays recovered via the fallback fetch.
	pub fn fallbacks(&self) -> u64 {
		self.fallbacks.load(Ordering::Relaxed)
	}

	/// Returns the number of replays that failed outright.
	pub fn failures(&self) -> u64 {
		self.failure.load(Ordering::Relaxed)
	}

	pub(crate) fn record_attempt(&self) {
		self.attempts.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_success(&self) {
		self.success.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_fallback(&self) {
		self.fallbacks.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn record_failure(&self) {
		self.failure.fetch_add(1, Ordering::Relaxed);
	}
}
