//! Transport primitives for the developer preview's replay round-trips.
//!
//! The module exposes [`ReplayHttpClient`] so downstream crates can integrate custom HTTP
//! clients. The preview only needs two verbs: POST a signed action as JSON, and GET an HTML
//! page. Responses surface the status code, the canonical status text (which the preview UI
//! displays verbatim on rejected replays), and the body.

// std
use std::ops::Deref;
// self
use crate::{_prelude::*, error::TransportError};

/// Response captured from a replay round-trip.
#[derive(Clone, Debug)]
pub struct ReplayResponse {
	/// HTTP status code.
	pub status: u16,
	/// Canonical status text (e.g. `Internal Server Error`).
	pub status_text: String,
	/// Response body decoded as text.
	pub body: String,
}
impl ReplayResponse {
	/// Returns true for 2xx responses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Formats the status line the preview UI displays on rejected replays.
	pub fn status_line(&self) -> String {
		format!("HTTP {} {}", self.status, self.status_text)
	}
}

/// Future returned by [`ReplayHttpClient`] operations.
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ReplayResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing preview replays.
///
/// The trait acts as the broker's only dependency on an HTTP stack. Callers provide an
/// implementation (typically behind `Arc<T>` where `T: ReplayHttpClient`) when constructing the
/// broker. Implementations must be `Send + Sync + 'static` so they can be shared across broker
/// instances, and the returned futures must be `Send` so route handlers stay executor-agnostic.
pub trait ReplayHttpClient
where
	Self: 'static + Send + Sync,
{
	/// POSTs a JSON body to the provided URL, returning the captured response.
	fn post_json<'a>(&'a self, url: &'a Url, body: &'a serde_json::Value)
	-> TransportFuture<'a>;

	/// Fetches the provided URL, returning the captured response.
	fn fetch<'a>(&'a self, url: &'a Url) -> TransportFuture<'a>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Replay requests follow redirects with reqwest's default policy, matching what a Farcaster
/// client does when a frame handler answers with one.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestReplayClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestReplayClient {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	async fn capture(response: reqwest::Response) -> Result<ReplayResponse, TransportError> {
		let status = response.status();
		let status_text = status.canonical_reason().unwrap_or("Unknown Status").to_owned();
		let body = response.text().await?;

		Ok(ReplayResponse { status: status.as_u16(), status_text, body })
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestReplayClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestReplayClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl ReplayHttpClient for ReqwestReplayClient {
	fn post_json<'a>(
		&'a self,
		url: &'a Url,
		body: &'a serde_json::Value,
	) -> TransportFuture<'a> {
		Box::pin(async move {
			let response = self.0.post(url.clone()).json(body).send().await?;

			Self::capture(response).await
		})
	}

	fn fetch<'a>(&'a self, url: &'a Url) -> TransportFuture<'a> {
		Box::pin(async move {
			let response = self.0.get(url.clone()).send().await?;

			Self::capture(response).await
		})
	}
}
