//! Rust’s turnkey Farcaster Frames broker—mount stateful frame routes, query-string context
//! codecs, and a signed local preview in one crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod context;
pub mod error;
pub mod frame;
pub mod handler;
pub mod http;
pub mod obs;
pub mod preview;
pub mod render;
pub mod routes;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		context::FramePath,
		frame::{Button, Frame, ImageScene, ImageSource},
		http::ReqwestReplayClient,
		routes::FrameBroker,
	};

	/// Broker type alias used by reqwest-backed integration tests.
	pub type ReqwestTestBroker = FrameBroker<ReqwestReplayClient>;

	/// Builds a reqwest replay client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_replay_client() -> ReqwestReplayClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestReplayClient::with_client(client)
	}

	/// Constructs a [`FrameBroker`] rooted at the provided public base URL and backed by the
	/// reqwest transport used across integration tests.
	pub fn build_reqwest_test_broker(base_url: Url) -> ReqwestTestBroker {
		FrameBroker::with_http_client(base_url, test_reqwest_replay_client())
			.expect("Test broker base URL should be accepted.")
	}

	/// Parses a [`FramePath`] fixture, panicking with a readable message on invalid input.
	pub fn test_frame_path(path: &str) -> FramePath {
		FramePath::new(path).expect("Frame path fixture should be valid.")
	}

	/// Builds a minimal single-button frame used by route and preview tests.
	pub fn test_frame(label: &str) -> Frame {
		Frame::builder(ImageSource::scene(ImageScene::new([label])))
			.button(Button::post(label))
			.build()
			.expect("Test frame fixture should pass validation.")
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use axum;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))]
use {color_eyre as _, frame_broker as _, httpmock as _, tokio as _, tower as _};
