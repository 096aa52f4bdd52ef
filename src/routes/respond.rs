//! HTTP response mappings for route pipeline results.

// crates.io
use axum::{
	http::{StatusCode, header},
	response::{IntoResponse, Redirect, Response},
};
// self
use crate::{_prelude::*, error::PreviewError, routes::ImageOutput};

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = match &self {
			Error::Codec(_) => StatusCode::BAD_REQUEST,
			Error::Config(_) | Error::Frame(_) => StatusCode::INTERNAL_SERVER_ERROR,
			Error::Transport(_) => StatusCode::BAD_GATEWAY,
			Error::Preview(preview) => match preview {
				PreviewError::InvalidPostUrl { .. } => StatusCode::BAD_REQUEST,
				PreviewError::FrameFetchRejected { .. }
				| PreviewError::FallbackFailed { .. }
				| PreviewError::MalformedFrameDocument { .. } => StatusCode::BAD_GATEWAY,
			},
		};

		(status, self.to_string()).into_response()
	}
}

impl IntoResponse for ImageOutput {
	fn into_response(self) -> Response {
		match self {
			ImageOutput::Rendered(image) =>
				([(header::CONTENT_TYPE, image.content_type)], image.bytes).into_response(),
			ImageOutput::Redirect(url) => Redirect::temporary(url.as_str()).into_response(),
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{error::CodecError, render::RenderedImage};

	#[test]
	fn codec_errors_map_to_bad_request() {
		let error = Error::from(CodecError::PayloadTooLarge { len: 10, max: 5 });
		let response = error.into_response();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}

	#[test]
	fn rendered_images_carry_their_content_type() {
		let output = ImageOutput::Rendered(RenderedImage {
			bytes: b"<svg />".to_vec(),
			content_type: "image/svg+xml".into(),
		});
		let response = output.into_response();

		assert_eq!(
			response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
			Some("image/svg+xml")
		);
	}

	#[test]
	fn remote_images_redirect() {
		let output = ImageOutput::Redirect(
			Url::parse("https://img.example.com/card.png")
				.expect("URL fixture should parse successfully."),
		);
		let response = output.into_response();

		assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
	}
}
