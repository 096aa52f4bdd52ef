//! Strongly typed identifiers enforced across the broker domain.

// std
use std::{borrow::Borrow, num::NonZeroU64, ops::Deref, str::FromStr};
// self
use crate::_prelude::*;

const FRAME_PATH_MAX_LEN: usize = 128;

/// Error returned when frame path validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum FramePathError {
	/// The path was empty.
	#[error("Frame path cannot be empty.")]
	Empty,
	/// The path does not start with `/`.
	#[error("Frame path must start with `/`.")]
	MissingLeadingSlash,
	/// The path ends with `/` (sub-routes are derived by suffixing).
	#[error("Frame path must not end with `/`.")]
	TrailingSlash,
	/// The path contains whitespace characters.
	#[error("Frame path contains whitespace.")]
	ContainsWhitespace,
	/// The path carries a query string or fragment.
	#[error("Frame path must not carry a query string or fragment.")]
	ContainsQueryOrFragment,
	/// The path exceeded the allowed character count.
	#[error("Frame path exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Validated mount path for a frame (e.g. `/quiz` or `/quiz/round-two`).
///
/// The image and preview routes are derived by suffixing `/image` and `/dev`, so paths never end
/// with a slash and never carry query strings of their own.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FramePath(String);
impl FramePath {
	/// Creates a new frame path after validation.
	pub fn new(value: impl AsRef<str>) -> Result<Self, FramePathError> {
		let view = value.as_ref();

		validate_path(view)?;

		Ok(Self(view.to_owned()))
	}

	/// Returns the path as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Deref for FramePath {
	type Target = str;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
impl AsRef<str> for FramePath {
	fn as_ref(&self) -> &str {
		&self.0
	}
}
impl Borrow<str> for FramePath {
	fn borrow(&self) -> &str {
		&self.0
	}
}
impl From<FramePath> for String {
	fn from(value: FramePath) -> Self {
		value.0
	}
}
impl TryFrom<String> for FramePath {
	type Error = FramePathError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		validate_path(&value)?;

		Ok(Self(value))
	}
}
impl FromStr for FramePath {
	type Err = FramePathError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::new(s)
	}
}
impl Debug for FramePath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "FramePath({})", self.0)
	}
}
impl Display for FramePath {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn validate_path(view: &str) -> Result<(), FramePathError> {
	if view.is_empty() {
		return Err(FramePathError::Empty);
	}
	if !view.starts_with('/') {
		return Err(FramePathError::MissingLeadingSlash);
	}
	if view.len() > 1 && view.ends_with('/') {
		return Err(FramePathError::TrailingSlash);
	}
	if view.chars().any(char::is_whitespace) {
		return Err(FramePathError::ContainsWhitespace);
	}
	if view.contains(['?', '#']) {
		return Err(FramePathError::ContainsQueryOrFragment);
	}
	if view.len() > FRAME_PATH_MAX_LEN {
		return Err(FramePathError::TooLong { max: FRAME_PATH_MAX_LEN });
	}

	Ok(())
}

/// Error returned when fid validation fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum FidError {
	/// Farcaster never issues fid 0.
	#[error("Fid cannot be zero.")]
	Zero,
}

/// Farcaster user identifier (fid); always non-zero.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Fid(NonZeroU64);
impl Fid {
	/// Fid 1, the first registered Farcaster account; the preview's placeholder identity.
	pub const FIRST: Self = Self(NonZeroU64::MIN);

	/// Creates a new fid after validation.
	pub fn new(value: u64) -> Result<Self, FidError> {
		NonZeroU64::new(value).map(Self).ok_or(FidError::Zero)
	}

	/// Returns the numeric fid.
	pub fn get(self) -> u64 {
		self.0.get()
	}
}
impl From<Fid> for u64 {
	fn from(value: Fid) -> Self {
		value.get()
	}
}
impl TryFrom<u64> for Fid {
	type Error = FidError;

	fn try_from(value: u64) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl Debug for Fid {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "Fid({})", self.0)
	}
}
impl Display for Fid {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		Display::fmt(&self.0, f)
	}
}
