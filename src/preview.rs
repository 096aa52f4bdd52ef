//! Local developer preview: signs simulated frame actions and renders the preview UI.
//!
//! `signer` constructs a frame-action message with placeholder identities and signs it with an
//! ephemeral Ed25519 key generated per request. `ui` renders the self-contained preview page and
//! reads frame meta-tags back out of replayed documents. `metrics` counts replay outcomes. The
//! replay orchestration itself lives with the routes in
//! [`routes::preview`](crate::routes::preview).

pub mod metrics;
pub mod signer;
pub mod ui;

pub use metrics::*;
pub use signer::*;
pub use ui::*;
