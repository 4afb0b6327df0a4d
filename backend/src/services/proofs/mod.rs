//! # Proof Upload Service Module
//!
//! Server side of the proof-of-payment upload adapter. The form posts the
//! selected file here as `multipart/form-data` (a `file` part plus an
//! optional `name` part carrying the registrant's display name, used only to
//! derive a readable storage path).
//!
//! ## Registered routes:
//!
//! *   **`POST /api/proofs`**:
//!     - **Handler**: `upload::process`
//!     - **Description**: Checks the file's content type (image or PDF) and
//!       size ceiling before anything else, then produces a proof reference
//!       in one of two ways depending on configuration: without a file host
//!       the bytes are re-encoded as an inline base64 data URL; with a
//!       GitHub host configured they are pushed as a single atomic create
//!       call and the host's public download URL is returned. Either way the
//!       response is `201` with `{reference}`. Oversized or wrong-typed
//!       files are `400` before any network call; host failures are `502`
//!       carrying the host status and a bounded excerpt of its error body.
//!
//! The bearer credential for the host lives in [`crate::config`]; it is read
//! once at startup and never reaches the browser, which is the reason this
//! adapter runs on the server at all.

mod github;
mod upload;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/proofs";

/// Configures and returns the Actix scope for proof uploads.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(upload::process))
}
