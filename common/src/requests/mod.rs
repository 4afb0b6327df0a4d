use serde::{Deserialize, Serialize};

/// Body returned by `POST /api/proofs` on success: the reference the form
/// should place into `transferProof`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProofUploadResponse {
    pub reference: String,
}

/// Generic `{message}` body used by every API error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}
