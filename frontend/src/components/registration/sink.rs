//! Submission sinks and the client half of the proof upload adapter.
//!
//! Two interchangeable destinations exist for a finished registration:
//!
//! - [`SubmissionSink::BackendApi`] is our own relational API. The response
//!   is readable, so success means a `201` and failure carries a message.
//! - [`SubmissionSink::ExternalForm`] is a direct no-cors POST to the
//!   third-party form-collection endpoint. The response is cross-origin
//!   opaque, so "the call did not throw" is the only success signal we get;
//!   a weaker guarantee, accepted and documented.
//!
//! Each sink implies the validation policy of its deployment variant.

use common::model::registration::{RegistrationInput, NO_GROUP};
use common::requests::{ApiMessage, ProofUploadResponse};
use common::validation::Policy;
use gloo_net::http::Request;
use web_sys::{File, FormData, RequestMode};

/// The sink this deployment submits to.
pub const ACTIVE_SINK: SubmissionSink = SubmissionSink::BackendApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionSink {
    BackendApi,
    ExternalForm,
}

impl SubmissionSink {
    pub fn policy(self) -> Policy {
        match self {
            SubmissionSink::BackendApi => Policy::Strict,
            SubmissionSink::ExternalForm => Policy::Relaxed,
        }
    }
}

const FORM_ID: &str = "1MoGI5vO1x-T-2IHf7jkkULEnUUZVfCLH6V3k0Yvh_nc";

/// Entry identifiers dictated by the external form; each maps 1:1 to a
/// `RegistrationInput` field.
mod entries {
    pub const NAME: &str = "entry.1364157829";
    pub const PHONE: &str = "entry.1455060612";
    pub const EMAIL: &str = "entry.1706537260";
    pub const JOIN_CG: &str = "entry.1460132900";
    pub const FROM_CG: &str = "entry.1071819399";
    pub const FOOD: &str = "entry.722588337";
    pub const DRINK: &str = "entry.1917095034";
    pub const BRING_GIFTS: &str = "entry.1696718212";
    pub const PROOF_LINK: &str = "entry.2135820848";
}

/// Sends a validated registration to `sink`. Errors are user-facing strings;
/// the typed form state is left untouched by the caller on failure so the
/// guest can retry.
pub async fn submit(sink: SubmissionSink, input: &RegistrationInput) -> Result<(), String> {
    match sink {
        SubmissionSink::BackendApi => submit_api(input).await,
        SubmissionSink::ExternalForm => submit_external(input).await,
    }
}

async fn submit_api(input: &RegistrationInput) -> Result<(), String> {
    let response = Request::post("/api/registrations")
        .json(input)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status() == 201 {
        return Ok(());
    }
    match response.json::<ApiMessage>().await {
        Ok(body) => Err(body.message),
        Err(_) => Err(format!("Submission failed ({})", response.status())),
    }
}

async fn submit_external(input: &RegistrationInput) -> Result<(), String> {
    let payload = FormData::new().map_err(|_| "Could not build the form payload.".to_string())?;
    let group = input.connect_group.as_deref().unwrap_or(NO_GROUP);

    let fields = [
        (entries::NAME, input.name.as_str()),
        (entries::PHONE, input.phone.as_str()),
        (entries::EMAIL, input.email.as_str()),
        (
            entries::JOIN_CG,
            if input.has_joined_cg { "true" } else { "false" },
        ),
        (entries::FROM_CG, group),
        (entries::FOOD, input.food_item.as_str()),
        (entries::DRINK, input.drink_item.as_str()),
        (
            entries::BRING_GIFTS,
            if input.bringing_gift { "true" } else { "false" },
        ),
    ];
    for (entry, value) in fields {
        payload
            .append_with_str(entry, value)
            .map_err(|_| "Could not build the form payload.".to_string())?;
    }
    if !input.transfer_proof.is_empty() {
        payload
            .append_with_str(entries::PROOF_LINK, &input.transfer_proof)
            .map_err(|_| "Could not build the form payload.".to_string())?;
    }

    // Opaque response: absence of a network-level error is all we can check.
    Request::post(&format!(
        "https://docs.google.com/forms/d/{}/formResponse",
        FORM_ID
    ))
    .mode(RequestMode::NoCors)
    .body(payload)
    .map_err(|e| e.to_string())?
    .send()
    .await
    .map_err(|e| e.to_string())?;

    Ok(())
}

/// Uploads the selected proof file through the backend adapter and returns
/// the reference to place into `transferProof`.
pub async fn upload_proof(file: File, owner_name_hint: String) -> Result<String, String> {
    let payload = FormData::new().map_err(|_| "Could not build the upload payload.".to_string())?;
    payload
        .append_with_str("name", &owner_name_hint)
        .map_err(|_| "Could not build the upload payload.".to_string())?;
    payload
        .append_with_blob_and_filename("file", &file, &file.name())
        .map_err(|_| "Could not attach the file.".to_string())?;

    let response = Request::post("/api/proofs")
        .body(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status() == 201 {
        let body: ProofUploadResponse = response.json().await.map_err(|e| e.to_string())?;
        return Ok(body.reference);
    }
    match response.json::<ApiMessage>().await {
        Ok(body) => Err(body.message),
        Err(_) => Err(format!("Upload failed ({})", response.status())),
    }
}
