use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use base64::{engine::general_purpose, Engine as _};
use common::model::proof::ProofReference;
use common::requests::ProofUploadResponse;
use futures_util::StreamExt;
use log::error;

use crate::errors::UploadError;
use crate::state::AppState;

use super::github;

/// Actix handler for `POST /api/proofs`.
pub async fn process(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, UploadError> {
    let reference = upload_proof(&state, payload).await?;
    Ok(HttpResponse::Created().json(ProofUploadResponse { reference }))
}

/// A fully buffered upload, already within the size ceiling.
struct ProofFile {
    filename: String,
    mime: String,
    bytes: Vec<u8>,
}

fn is_supported_type(mime: &str) -> bool {
    mime.starts_with("image/") || mime == "application/pdf"
}

/// Appends a multipart chunk, failing as soon as the ceiling is crossed so
/// an oversized upload is never buffered whole, let alone sent to the host.
fn append_chunk(buf: &mut Vec<u8>, chunk: &[u8], max_bytes: usize) -> Result<(), UploadError> {
    if buf.len() + chunk.len() > max_bytes {
        return Err(UploadError::TooLarge(max_bytes / (1024 * 1024)));
    }
    buf.extend_from_slice(chunk);
    Ok(())
}

/// Converts the validated file into a proof reference: a hosted download URL
/// when a file host is configured, an inline data URL otherwise.
pub async fn upload_proof(state: &AppState, payload: Multipart) -> Result<String, UploadError> {
    let (file, owner_hint) = read_parts(payload, state.config.proof_max_bytes).await?;
    let content = general_purpose::STANDARD.encode(&file.bytes);

    match &state.config.github {
        Some(host) => {
            github::create_content(
                &state.http,
                host,
                owner_hint.as_deref(),
                &file.filename,
                &content,
            )
            .await
        }
        None => Ok(ProofReference::inline(&file.mime, &content).to_string()),
    }
}

/// Walks the multipart stream, collecting the `file` part (type- and
/// size-checked) and the optional `name` part.
async fn read_parts(
    mut payload: Multipart,
    max_bytes: usize,
) -> Result<(ProofFile, Option<String>), UploadError> {
    let mut file: Option<ProofFile> = None;
    let mut owner_hint: Option<String> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| {
            error!("Unreadable multipart payload: {}", e);
            UploadError::Malformed
        })?;
        let part_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match part_name.as_deref() {
            Some("file") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let mime = field
                    .content_type()
                    .map(|m| m.essence_str().to_string())
                    .unwrap_or_default();
                if !is_supported_type(&mime) {
                    return Err(UploadError::WrongType);
                }

                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| {
                        error!("Error reading upload chunk: {}", e);
                        UploadError::Malformed
                    })?;
                    append_chunk(&mut bytes, &chunk, max_bytes)?;
                }

                file = Some(ProofFile {
                    filename,
                    mime,
                    bytes,
                });
            }

            Some("name") => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    let chunk = chunk.map_err(|e| {
                        error!("Error reading name part: {}", e);
                        UploadError::Malformed
                    })?;
                    bytes.extend_from_slice(&chunk);
                }
                owner_hint = String::from_utf8(bytes).ok();
            }

            _ => {}
        }
    }

    let file = file.ok_or(UploadError::MissingFile)?;
    Ok((file, owner_hint))
}
