//! Hosted proof storage on the GitHub contents API.
//!
//! One authenticated `PUT /repos/{owner}/{repo}/contents/{path}` per upload,
//! body `{message, content}` with the file base64-encoded. The call either
//! yields a public `download_url` or fails closed; there is no retry and no
//! partially created reference.

use chrono::Utc;
use log::error;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;

use crate::config::GithubHost;
use crate::errors::UploadError;

const API_BASE: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = "registration-backend";

/// How much of a host error body is carried into the transport error.
const SNIPPET_BYTES: usize = 200;

/// Lower-cases the registrant's display name and collapses anything that is
/// not a letter or digit into single hyphens, so the storage path stays
/// readable regardless of what was typed. Empty input falls back to `guest`.
pub fn sanitize_owner_hint(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let collapsed = Regex::new(r"[^a-z0-9]+")
        .unwrap()
        .replace_all(&lowered, "-");
    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        "guest".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Replaces filename characters outside `[A-Za-z0-9._-]` with underscores.
pub fn sanitize_filename(name: &str) -> String {
    let safe = Regex::new(r"[^a-zA-Z0-9._-]")
        .unwrap()
        .replace_all(name, "_")
        .to_string();
    if safe.is_empty() {
        "proof".to_string()
    } else {
        safe
    }
}

/// Collision-resistant storage path: timestamp, owner hint, filename.
pub fn storage_path(unix_millis: i64, owner_hint: Option<&str>, filename: &str) -> String {
    format!(
        "uploads/{}-{}-{}",
        unix_millis,
        sanitize_owner_hint(owner_hint.unwrap_or("")),
        sanitize_filename(filename)
    )
}

/// Truncates a host error body to `SNIPPET_BYTES`, respecting char bounds.
fn snippet(body: &str) -> String {
    if body.len() <= SNIPPET_BYTES {
        return body.to_string();
    }
    let mut end = SNIPPET_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

fn transport_error(status: u16, body: &str) -> UploadError {
    UploadError::Transport {
        status,
        snippet: snippet(body),
    }
}

#[derive(Deserialize)]
struct ContentsResponse {
    content: Option<ContentsFile>,
}

#[derive(Deserialize)]
struct ContentsFile {
    download_url: Option<String>,
}

fn extract_download_url(body: &str) -> Result<String, UploadError> {
    let parsed: ContentsResponse = serde_json::from_str(body).map_err(|e| {
        error!("Unparseable contents response from file host: {}", e);
        UploadError::MissingLink
    })?;
    parsed
        .content
        .and_then(|c| c.download_url)
        .ok_or(UploadError::MissingLink)
}

/// Creates the file on the host and returns its public download URL.
pub async fn create_content(
    client: &Client,
    host: &GithubHost,
    owner_hint: Option<&str>,
    filename: &str,
    content_base64: &str,
) -> Result<String, UploadError> {
    let safe_name = sanitize_filename(filename);
    let path = storage_path(Utc::now().timestamp_millis(), owner_hint, filename);
    let url = format!(
        "{}/repos/{}/{}/contents/{}",
        API_BASE, host.owner, host.repo, path
    );

    let response = client
        .put(&url)
        .header("Accept", "application/vnd.github+json")
        .header("Authorization", format!("Bearer {}", host.token))
        .header("X-GitHub-Api-Version", API_VERSION)
        .header("User-Agent", USER_AGENT)
        .json(&serde_json::json!({
            "message": format!("Add upload {}", safe_name),
            "content": content_base64,
        }))
        .send()
        .await
        .map_err(|e| {
            error!("Proof upload to {} never reached the host: {}", path, e);
            UploadError::Network
        })?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    if !status.is_success() {
        error!("File host rejected {}: {} {}", path, status, body);
        return Err(transport_error(status.as_u16(), &body));
    }

    extract_download_url(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_hint_is_lowercased_collapsed_and_trimmed() {
        assert_eq!(sanitize_owner_hint("Alice Wong"), "alice-wong");
        assert_eq!(sanitize_owner_hint("  --Bob!! Tan--  "), "bob-tan");
        assert_eq!(sanitize_owner_hint("Ezra/O'Neil (CG)"), "ezra-o-neil-cg");
    }

    #[test]
    fn empty_owner_hint_falls_back_to_guest() {
        assert_eq!(sanitize_owner_hint(""), "guest");
        assert_eq!(sanitize_owner_hint("!!!"), "guest");
    }

    #[test]
    fn filename_keeps_safe_chars_and_underscores_the_rest() {
        assert_eq!(sanitize_filename("proof (1).PNG"), "proof__1_.PNG");
        assert_eq!(sanitize_filename("bca-transfer.jpg"), "bca-transfer.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename(""), "proof");
    }

    #[test]
    fn storage_path_combines_all_three_parts() {
        assert_eq!(
            storage_path(1765506337420, Some("Alice Wong"), "proof 1.png"),
            "uploads/1765506337420-alice-wong-proof_1.png"
        );
        assert_eq!(
            storage_path(7, None, "x.pdf"),
            "uploads/7-guest-x.pdf"
        );
    }

    #[test]
    fn host_422_maps_to_a_transport_error_with_a_bounded_snippet() {
        let long_body = "x".repeat(5000);
        let err = transport_error(422, &long_body);
        match err {
            UploadError::Transport { status, snippet } => {
                assert_eq!(status, 422);
                assert_eq!(snippet.len(), 200);
            }
            other => panic!("expected Transport, got {:?}", other),
        }
        assert!(transport_error(422, "short")
            .to_string()
            .contains("422 short"));
    }

    #[test]
    fn snippet_truncation_respects_char_boundaries() {
        // 199 ASCII bytes followed by a multi-byte char straddling the cut.
        let body = format!("{}é and more", "x".repeat(199));
        let err = transport_error(500, &body);
        if let UploadError::Transport { snippet, .. } = err {
            assert_eq!(snippet, "x".repeat(199));
        } else {
            panic!("expected Transport");
        }
    }

    #[test]
    fn download_url_is_extracted_from_the_contents_response() {
        let body = r#"{"content":{"name":"p.png","download_url":"https://raw.example.com/u/p.png"}}"#;
        assert_eq!(
            extract_download_url(body).unwrap(),
            "https://raw.example.com/u/p.png"
        );
    }

    #[test]
    fn missing_download_url_is_never_a_silent_success() {
        for body in [
            r#"{"content":{"name":"p.png"}}"#,
            r#"{"content":null}"#,
            r#"{}"#,
            "not json",
        ] {
            assert!(matches!(
                extract_download_url(body),
                Err(UploadError::MissingLink)
            ));
        }
    }
}
