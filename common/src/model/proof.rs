//! Proof-of-payment references.
//!
//! A proof reference is stored as a single text column but is only ever one
//! of two shapes: an inline `data:` URL carrying the base64-encoded file, or
//! a plain http(s) URL pointing at the hosted copy. `ProofReference::parse`
//! is the single place that enforces this, so a half-uploaded or otherwise
//! malformed value can never reach the table.

use std::fmt;

/// A validated proof-of-payment reference.
#[derive(Debug, Clone, PartialEq)]
pub enum ProofReference {
    /// Self-contained base64 payload, e.g. `data:image/png;base64,iVBOR...`.
    Inline { mime: String, data: String },
    /// Publicly resolvable download URL on the file host.
    Hosted(String),
}

/// Why a raw string was rejected as a proof reference.
#[derive(Debug, Clone, PartialEq)]
pub enum ProofReferenceError {
    Empty,
    /// A `data:` URL without a `;base64,` payload section.
    NotBase64,
    /// Base64 payload missing or containing characters outside the alphabet.
    BadPayload,
    /// Neither a `data:` URL nor an http(s) URL.
    UnknownScheme,
}

impl fmt::Display for ProofReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofReferenceError::Empty => write!(f, "proof reference is empty"),
            ProofReferenceError::NotBase64 => {
                write!(f, "inline proof must be a base64 data URL")
            }
            ProofReferenceError::BadPayload => {
                write!(f, "inline proof payload is not valid base64")
            }
            ProofReferenceError::UnknownScheme => {
                write!(f, "proof reference must be a data URL or an http(s) URL")
            }
        }
    }
}

impl std::error::Error for ProofReferenceError {}

fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='
}

impl ProofReference {
    /// Parses a raw stored/submitted string into a reference, rejecting
    /// anything that is not exactly one of the two allowed shapes.
    pub fn parse(raw: &str) -> Result<ProofReference, ProofReferenceError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ProofReferenceError::Empty);
        }

        if let Some(rest) = raw.strip_prefix("data:") {
            let Some((mime, data)) = rest.split_once(";base64,") else {
                return Err(ProofReferenceError::NotBase64);
            };
            if data.is_empty() || !data.chars().all(is_base64_char) {
                return Err(ProofReferenceError::BadPayload);
            }
            return Ok(ProofReference::Inline {
                mime: mime.to_string(),
                data: data.to_string(),
            });
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Ok(ProofReference::Hosted(raw.to_string()));
        }

        Err(ProofReferenceError::UnknownScheme)
    }

    /// Builds an inline reference from an already base64-encoded payload.
    pub fn inline(mime: &str, base64_payload: &str) -> ProofReference {
        ProofReference::Inline {
            mime: mime.to_string(),
            data: base64_payload.to_string(),
        }
    }
}

impl fmt::Display for ProofReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofReference::Inline { mime, data } => {
                write!(f, "data:{};base64,{}", mime, data)
            }
            ProofReference::Hosted(url) => write!(f, "{}", url),
        }
    }
}
