//! Shared registration validation.
//!
//! Both the form frontend and the backend API validate submissions with the
//! code in this module, so a client-side bypass cannot push an invalid row
//! into the table. Two policies exist because the two deployment variants
//! genuinely disagree:
//!
//! - [`Policy::Strict`] is the relational API: names need two characters,
//!   proof of payment is mandatory, and a joined guest with no group is a
//!   field error, never a silent default.
//! - [`Policy::Relaxed`] is the external form-collection variant: a phone
//!   number is required, proof is optional, and a joined guest with no
//!   group defaults to the first Connect Group in the list.
//!
//! `normalize` applies the sentinel rule in both policies: whenever
//! `hasJoinedCG` is false, any stale group selection is overwritten with
//! [`NO_GROUP`] so a "not joined" answer can never travel with a group name.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::proof::ProofReference;
use crate::model::registration::{RegistrationInput, CONNECT_GROUPS, NO_GROUP};

/// Which deployment's rules to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Strict,
    Relaxed,
}

/// Wire names of the validated fields, used as error keys.
pub mod fields {
    pub const NAME: &str = "name";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const CONNECT_GROUP: &str = "connectGroup";
    pub const TRANSFER_PROOF: &str = "transferProof";
}

/// A single user-correctable problem with one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors for one submission attempt, in form order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// One human-readable line covering every failed field.
    pub fn message(&self) -> String {
        self.0
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

fn is_known_group(name: &str) -> bool {
    CONNECT_GROUPS.contains(&name)
}

/// Trims text fields and applies the group derivation rules for `policy`.
///
/// This is the pure counterpart of the form's toggle handling: it is run
/// before every validation pass, so stale selections can never survive a
/// membership change.
pub fn normalize(input: &mut RegistrationInput, policy: Policy) {
    input.name = input.name.trim().to_string();
    input.phone = input.phone.trim().to_string();
    input.email = input.email.trim().to_string();
    input.transfer_proof = input.transfer_proof.trim().to_string();

    if input.has_joined_cg {
        let unset = input
            .connect_group
            .as_deref()
            .map(|g| g.trim().is_empty() || g == NO_GROUP)
            .unwrap_or(true);
        if unset {
            input.connect_group = match policy {
                Policy::Strict => None,
                Policy::Relaxed => Some(CONNECT_GROUPS[0].to_string()),
            };
        }
    } else {
        input.connect_group = Some(NO_GROUP.to_string());
    }
}

/// Validates an already-normalized input against `policy`.
pub fn validate(input: &RegistrationInput, policy: Policy) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    match policy {
        Policy::Strict => {
            if input.name.chars().count() < 2 {
                errors.push(fields::NAME, "Name must be at least 2 characters.");
            }
        }
        Policy::Relaxed => {
            if input.name.is_empty() {
                errors.push(fields::NAME, "Please tell us your name.");
            }
            if input.phone.is_empty() {
                errors.push(fields::PHONE, "Phone number is required.");
            }
        }
    }

    let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    if !email_re.is_match(&input.email) {
        errors.push(fields::EMAIL, "Please enter a valid email address.");
    }

    if input.has_joined_cg {
        match input.connect_group.as_deref() {
            Some(group) if is_known_group(group) => {}
            Some(_) => errors.push(fields::CONNECT_GROUP, "Unknown Connect Group."),
            None => errors.push(fields::CONNECT_GROUP, "Please select your Connect Group."),
        }
    } else if input.connect_group.as_deref() != Some(NO_GROUP) {
        // normalize() always sets the sentinel; seeing anything else means
        // the caller skipped it.
        errors.push(fields::CONNECT_GROUP, "Please select your Connect Group.");
    }

    let proof_required = policy == Policy::Strict;
    if input.transfer_proof.is_empty() {
        if proof_required {
            errors.push(fields::TRANSFER_PROOF, "Please upload transfer proof.");
        }
    } else if ProofReference::parse(&input.transfer_proof).is_err() {
        errors.push(fields::TRANSFER_PROOF, "Transfer proof link is not usable.");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Normalizes and validates in one step, returning the canonical input that
/// is safe to hand to a sink.
pub fn validated(
    mut input: RegistrationInput,
    policy: Policy,
) -> Result<RegistrationInput, FieldErrors> {
    normalize(&mut input, policy);
    validate(&input, policy)?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> RegistrationInput {
        RegistrationInput {
            name: "Alice".to_string(),
            phone: "0812000111".to_string(),
            email: "alice@x.com".to_string(),
            has_joined_cg: true,
            connect_group: Some("CG Samuel".to_string()),
            transfer_proof: "https://host/uploads/1-alice-proof.png".to_string(),
            ..RegistrationInput::default()
        }
    }

    #[test]
    fn valid_strict_input_passes_unchanged() {
        let out = validated(alice(), Policy::Strict).unwrap();
        assert_eq!(out.connect_group.as_deref(), Some("CG Samuel"));
    }

    #[test]
    fn not_joined_always_stores_the_sentinel() {
        // Stale selection left over from before the toggle flipped.
        let mut input = alice();
        input.has_joined_cg = false;
        input.connect_group = Some("CG Ezra".to_string());

        for policy in [Policy::Strict, Policy::Relaxed] {
            let out = validated(input.clone(), policy).unwrap();
            assert_eq!(out.connect_group.as_deref(), Some(NO_GROUP));
        }
    }

    #[test]
    fn joined_without_group_errors_under_strict() {
        let mut input = alice();
        input.connect_group = None;

        let errors = validated(input, Policy::Strict).unwrap_err();
        assert!(errors.for_field(fields::CONNECT_GROUP).is_some());
    }

    #[test]
    fn joined_without_group_defaults_under_relaxed() {
        let mut input = alice();
        input.connect_group = None;

        let out = validated(input, Policy::Relaxed).unwrap();
        assert_eq!(out.connect_group.as_deref(), Some(CONNECT_GROUPS[0]));
    }

    #[test]
    fn unknown_group_is_rejected() {
        let mut input = alice();
        input.connect_group = Some("CG Nobody".to_string());

        let errors = validated(input, Policy::Strict).unwrap_err();
        assert_eq!(
            errors.for_field(fields::CONNECT_GROUP),
            Some("Unknown Connect Group.")
        );
    }

    #[test]
    fn bad_email_names_the_email_field() {
        let mut input = alice();
        input.email = "not-an-email".to_string();

        let errors = validated(input, Policy::Strict).unwrap_err();
        assert!(errors.for_field(fields::EMAIL).is_some());
        assert_eq!(errors.0.len(), 1);
    }

    #[test]
    fn short_name_fails_strict_but_passes_relaxed() {
        let mut input = alice();
        input.name = "A".to_string();

        assert!(validated(input.clone(), Policy::Strict).is_err());
        assert!(validated(input, Policy::Relaxed).is_ok());
    }

    #[test]
    fn missing_proof_required_only_under_strict() {
        let mut input = alice();
        input.transfer_proof = String::new();

        let errors = validated(input.clone(), Policy::Strict).unwrap_err();
        assert!(errors.for_field(fields::TRANSFER_PROOF).is_some());
        assert!(validated(input, Policy::Relaxed).is_ok());
    }

    #[test]
    fn garbage_proof_is_rejected_even_when_optional() {
        let mut input = alice();
        input.transfer_proof = "javascript:alert(1)".to_string();

        assert!(validated(input.clone(), Policy::Strict).is_err());
        assert!(validated(input, Policy::Relaxed).is_err());
    }

    #[test]
    fn relaxed_requires_a_phone_number() {
        let mut input = alice();
        input.phone = String::new();

        let errors = validated(input.clone(), Policy::Relaxed).unwrap_err();
        assert_eq!(errors.for_field(fields::PHONE), Some("Phone number is required."));
        assert!(validated(input, Policy::Strict).is_ok());
    }

    #[test]
    fn message_joins_every_field_error() {
        let input = RegistrationInput {
            has_joined_cg: true,
            ..RegistrationInput::default()
        };
        let errors = validated(input, Policy::Strict).unwrap_err();
        let message = errors.message();
        assert!(message.contains("Name must be at least 2 characters."));
        assert!(message.contains("valid email address"));
    }
}
