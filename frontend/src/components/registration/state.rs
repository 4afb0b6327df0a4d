//! Form state for the registration component.
//!
//! Everything the guest has typed lives here, together with the proof upload
//! state machine. The membership/group dependency is a pure transition
//! (`apply_membership`), not something event handlers poke at directly, so a
//! stale group selection can never survive flipping the membership answer.

use common::model::registration::{RegistrationInput, CONNECT_GROUPS};
use common::validation::FieldErrors;

/// Where the proof-of-payment upload currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum ProofState {
    /// No file selected (or the selection was cleared).
    None,
    /// An upload is in flight. Completions carrying any other generation
    /// are stale and get dropped.
    Uploading { generation: u64 },
    /// The adapter returned a usable reference.
    Ready { reference: String },
    Failed { message: String },
}

pub struct RegistrationForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// `None` until the guest answers; submission requires an explicit
    /// yes or no, there is no implicit default.
    pub has_joined_cg: Option<bool>,
    pub connect_group: Option<String>,
    pub food_item: String,
    pub drink_item: String,
    pub bringing_gift: bool,
    pub proof: ProofState,
    /// Bumped on every file selection; latest selection wins.
    pub upload_generation: u64,
    pub errors: FieldErrors,
    pub submitting: bool,
}

impl RegistrationForm {
    pub fn new() -> Self {
        RegistrationForm {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            has_joined_cg: None,
            connect_group: None,
            food_item: String::new(),
            drink_item: String::new(),
            bringing_gift: true,
            proof: ProofState::None,
            upload_generation: 0,
            errors: FieldErrors::default(),
            submitting: false,
        }
    }

    /// Back to a blank form after a successful submission. The upload
    /// generation is deliberately kept so an in-flight upload from before
    /// the reset can never land in the fresh form.
    pub fn reset(&mut self) {
        let generation = self.upload_generation;
        *self = RegistrationForm::new();
        self.upload_generation = generation;
    }

    /// The single transition for the membership answer:
    /// - answering "no" clears any previously chosen group;
    /// - answering "yes" with nothing chosen preselects the first group
    ///   (the guest can still change it before submitting).
    pub fn apply_membership(&mut self, joined: bool) {
        self.has_joined_cg = Some(joined);
        if joined {
            if self.connect_group.is_none() {
                self.connect_group = Some(CONNECT_GROUPS[0].to_string());
            }
        } else {
            self.connect_group = None;
        }
    }

    pub fn group_selector_visible(&self) -> bool {
        self.has_joined_cg == Some(true)
    }

    pub fn uploading(&self) -> bool {
        matches!(self.proof, ProofState::Uploading { .. })
    }

    /// Assembles the submission payload from the current state. Group
    /// normalization (sentinel vs. selection) happens in shared validation.
    pub fn to_input(&self) -> RegistrationInput {
        RegistrationInput {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            has_joined_cg: self.has_joined_cg.unwrap_or(false),
            connect_group: self.connect_group.clone(),
            food_item: self.food_item.clone(),
            drink_item: self.drink_item.clone(),
            bringing_gift: self.bringing_gift,
            transfer_proof: match &self.proof {
                ProofState::Ready { reference } => reference.clone(),
                _ => String::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::registration::NO_GROUP;
    use common::validation::{validated, Policy};

    #[test]
    fn toggling_membership_off_clears_the_group() {
        let mut form = RegistrationForm::new();
        form.apply_membership(true);
        form.connect_group = Some("CG Ezra".to_string());

        form.apply_membership(false);
        assert_eq!(form.connect_group, None);
        assert!(!form.group_selector_visible());
    }

    #[test]
    fn answering_yes_with_no_selection_preselects_the_first_group() {
        let mut form = RegistrationForm::new();
        form.apply_membership(true);
        assert_eq!(form.connect_group.as_deref(), Some(CONNECT_GROUPS[0]));
    }

    #[test]
    fn answering_yes_keeps_an_existing_selection() {
        let mut form = RegistrationForm::new();
        form.connect_group = Some("CG Sherline".to_string());
        form.apply_membership(true);
        assert_eq!(form.connect_group.as_deref(), Some("CG Sherline"));
    }

    #[test]
    fn not_joined_submits_the_sentinel_after_normalization() {
        let mut form = RegistrationForm::new();
        form.name = "Alice".to_string();
        form.phone = "0812".to_string();
        form.email = "alice@x.com".to_string();
        form.apply_membership(true);
        form.apply_membership(false);

        let input = validated(form.to_input(), Policy::Relaxed).unwrap();
        assert_eq!(input.connect_group.as_deref(), Some(NO_GROUP));
    }

    #[test]
    fn reset_clears_fields_but_keeps_the_upload_generation() {
        let mut form = RegistrationForm::new();
        form.name = "Alice".to_string();
        form.upload_generation = 4;
        form.proof = ProofState::Ready {
            reference: "https://host/p.png".to_string(),
        };

        form.reset();
        assert!(form.name.is_empty());
        assert_eq!(form.proof, ProofState::None);
        assert_eq!(form.upload_generation, 4);
    }

    #[test]
    fn pending_upload_is_not_submitted_as_a_reference() {
        let mut form = RegistrationForm::new();
        form.proof = ProofState::Uploading { generation: 1 };
        assert!(form.to_input().transfer_proof.is_empty());
        assert!(form.uploading());
    }
}
