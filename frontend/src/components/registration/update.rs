//! Update function for the registration form component.
//!
//! Elm-style: receives the current state, the component context, and a
//! `Msg`, mutates the state, and returns whether the view must re-render.
//!
//! Key behaviors
//! - The membership toggle goes through `apply_membership`, which clears a
//!   stale group selection the moment the guest answers "no".
//! - File selection bumps `upload_generation` before spawning the upload;
//!   a completion whose generation no longer matches is ignored, so the
//!   latest selection always wins.
//! - Submit validates with the shared schema first; field errors block the
//!   submission without any network call. On sink success the whole form
//!   resets; on sink failure the typed state stays for a manual retry.

use common::validation::{validated, FieldErrors};
use gloo_console::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::helpers::show_toast;
use super::messages::Msg;
use super::sink::{self, ACTIVE_SINK};
use super::state::{ProofState, RegistrationForm};

pub fn update(form: &mut RegistrationForm, ctx: &Context<RegistrationForm>, msg: Msg) -> bool {
    match msg {
        Msg::SetName(value) => {
            form.name = value;
            true
        }
        Msg::SetPhone(value) => {
            form.phone = value;
            true
        }
        Msg::SetEmail(value) => {
            form.email = value;
            true
        }
        Msg::SetMembership(joined) => {
            form.apply_membership(joined);
            true
        }
        Msg::SetGroup(group) => {
            form.connect_group = Some(group);
            true
        }
        Msg::SetFoodItem(value) => {
            form.food_item = value;
            true
        }
        Msg::SetDrinkItem(value) => {
            form.drink_item = value;
            true
        }
        Msg::SetBringingGift(value) => {
            form.bringing_gift = value;
            true
        }

        Msg::FileSelected(file) => {
            form.upload_generation += 1;
            let generation = form.upload_generation;

            let Some(file) = file else {
                form.proof = ProofState::None;
                return true;
            };

            form.proof = ProofState::Uploading { generation };
            let name_hint = form.name.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = sink::upload_proof(file, name_hint).await;
                link.send_message(Msg::UploadFinished { generation, result });
            });
            true
        }

        Msg::UploadFinished { generation, result } => {
            // A newer selection superseded this upload while it was in
            // flight; its outcome must not touch the form.
            if generation != form.upload_generation {
                return false;
            }
            match result {
                Ok(reference) => {
                    form.proof = ProofState::Ready { reference };
                    show_toast("Proof uploaded and attached to your registration.");
                }
                Err(message) => {
                    error!("Proof upload failed:", message.clone());
                    form.proof = ProofState::Failed {
                        message: message.clone(),
                    };
                    show_toast(&message);
                }
            }
            true
        }

        Msg::Submit => {
            if form.submitting {
                return false;
            }
            if form.uploading() {
                show_toast("Please wait for the proof upload to finish.");
                return false;
            }

            if form.has_joined_cg.is_none() {
                let mut errors = FieldErrors::default();
                errors.push("hasJoinedCG", "Please pick an option.");
                form.errors = errors;
                return true;
            }

            match validated(form.to_input(), ACTIVE_SINK.policy()) {
                Ok(input) => {
                    form.errors = FieldErrors::default();
                    form.submitting = true;
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let result = sink::submit(ACTIVE_SINK, &input).await;
                        link.send_message(Msg::SubmitFinished(result));
                    });
                    true
                }
                Err(errors) => {
                    form.errors = errors;
                    true
                }
            }
        }

        Msg::SubmitFinished(result) => {
            form.submitting = false;
            match result {
                Ok(()) => {
                    form.reset();
                    show_toast("Submitted! See you at the dinner.");
                }
                Err(message) => {
                    error!("Submission failed:", message.clone());
                    show_toast(&message);
                }
            }
            true
        }
    }
}
