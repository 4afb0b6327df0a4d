//! View rendering for the registration form.
//!
//! One column of labelled inputs mirroring the paper form: contact details,
//! the membership question with its dependent group selector, food/drink
//! contributions, the gift question, and the proof-of-payment picker. Field
//! errors from the last submit attempt render under their inputs.

use common::model::registration::CONNECT_GROUPS;
use common::validation::fields;
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::{ProofState, RegistrationForm};

pub fn view(form: &RegistrationForm, ctx: &Context<RegistrationForm>) -> Html {
    let link = ctx.link();

    html! {
        <form class="registration-form" onsubmit={link.callback(|e: SubmitEvent| {
            e.prevent_default();
            Msg::Submit
        })}>
            { text_field(form, link, "Name", "Your full name", fields::NAME, form.name.clone(), Msg::SetName) }
            { text_field(form, link, "Phone Number", "WhatsApp number", fields::PHONE, form.phone.clone(), Msg::SetPhone) }
            { text_field(form, link, "Email", "you@example.com", fields::EMAIL, form.email.clone(), Msg::SetEmail) }

            { membership_field(form, link) }
            { if form.group_selector_visible() { group_field(form, link) } else { html! {} } }

            { textarea_field(link, "Food", "Food you plan to bring (e.g., AYAM SERUNDENG - 45000)", form.food_item.clone(), Msg::SetFoodItem) }
            { textarea_field(link, "Drinks", "Drinks you plan to bring (e.g., LEMON TEA - 20000)", form.drink_item.clone(), Msg::SetDrinkItem) }

            { gift_field(form, link) }
            { proof_field(form, link) }

            <button type="submit" class="submit-btn" disabled={form.submitting}>
                { if form.submitting { "Sending..." } else { "Register for Christmas Dinner" } }
            </button>
        </form>
    }
}

fn error_line(form: &RegistrationForm, field: &str) -> Html {
    match form.errors.for_field(field) {
        Some(message) => html! { <p class="field-error">{ message }</p> },
        None => html! {},
    }
}

fn text_field(
    form: &RegistrationForm,
    link: &Scope<RegistrationForm>,
    label: &'static str,
    placeholder: &'static str,
    field: &'static str,
    value: String,
    make_msg: fn(String) -> Msg,
) -> Html {
    let oninput = link.callback(move |e: InputEvent| {
        make_msg(e.target_unchecked_into::<HtmlInputElement>().value())
    });
    html! {
        <div class="form-field">
            <label>{ label }</label>
            <input type="text" {placeholder} {value} {oninput} />
            { error_line(form, field) }
        </div>
    }
}

fn textarea_field(
    link: &Scope<RegistrationForm>,
    label: &'static str,
    placeholder: &'static str,
    value: String,
    make_msg: fn(String) -> Msg,
) -> Html {
    let oninput = link.callback(move |e: InputEvent| {
        make_msg(e.target_unchecked_into::<HtmlTextAreaElement>().value())
    });
    html! {
        <div class="form-field">
            <label>{ label }</label>
            <textarea {placeholder} {value} {oninput} />
        </div>
    }
}

fn membership_field(form: &RegistrationForm, link: &Scope<RegistrationForm>) -> Html {
    html! {
        <div class="form-field">
            <label>{"Have you already joined CG? *"}</label>
            <div class="radio-row">
                <label>
                    <input type="radio" name="join-cg"
                        checked={form.has_joined_cg == Some(true)}
                        onchange={link.callback(|_| Msg::SetMembership(true))} />
                    {"Yes"}
                </label>
                <label>
                    <input type="radio" name="join-cg"
                        checked={form.has_joined_cg == Some(false)}
                        onchange={link.callback(|_| Msg::SetMembership(false))} />
                    {"Not yet"}
                </label>
            </div>
            { error_line(form, "hasJoinedCG") }
        </div>
    }
}

fn group_field(form: &RegistrationForm, link: &Scope<RegistrationForm>) -> Html {
    let onchange = link.callback(|e: Event| {
        Msg::SetGroup(e.target_unchecked_into::<HtmlSelectElement>().value())
    });
    html! {
        <div class="form-field">
            <label>{"From CG"}</label>
            <select {onchange}>
                { for CONNECT_GROUPS.iter().map(|option| {
                    let selected = form.connect_group.as_deref() == Some(*option);
                    html! { <option value={*option} {selected}>{ option }</option> }
                }) }
            </select>
            { error_line(form, fields::CONNECT_GROUP) }
        </div>
    }
}

fn gift_field(form: &RegistrationForm, link: &Scope<RegistrationForm>) -> Html {
    html! {
        <div class="form-field">
            <label>{"Will you bring a gift?"}</label>
            <div class="radio-row">
                <label>
                    <input type="radio" name="bring-gift"
                        checked={form.bringing_gift}
                        onchange={link.callback(|_| Msg::SetBringingGift(true))} />
                    {"Yes, I will bring one"}
                </label>
                <label>
                    <input type="radio" name="bring-gift"
                        checked={!form.bringing_gift}
                        onchange={link.callback(|_| Msg::SetBringingGift(false))} />
                    {"Not bringing a gift"}
                </label>
            </div>
        </div>
    }
}

fn proof_field(form: &RegistrationForm, link: &Scope<RegistrationForm>) -> Html {
    let onchange = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::FileSelected(input.files().and_then(|files| files.get(0)))
    });

    let status = match &form.proof {
        ProofState::None => "We will attach the upload link to your registration.".to_string(),
        ProofState::Uploading { .. } => "Uploading...".to_string(),
        ProofState::Ready { .. } => "Uploaded and ready to submit.".to_string(),
        ProofState::Failed { message } => message.clone(),
    };

    html! {
        <div class="form-field">
            <label>{"Transfer Proof (Felicia Clara BCA : 123123)"}</label>
            <input type="file" accept="image/*,application/pdf" {onchange} />
            <p class="field-hint">{ status }</p>
            {
                if let ProofState::Ready { reference } = &form.proof {
                    if reference.starts_with("http") {
                        html! {
                            <div class="proof-preview">
                                <img src={reference.clone()} alt="Uploaded proof" />
                            </div>
                        }
                    } else {
                        html! {}
                    }
                } else {
                    html! {}
                }
            }
            { error_line(form, fields::TRANSFER_PROOF) }
        </div>
    }
}
