//! Signup page view: account details, password confirmation and visibility toggles.

use std::time::Duration;

use api::{SignupForm, SIGNUP_SUCCESS_MESSAGE};
use dioxus::prelude::*;
use ui::icons::{FaEye, FaEyeSlash};
use ui::{sleep, use_auth, AuthState, Icon};

use crate::Route;

#[component]
fn PasswordField(
    placeholder: String,
    value: String,
    on_input: EventHandler<FormEvent>,
) -> Element {
    let mut visible = use_signal(|| false);
    let (input_type, toggle_label) = if visible() {
        ("text", "Hide password")
    } else {
        ("password", "Show password")
    };

    rsx! {
        div {
            class: "password-field",
            input {
                class: "form-input",
                r#type: input_type,
                placeholder: "{placeholder}",
                required: true,
                value: "{value}",
                oninput: move |evt| on_input.call(evt),
            }
            button {
                class: "password-toggle",
                r#type: "button",
                aria_label: toggle_label,
                onclick: move |_| visible.toggle(),
                if visible() {
                    Icon { icon: FaEyeSlash, width: 16, height: 16 }
                } else {
                    Icon { icon: FaEye, width: 16, height: 16 }
                }
            }
        }
    }
}

/// Signup page component.
#[component]
pub fn Signup() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut form = use_signal(SignupForm::default);
    let mut error = use_signal(|| Option::<String>::None);
    let mut success = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_signup = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);
            success.set(None);

            let submitted = form();
            if let Err(e) = submitted.validate() {
                error.set(Some(e.to_string()));
                return;
            }

            loading.set(true);
            match api::sign_up(submitted).await {
                Ok(outcome) => {
                    if outcome.signed_in {
                        auth.set(AuthState::signed_in(outcome.user));
                    }
                    success.set(Some(SIGNUP_SUCCESS_MESSAGE.to_string()));
                    sleep(Duration::from_secs(1)).await;
                    nav.push(Route::Home {});
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-page",

            h1 { class: "auth-title", "Create your account" }

            form {
                onsubmit: handle_signup,
                class: "auth-form",

                input {
                    class: "form-input",
                    r#type: "text",
                    placeholder: "Full name",
                    required: true,
                    value: form().name,
                    oninput: move |evt: FormEvent| form.write().name = evt.value(),
                }

                input {
                    class: "form-input",
                    r#type: "tel",
                    placeholder: "Phone",
                    required: true,
                    value: form().phone,
                    oninput: move |evt: FormEvent| form.write().phone = evt.value(),
                }

                input {
                    class: "form-input",
                    r#type: "email",
                    placeholder: "Email",
                    required: true,
                    value: form().email,
                    oninput: move |evt: FormEvent| form.write().email = evt.value(),
                }

                PasswordField {
                    placeholder: "Password",
                    value: form().password,
                    on_input: move |evt: FormEvent| form.write().password = evt.value(),
                }

                PasswordField {
                    placeholder: "Confirm password",
                    value: form().confirm_password,
                    on_input: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                }

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }
                if let Some(msg) = success() {
                    div { class: "form-success", "{msg}" }
                }

                button {
                    class: "form-submit",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing up..." } else { "Sign Up" }
                }
            }

            p {
                class: "auth-switch",
                "Already have an account? "
                Link { to: Route::Login {}, "Login" }
            }
        }
    }
}
