use dioxus::prelude::*;

use basalt_api::prelude::*;

use crate::stores::BrowserSession;

const INPUT_STYLE: &str = "width: 100%; padding: 10px 5px; border: none; border-bottom: 1px solid #ddd; border-radius: 0; background-color: transparent; font-size: 16px;";

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            log::error!("alert failed: {e:?}");
        }
    }
}

#[component]
pub fn SignUpModal() -> Element {
    let mut is_open = use_signal(|| false);
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut is_loading = use_signal(|| false);

    let handle_signup = move |_| {
        let input = SignUpInput {
            name: name.read().clone(),
            email: email.read().clone(),
            password: password.read().clone(),
        };

        spawn(async move {
            is_loading.set(true);

            let api = BasaltApi::default();
            match sign_up(&api, &mut BrowserSession, &input).await {
                Ok(session) => log::info!("signed up as {}, reloading", session.id),
                Err(SignUpError::Invalid(e)) => alert(&e.to_string()),
                // login failures are logged by the flow, nothing is shown
                Err(e) => log::warn!("sign up did not complete: {e}"),
            }

            is_loading.set(false);
        });
    };

    rsx! {
        button {
            r#type: "button",
            style: "padding: 8px 16px; background-color: transparent; color: #0c7b93; border: 1px solid #0c7b93; border-radius: 4px; font-size: 16px; cursor: pointer;",
            onclick: move |_| is_open.set(true),
            "Sign Up"
        }
        if is_open() {
            div {
                style: "position: fixed; inset: 0; display: flex; align-items: center; justify-content: center; background-color: rgba(0, 0, 0, 0.5);",
                div {
                    style: "padding: 40px; width: 400px; border-radius: 8px; background-color: #0c7b93; font-family: Arial, sans-serif;",

                    div {
                        style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 30px;",
                        h1 {
                            style: "margin: 0; color: black;",
                            "Sign Up"
                        }
                        button {
                            r#type: "button",
                            aria_label: "Close",
                            style: "border: none; background: none; font-size: 20px; cursor: pointer;",
                            onclick: move |_| is_open.set(false),
                            "×"
                        }
                    }

                    div {
                        style: "margin-bottom: 20px;",
                        input {
                            r#type: "text",
                            id: "name",
                            value: "{name}",
                            oninput: move |e| name.set(e.value()),
                            style: INPUT_STYLE,
                            placeholder: "Enter your name"
                        }
                    }
                    div {
                        style: "margin-bottom: 20px;",
                        input {
                            r#type: "email",
                            id: "email",
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                            style: INPUT_STYLE,
                            placeholder: "Enter your email"
                        }
                    }
                    div {
                        style: "margin-bottom: 30px;",
                        input {
                            r#type: "password",
                            id: "password",
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                            style: INPUT_STYLE,
                            placeholder: "Enter your password"
                        }
                    }

                    div {
                        style: "display: flex; justify-content: flex-end; gap: 10px;",
                        button {
                            r#type: "button",
                            style: "padding: 12px; background-color: #6c757d; color: white; border: none; border-radius: 4px; font-size: 16px; cursor: pointer;",
                            onclick: move |_| is_open.set(false),
                            "Cancel"
                        }
                        button {
                            r#type: "submit",
                            onclick: handle_signup,
                            disabled: is_loading(),
                            style: "padding: 12px; background-color: rgba(20, 40, 80, 1); color: white; border: none; border-radius: 4px; font-size: 16px; cursor: pointer;",
                            style: if is_loading() { "opacity: 0.6; cursor: not-allowed;" } else { "" },
                            "Sign Up"
                        }
                    }
                }
            }
        }
    }
}
