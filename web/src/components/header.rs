use dioxus::prelude::*;

use super::SignUpModal;
use crate::Route;
use crate::stores::SESSION_STORE;
use crate::stores::clear_session;

#[component]
pub fn Header() -> Element {
    rsx! {
        div {
            style: "margin: 4px; padding: 4px; display: flex; flex-direction: row; justify-content: space-between; border-bottom: 1px solid black;",
            div {
                Link {
                    style: "text-decoration: none; color: inherit;",
                    to: Route::HomeView,
                    h3 {
                        "Basalt"
                    }
                }
            },
            div {
                style: "display: flex; flex-direction: column; align-items: flex-end;",
                if let Some(session) = SESSION_STORE.read().as_ref() {
                    div {
                        style: "margin-bottom: 8px;",
                        "Signed in as {session.user_id}"
                    }
                    button {
                        style: "flex: 1; padding: 12px; background-color: #007bff; color: white; border: none; border-radius: 4px; font-size: 16px; cursor: pointer; transition: background-color 0.2s;",
                        onclick: move |_| clear_session(),
                        "Logout"
                    }
                } else {
                    SignUpModal {}
                }
            }
        }
    }
}
