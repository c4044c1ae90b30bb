use dioxus::prelude::*;

use basalt_api::prelude::*;

use crate::components::Header;
use crate::stores::SESSION_STORE;

#[component]
pub fn HomeView() -> Element {
    let mut user = use_signal(|| None::<UserModelSafe>);
    let mut status = use_signal(|| None::<String>);

    // Fetch the signed in user on mount
    use_effect(move || {
        let Some(session) = SESSION_STORE.cloned() else {
            user.set(None);
            return;
        };
        spawn(async move {
            let api = BasaltApi::default();
            match api.get_user(&session.user_id).await {
                Ok(loaded) => {
                    status.set(None);
                    user.set(Some(loaded));
                }
                Err(e) => status.set(Some(format!("Failed to load profile: {e}"))),
            }
        });
    });

    rsx! {
        Header {}
        div {
            style: "padding: 40px; max-width: 400px; margin: 0 auto; font-family: Arial, sans-serif;",

            h1 {
                style: "text-align: center; margin-bottom: 30px; color: #333;",
                if let Some(user) = user.read().as_ref() {
                    "Welcome back, {user.name}"
                } else {
                    "Welcome to Basalt"
                }
            }

            if let Some(message) = status.read().as_ref() {
                div {
                    style: "padding: 10px; border-radius: 4px; text-align: center; font-weight: bold; background-color: #f8d7da; color: #721c24; border: 1px solid #f5c6cb;",
                    "{message}"
                }
            }
        }
    }
}
