use std::time::Duration;

use anyhow::Result;
use dioxus::prelude::*;
use gloo_storage::SessionStorage;
use gloo_storage::Storage;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

use basalt_api::prelude::*;

/// The login remembered in `sessionStorage`, if any. Read once when the page
/// loads, which is why a successful sign-up reloads the page.
pub static SESSION_STORE: GlobalSignal<Option<StoredSession>> = Signal::global(load_session);

#[derive(Clone, Debug, PartialEq)]
pub struct StoredSession {
    pub user_id: String,
    pub token: String,
}

fn load_session() -> Option<StoredSession> {
    let storage = SessionStorage::raw();
    let user_id = storage.get_item(SESSION_USER_ID).ok().flatten()?;
    let token = storage.get_item(SESSION_ACCESS_TOKEN).ok().flatten()?;
    Some(StoredSession { user_id, token })
}

/// Forget the current login: session storage items and both cookies.
pub fn clear_session() {
    SessionStorage::delete(SESSION_USER_ID);
    SessionStorage::delete(SESSION_ACCESS_TOKEN);
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let expired = SessionCookie {
            name,
            value: String::new(),
            max_age: Some(Duration::ZERO),
        };
        if let Err(e) = BrowserSession.set_cookie(&expired) {
            log::error!("failed to expire cookie {name}: {e}");
        }
    }
    *SESSION_STORE.write() = None;
}

fn html_document() -> Result<HtmlDocument> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(anyhow::anyhow!("no document available"))?;
    document
        .dyn_into::<HtmlDocument>()
        .map_err(|_| anyhow::anyhow!("document is not an html document"))
}

fn cookie_string(cookie: &SessionCookie) -> String {
    let value = String::from(js_sys::encode_uri_component(&cookie.value));
    match cookie.max_age {
        Some(max_age) => format!(
            "{}={value}; max-age={}; path=/",
            cookie.name,
            max_age.as_secs()
        ),
        None => format!("{}={value}; path=/", cookie.name),
    }
}

/// `SessionStore` backed by `document.cookie` and `sessionStorage`.
pub struct BrowserSession;

impl SessionStore for BrowserSession {
    fn set_cookie(&mut self, cookie: &SessionCookie) -> Result<()> {
        html_document()?
            .set_cookie(&cookie_string(cookie))
            .map_err(|e| anyhow::anyhow!("failed to write cookie {}: {e:?}", cookie.name))
    }

    fn set_session_item(&mut self, key: &str, value: &str) -> Result<()> {
        // raw so the value is stored as is, not as a json string
        SessionStorage::raw()
            .set_item(key, value)
            .map_err(|e| anyhow::anyhow!("failed to write session item {key}: {e:?}"))
    }

    fn schedule_reload(&mut self, delay: Duration) {
        spawn(async move {
            TimeoutFuture::new(delay.as_millis() as u32).await;
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().reload() {
                    log::error!("reload failed: {e:?}");
                }
            }
        });
    }
}
