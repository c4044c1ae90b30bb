use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;

pub const ACCESS_TOKEN_COOKIE: &'static str = "accessToken";
pub const REFRESH_TOKEN_COOKIE: &'static str = "refreshToken";
pub const SESSION_ACCESS_TOKEN: &'static str = "access_Token";
pub const SESSION_USER_ID: &'static str = "user_Id";

/// Lifetime of an access token, and of the cookie that holds it.
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(40 * 60);
pub const REFRESH_TOKEN_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);
/// How long the page waits after a successful login before reloading.
pub const RELOAD_DELAY: Duration = Duration::from_secs(2);

/// Identifiers handed out by a successful login.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionToken {
    pub id: String,
    /// Raw value of the `Authorization` response header.
    pub token: String,
    pub refresh_token: String,
}

/// JSON value of the `accessToken` cookie.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AccessCookie {
    pub id: String,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SessionCookie {
    pub name: &'static str,
    /// Unencoded value, the store is responsible for escaping it.
    pub value: String,
    /// `None` makes a session cookie.
    pub max_age: Option<Duration>,
}

impl SessionToken {
    pub fn cookies(&self) -> Result<Vec<SessionCookie>> {
        let access = serde_json::to_string(&AccessCookie {
            id: self.id.clone(),
            token: self.token.clone(),
        })?;
        Ok(vec![
            SessionCookie {
                name: ACCESS_TOKEN_COOKIE,
                value: access,
                max_age: Some(ACCESS_TOKEN_TTL),
            },
            SessionCookie {
                name: REFRESH_TOKEN_COOKIE,
                value: self.refresh_token.clone(),
                max_age: None,
            },
        ])
    }
}

/// Somewhere a login can be remembered. In the browser this is
/// `document.cookie` plus `sessionStorage`.
pub trait SessionStore {
    fn set_cookie(&mut self, cookie: &SessionCookie) -> Result<()>;

    fn set_session_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn schedule_reload(&mut self, delay: Duration);

    fn persist(&mut self, session: &SessionToken) -> Result<()> {
        for cookie in session.cookies()? {
            self.set_cookie(&cookie)?;
        }
        self.set_session_item(SESSION_ACCESS_TOKEN, &session.token)?;
        self.set_session_item(SESSION_USER_ID, &session.id)?;
        Ok(())
    }
}
