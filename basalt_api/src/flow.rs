use anyhow::Result;

use crate::BasaltApi;
use crate::db::UserModelSafe;
use crate::http::types::LoginRequest;
use crate::session::RELOAD_DELAY;
use crate::session::SessionStore;
use crate::session::SessionToken;
use crate::validate::SignUpInput;
use crate::validate::ValidationError;

/// The two requests a sign-up needs.
#[allow(async_fn_in_trait)]
pub trait AccountApi {
    async fn create_user(&self, input: &SignUpInput) -> Result<UserModelSafe>;

    async fn login(&self, request: &LoginRequest) -> Result<SessionToken>;
}

impl AccountApi for BasaltApi {
    async fn create_user(&self, input: &SignUpInput) -> Result<UserModelSafe> {
        BasaltApi::create_user(self, input).await
    }

    async fn login(&self, request: &LoginRequest) -> Result<SessionToken> {
        BasaltApi::login(self, request).await
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SignUpError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("account creation failed: {0}")]
    Create(anyhow::Error),
    #[error("login failed: {0}")]
    Login(anyhow::Error),
    #[error("failed to store session: {0}")]
    Persist(anyhow::Error),
}

/// Validate the form, create the account, then log in with the same
/// credentials and remember the session.
///
/// The login is only attempted after the account was created. A page
/// reload is scheduled only after the session was stored.
pub async fn sign_up<A, S>(
    api: &A,
    store: &mut S,
    input: &SignUpInput,
) -> Result<SessionToken, SignUpError>
where
    A: AccountApi,
    S: SessionStore,
{
    input.validate()?;

    match api.create_user(input).await {
        Ok(user) => log::info!("created user {}", user.id),
        Err(e) => {
            log::warn!("create user failed: {e}");
            return Err(SignUpError::Create(e));
        }
    }

    let request = LoginRequest {
        email: input.email.clone(),
        password: input.password.clone(),
    };
    let session = match api.login(&request).await {
        Ok(session) => session,
        Err(e) => {
            log::error!("login after sign up failed: {e}");
            return Err(SignUpError::Login(e));
        }
    };

    store.persist(&session).map_err(SignUpError::Persist)?;
    store.schedule_reload(RELOAD_DELAY);
    Ok(session)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use super::*;
    use crate::db::Role;
    use crate::db::UserStatus;
    use crate::session::*;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        CreateUser(SignUpInput),
        Login(String, String),
    }

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<Call>>,
        fail_create: bool,
        fail_login: bool,
    }

    impl AccountApi for FakeApi {
        async fn create_user(&self, input: &SignUpInput) -> Result<UserModelSafe> {
            self.calls.borrow_mut().push(Call::CreateUser(input.clone()));
            if self.fail_create {
                anyhow::bail!("email is already registered");
            }
            Ok(UserModelSafe {
                id: "user-1".to_string(),
                name: input.name.clone(),
                email: input.email.clone(),
                user_image: "basic".to_string(),
                status: UserStatus::Active,
                roles: vec![Role::User],
                created_at: 0,
                modified_at: 0,
            })
        }

        async fn login(&self, request: &LoginRequest) -> Result<SessionToken> {
            self.calls.borrow_mut().push(Call::Login(
                request.email.clone(),
                request.password.clone(),
            ));
            if self.fail_login {
                anyhow::bail!("invalid email or password");
            }
            Ok(SessionToken {
                id: "user-1".to_string(),
                token: "Bearer access".to_string(),
                refresh_token: "refresh".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        cookies: Vec<SessionCookie>,
        items: Vec<(String, String)>,
        reloads: Vec<Duration>,
    }

    impl SessionStore for RecordingStore {
        fn set_cookie(&mut self, cookie: &SessionCookie) -> Result<()> {
            self.cookies.push(cookie.clone());
            Ok(())
        }

        fn set_session_item(&mut self, key: &str, value: &str) -> Result<()> {
            self.items.push((key.to_string(), value.to_string()));
            Ok(())
        }

        fn schedule_reload(&mut self, delay: Duration) {
            self.reloads.push(delay);
        }
    }

    fn valid_input() -> SignUpInput {
        SignUpInput {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hunter22".to_string(),
        }
    }

    #[tokio::test]
    async fn invalid_input_makes_no_requests() {
        let api = FakeApi::default();
        let mut store = RecordingStore::default();
        let inputs = [
            SignUpInput {
                name: "A".to_string(),
                ..valid_input()
            },
            SignUpInput {
                name: "Alice1".to_string(),
                ..valid_input()
            },
            SignUpInput {
                email: "alice@".to_string(),
                ..valid_input()
            },
            SignUpInput {
                password: "password".to_string(),
                ..valid_input()
            },
        ];
        for input in inputs {
            let e = sign_up(&api, &mut store, &input).await.unwrap_err();
            assert!(matches!(e, SignUpError::Invalid(_)));
        }
        assert!(api.calls.borrow().is_empty());
        assert!(store.cookies.is_empty());
        assert!(store.reloads.is_empty());
    }

    #[tokio::test]
    async fn creates_then_logs_in_then_persists() -> Result<()> {
        let api = FakeApi::default();
        let mut store = RecordingStore::default();

        let session = sign_up(&api, &mut store, &valid_input()).await?;
        assert_eq!(session.id, "user-1");

        assert_eq!(
            *api.calls.borrow(),
            vec![
                Call::CreateUser(valid_input()),
                Call::Login("alice@example.com".to_string(), "hunter22".to_string()),
            ]
        );
        let names = store.cookies.iter().map(|c| c.name).collect::<Vec<_>>();
        assert_eq!(names, vec![ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE]);
        assert!(store.items.contains(&(SESSION_USER_ID.to_string(), "user-1".to_string())));
        assert_eq!(store.reloads, vec![RELOAD_DELAY]);
        Ok(())
    }

    #[tokio::test]
    async fn failed_create_skips_login() {
        let api = FakeApi {
            fail_create: true,
            ..Default::default()
        };
        let mut store = RecordingStore::default();

        let e = sign_up(&api, &mut store, &valid_input()).await.unwrap_err();
        assert!(matches!(e, SignUpError::Create(_)));
        assert_eq!(*api.calls.borrow(), vec![Call::CreateUser(valid_input())]);
        assert!(store.cookies.is_empty());
        assert!(store.items.is_empty());
        assert!(store.reloads.is_empty());
    }

    #[tokio::test]
    async fn failed_login_stores_nothing() {
        let api = FakeApi {
            fail_login: true,
            ..Default::default()
        };
        let mut store = RecordingStore::default();

        let e = sign_up(&api, &mut store, &valid_input()).await.unwrap_err();
        assert!(matches!(e, SignUpError::Login(_)));
        assert_eq!(api.calls.borrow().len(), 2);
        assert!(store.cookies.is_empty());
        assert!(store.items.is_empty());
        assert!(store.reloads.is_empty());
    }
}
