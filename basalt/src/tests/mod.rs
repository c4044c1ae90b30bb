use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use nanoid::nanoid;
use tempfile::TempDir;

use basalt_api::prelude::*;

use super::BasaltState;
use super::build_server;
use super::create_tables;

pub const ADMIN_EMAIL: &str = "admin@basalt.dev";
// bcrypt's minimum, keeps the suite fast
const TEST_BCRYPT_COST: u32 = 4;

pub struct BasaltTestState {
    pub url: String,
    pub api: BasaltApi,
    pub state: BasaltState,
    _tmpdir: TempDir,
}

impl BasaltTestState {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;

        let db_path = temp_dir.path().join(format!("{}.db", nanoid!()));
        let db = Arc::new(redb::Database::create(&db_path)?);

        println!("creating tables");
        create_tables(db.clone())?;

        let state = BasaltState {
            db,
            admin_email: Some(ADMIN_EMAIL.to_string()),
            bcrypt_cost: TEST_BCRYPT_COST,
        };
        println!("building server");
        let app = build_server(state.clone());

        println!("starting TcpListener");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?.to_string();
        println!("spawning server thread");
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        println!("waiting");
        tokio::time::sleep(Duration::from_millis(500)).await;

        let url = format!("http://{}", addr);
        Ok(Self {
            api: BasaltApi::new(url.clone())?,
            url,
            state,
            _tmpdir: temp_dir,
        })
    }

    /// Sign-up input that passes validation, with a unique email.
    pub fn random_input() -> SignUpInput {
        let alphanumeric = &nanoid::alphabet::SAFE[2..];
        SignUpInput {
            name: "Tester".to_string(),
            email: format!("{}@basalt.dev", nanoid!(12, alphanumeric)),
            password: format!("pw{}", nanoid!(8, &alphanumeric[..10])),
        }
    }

    /// Create a user, random unless `input` is given. Returns the user and
    /// the input used to create it.
    pub async fn signup(&self, input: Option<SignUpInput>) -> Result<(UserModelSafe, SignUpInput)> {
        let input = input.unwrap_or_else(Self::random_input);
        let user = self.api.create_user(&input).await?;
        Ok((user, input))
    }

    pub async fn login(&self, input: &SignUpInput) -> Result<SessionToken> {
        self.api
            .login(&LoginRequest {
                email: input.email.clone(),
                password: input.password.clone(),
            })
            .await
    }
}

/// In memory `SessionStore` that remembers every write.
#[derive(Default)]
pub struct RecordingStore {
    pub cookies: Vec<SessionCookie>,
    pub items: Vec<(String, String)>,
    pub reloads: Vec<Duration>,
}

impl RecordingStore {
    pub fn cookie(&self, name: &str) -> Option<&SessionCookie> {
        self.cookies.iter().find(|cookie| cookie.name == name)
    }

    pub fn item(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
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
