use nanoid::nanoid;
use serde::Deserialize;
use serde::Serialize;

/// Response header carrying the id of the user that just logged in.
/// Header names are case insensitive, it goes over the wire as `userId`.
pub const USER_ID_HEADER: &'static str = "userid";
pub const BEARER_PREFIX: &'static str = "Bearer ";

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Default for LoginRequest {
    fn default() -> Self {
        Self {
            email: format!("{}@example.com", nanoid!(10, &nanoid::alphabet::SAFE[2..])),
            password: nanoid!(),
        }
    }
}

/// Body of a successful `POST /auth/login`. The access token itself travels
/// in the `Authorization` header.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct LoginResponse {
    pub id: String,
    pub data: LoginData,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub refresh_token: String,
    /// Expiration of the access token, unix seconds.
    pub expires_at: u64,
}

/// Partial update of a user. Absent fields are left alone.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_image: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}
