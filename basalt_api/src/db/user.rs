use serde::Deserialize;
use serde::Serialize;

/// Image assigned to accounts that have not uploaded one.
pub const DEFAULT_USER_IMAGE: &'static str = "basic";

/// Emails are stored and looked up lowercased, so `Alice@x.com` and
/// `alice@x.com` are the same account.
pub fn normalize_email(email: &str) -> String {
    email.to_ascii_lowercase()
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Every account gets `User`, the configured admin email also gets `Admin`.
    pub fn for_email(email: &str, admin_email: Option<&str>) -> Vec<Role> {
        if admin_email.is_some_and(|admin| normalize_email(admin) == normalize_email(email)) {
            vec![Role::Admin, Role::User]
        } else {
            vec![Role::User]
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct UserModel {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_image: String,
    pub status: UserStatus,
    pub roles: Vec<Role>,
    pub created_at: u64,
    pub modified_at: u64,

    pub password_hash: String,
}

impl UserModel {
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[cfg(feature = "server")]
impl redb::Value for UserModel {
    type SelfType<'a> = UserModel;
    type AsBytes<'a> = Vec<u8>;

    fn fixed_width() -> Option<usize> {
        None // Variable width due to strings
    }

    fn from_bytes<'a>(data: &'a [u8]) -> Self::SelfType<'a>
    where
        Self: 'a,
    {
        bincode::deserialize(data).expect("Failed to deserialize User")
    }

    fn as_bytes<'a, 'b: 'a>(value: &'a Self::SelfType<'b>) -> Self::AsBytes<'a> {
        bincode::serialize(value).expect("Failed to serialize User")
    }

    fn type_name() -> redb::TypeName {
        redb::TypeName::new("User")
    }
}

/// A user without the password hash, safe to send over the wire.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct UserModelSafe {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_image: String,
    pub status: UserStatus,
    pub roles: Vec<Role>,
    pub created_at: u64,
    pub modified_at: u64,
}

impl From<UserModel> for UserModelSafe {
    fn from(
        UserModel {
            id,
            name,
            email,
            user_image,
            status,
            roles,
            created_at,
            modified_at,
            password_hash: _,
        }: UserModel,
    ) -> Self {
        UserModelSafe {
            id,
            name,
            email,
            user_image,
            status,
            roles,
            created_at,
            modified_at,
        }
    }
}
