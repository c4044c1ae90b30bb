mod user;

pub use user::*;

#[cfg(feature = "server")]
pub mod tables {
    use super::*;

    use redb::TableDefinition;

    type NanoId<'a> = &'a str;
    // user_id keyed to user document
    pub const USER_TABLE: TableDefinition<NanoId, UserModel> = TableDefinition::new("users");
    // email keyed to user_id, keeps emails unique
    pub const EMAIL_USER_ID_TABLE: TableDefinition<&str, NanoId> =
        TableDefinition::new("email_user_id");
    // access token keyed to (user_id, expiration timestamp)
    pub const ACCESS_TOKEN_TABLE: TableDefinition<NanoId, (NanoId, u64)> =
        TableDefinition::new("access_tokens");
    // refresh token keyed to (user_id, expiration timestamp)
    pub const REFRESH_TOKEN_TABLE: TableDefinition<NanoId, (NanoId, u64)> =
        TableDefinition::new("refresh_tokens");
}

#[cfg(feature = "server")]
pub use tables::*;
