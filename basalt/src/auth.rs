use axum::extract::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::header::AUTHORIZATION;
use axum::response::Json as ResponseJson;
use nanoid::nanoid;

use basalt_api::prelude::*;

use super::BasaltError;
use super::BasaltState;

fn header_value(value: &str) -> Result<HeaderValue, BasaltError> {
    HeaderValue::from_str(value).map_err(|e| BasaltError::from(anyhow::anyhow!(e)))
}

pub async fn login(
    State(state): State<BasaltState>,
    Json(payload): Json<LoginRequest>,
) -> Result<(HeaderMap, ResponseJson<LoginResponse>), BasaltError> {
    let user = {
        let read = state.db.begin_read()?;
        let email_table = read.open_table(EMAIL_USER_ID_TABLE)?;
        let user_table = read.open_table(USER_TABLE)?;

        let user_id = match email_table.get(normalize_email(&payload.email).as_str())? {
            Some(id) => id.value().to_string(),
            None => return Err(BasaltError::unauthorized("invalid email or password")),
        };

        match user_table.get(user_id.as_str())? {
            Some(user) => user.value(),
            None => {
                return Err(anyhow::anyhow!(
                    "email registered without user document. This is an internal error"
                )
                .into());
            }
        }
    };

    if !bcrypt::verify(payload.password, &user.password_hash)? {
        return Err(BasaltError::unauthorized("invalid email or password"));
    }

    let access_token = nanoid!();
    let refresh_token = nanoid!();
    let now = timestamp();
    let expires_at = now + ACCESS_TOKEN_TTL.as_secs();
    let refresh_expires_at = now + REFRESH_TOKEN_TTL.as_secs();

    let write = state.db.begin_write()?;
    {
        let mut access_table = write.open_table(ACCESS_TOKEN_TABLE)?;
        let mut refresh_table = write.open_table(REFRESH_TOKEN_TABLE)?;
        // drop expired sessions while we hold the write lock
        access_table.retain(|_token, (_user_id, expires_at)| expires_at >= now)?;
        refresh_table.retain(|_token, (_user_id, expires_at)| expires_at >= now)?;
        access_table.insert(access_token.as_str(), (user.id.as_str(), expires_at))?;
        refresh_table.insert(
            refresh_token.as_str(),
            (user.id.as_str(), refresh_expires_at),
        )?;
    }
    write.commit()?;
    log::info!("user {} logged in", user.id);

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        header_value(&format!("{BEARER_PREFIX}{access_token}"))?,
    );
    headers.insert(USER_ID_HEADER, header_value(&user.id)?);

    Ok((
        headers,
        ResponseJson(LoginResponse {
            id: user.id,
            data: LoginData {
                refresh_token,
                expires_at,
            },
        }),
    ))
}

/// Resolve the `Authorization` header of a request to the user it belongs to.
pub fn authorize(state: &BasaltState, headers: &HeaderMap) -> Result<UserModel, BasaltError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(BasaltError::unauthorized("missing authorization"))?;
    let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token);

    let read = state.db.begin_read()?;
    let access_table = read.open_table(ACCESS_TOKEN_TABLE)?;
    let user_table = read.open_table(USER_TABLE)?;
    let user_id = if let Some(entry) = access_table.get(token)? {
        let (user_id, expires_at) = entry.value();
        if timestamp() > expires_at {
            return Err(BasaltError::unauthorized("Expired token!"));
        }
        user_id.to_string()
    } else {
        return Err(BasaltError::unauthorized("Invalid token!"));
    };
    match user_table.get(user_id.as_str())? {
        Some(user) => Ok(user.value()),
        None => Err(BasaltError::unauthorized("Invalid token!")),
    }
}
