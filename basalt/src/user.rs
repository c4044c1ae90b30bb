use axum::extract::Json;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::Json as ResponseJson;
use bcrypt::hash;
use nanoid::nanoid;
use redb::ReadableTable;

use basalt_api::prelude::*;

use super::BasaltError;
use super::BasaltState;
use super::auth::authorize;

pub async fn create_user(
    State(state): State<BasaltState>,
    Json(mut payload): Json<SignUpInput>,
) -> Result<(StatusCode, ResponseJson<UserModelSafe>), BasaltError> {
    payload.validate()?;
    payload.email = normalize_email(&payload.email);

    let password_hash = hash(&payload.password, state.bcrypt_cost)?;
    let write = state.db.begin_write()?;
    let mut email_table = write.open_table(EMAIL_USER_ID_TABLE)?;

    if let Some(_) = email_table.get(payload.email.as_str())? {
        return Err(BasaltError::conflict("email is already registered"));
    }

    let now = timestamp();
    let user = UserModel {
        id: nanoid!(),
        roles: Role::for_email(&payload.email, state.admin_email.as_deref()),
        name: payload.name,
        email: payload.email,
        user_image: DEFAULT_USER_IMAGE.to_string(),
        status: UserStatus::Active,
        created_at: now,
        modified_at: now,
        password_hash,
    };

    {
        let mut user_table = write.open_table(USER_TABLE)?;
        email_table.insert(user.email.as_str(), user.id.as_str())?;
        user_table.insert(user.id.as_str(), user.clone())?;
        drop(email_table);
    }
    write.commit()?;
    log::info!("created user {}", user.id);

    Ok((StatusCode::CREATED, ResponseJson(user.into())))
}

pub async fn list_users(
    State(state): State<BasaltState>,
) -> Result<ResponseJson<Vec<UserModelSafe>>, BasaltError> {
    let read = state.db.begin_read()?;
    let user_table = read.open_table(USER_TABLE)?;
    let mut users = vec![];
    for entry in user_table.iter()? {
        let (_id, user) = entry?;
        users.push(UserModelSafe::from(user.value()));
    }
    Ok(ResponseJson(users))
}

pub async fn get_user(
    State(state): State<BasaltState>,
    Path(user_id): Path<String>,
) -> Result<ResponseJson<UserModelSafe>, BasaltError> {
    let read = state.db.begin_read()?;
    let user_table = read.open_table(USER_TABLE)?;
    match user_table.get(user_id.as_str())? {
        Some(user) => Ok(ResponseJson(user.value().into())),
        None => Err(BasaltError::not_found("user not found")),
    }
}

/// Users may change themselves, admins may change anyone.
fn check_access(actor: &UserModel, user_id: &str) -> Result<(), BasaltError> {
    if actor.id == user_id || actor.is_admin() {
        Ok(())
    } else {
        Err(BasaltError::forbidden("not allowed to modify this user"))
    }
}

pub async fn patch_user(
    State(state): State<BasaltState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
    Json(payload): Json<UserPatch>,
) -> Result<ResponseJson<UserModelSafe>, BasaltError> {
    let actor = authorize(&state, &headers)?;
    check_access(&actor, &user_id)?;

    if let Some(name) = &payload.name {
        validate_name(name)?;
    }
    if payload.user_image.as_ref().is_some_and(|image| image.is_empty()) {
        return Err(BasaltError::bad_request("user image cannot be empty"));
    }
    let password_hash = match &payload.password {
        Some(password) => {
            validate_password(password)?;
            Some(hash(password, state.bcrypt_cost)?)
        }
        None => None,
    };

    let write = state.db.begin_write()?;
    let user = {
        let mut user_table = write.open_table(USER_TABLE)?;
        let mut user = match user_table.get(user_id.as_str())?.map(|v| v.value()) {
            Some(user) => user,
            None => return Err(BasaltError::not_found("user not found")),
        };
        if let Some(name) = payload.name {
            user.name = name;
        }
        if let Some(user_image) = payload.user_image {
            user.user_image = user_image;
        }
        if let Some(password_hash) = password_hash {
            user.password_hash = password_hash;
        }
        user.modified_at = timestamp();
        user_table.insert(user.id.as_str(), user.clone())?;
        user
    };
    write.commit()?;

    Ok(ResponseJson(user.into()))
}

pub async fn delete_user(
    State(state): State<BasaltState>,
    Path(user_id): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, BasaltError> {
    let actor = authorize(&state, &headers)?;
    check_access(&actor, &user_id)?;

    let write = state.db.begin_write()?;
    {
        let mut user_table = write.open_table(USER_TABLE)?;
        let mut email_table = write.open_table(EMAIL_USER_ID_TABLE)?;
        let mut access_table = write.open_table(ACCESS_TOKEN_TABLE)?;
        let mut refresh_table = write.open_table(REFRESH_TOKEN_TABLE)?;

        let user = match user_table.remove(user_id.as_str())?.map(|v| v.value()) {
            Some(user) => user,
            None => return Err(BasaltError::not_found("user not found")),
        };
        email_table.remove(user.email.as_str())?;
        // sessions die with the account
        access_table.retain(|_token, (owner, _expires_at)| owner != user.id.as_str())?;
        refresh_table.retain(|_token, (owner, _expires_at)| owner != user.id.as_str())?;
    }
    write.commit()?;
    log::info!("deleted user {user_id}");

    Ok(StatusCode::NO_CONTENT)
}
