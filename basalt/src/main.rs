use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::http::HeaderName;
use axum::http::header::AUTHORIZATION;
use axum::routing::get;
use axum::routing::post;
use redb::Database;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use basalt_api::prelude::*;

mod auth;
mod config;
mod error;
#[cfg(test)]
mod tests;
mod user;

use config::Config;
use error::BasaltError;

#[derive(Clone)]
pub struct BasaltState {
    pub db: Arc<Database>,
    pub admin_email: Option<String>,
    pub bcrypt_cost: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()?;
    log::info!("opening database at {}", config.db_path.display());
    let db = Arc::new(Database::create(&config.db_path)?);
    create_tables(db.clone())?;

    let app = build_server(BasaltState {
        db,
        admin_email: config.admin_email.clone(),
        bcrypt_cost: config.bcrypt_cost,
    });
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    log::info!("Listening on port {}", config.port);
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_server(state: BasaltState) -> Router {
    // the browser only lets the client read headers that are exposed
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([AUTHORIZATION, HeaderName::from_static(USER_ID_HEADER)]);

    Router::new()
        .route("/user", post(user::create_user).get(user::list_users))
        .route(
            "/user/{id}",
            get(user::get_user)
                .patch(user::patch_user)
                .delete(user::delete_user),
        )
        .route("/auth/login", post(auth::login))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Make sure every table exists so read transactions can open them.
pub fn create_tables(db: Arc<Database>) -> Result<()> {
    let write = db.begin_write()?;
    {
        write.open_table(USER_TABLE)?;
        write.open_table(EMAIL_USER_ID_TABLE)?;
        write.open_table(ACCESS_TOKEN_TABLE)?;
        write.open_table(REFRESH_TOKEN_TABLE)?;
    }
    write.commit()?;
    Ok(())
}
