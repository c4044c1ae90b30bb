use axum::http::StatusCode;
use axum::response::IntoResponse;

use basalt_api::prelude::ValidationError;

#[derive(Clone, Debug)]
pub struct BasaltError {
    message: Option<String>,
    status_code: StatusCode,
}

impl BasaltError {
    fn new(message: &str, status_code: StatusCode) -> Self {
        Self {
            message: Some(message.to_string()),
            status_code,
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED)
    }

    pub fn forbidden(message: &str) -> Self {
        Self::new(message, StatusCode::FORBIDDEN)
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(message, StatusCode::NOT_FOUND)
    }

    pub fn conflict(message: &str) -> Self {
        Self::new(message, StatusCode::CONFLICT)
    }
}

macro_rules! impl_error_from {
    ($error_type:ty) => {
        impl From<$error_type> for BasaltError {
            fn from(value: $error_type) -> Self {
                Self {
                    message: Some(value.to_string()),
                    status_code: StatusCode::INTERNAL_SERVER_ERROR,
                }
            }
        }
    };
}

impl_error_from!(redb::StorageError);
impl_error_from!(redb::TransactionError);
impl_error_from!(redb::TableError);
impl_error_from!(redb::CommitError);
impl_error_from!(bcrypt::BcryptError);

impl From<ValidationError> for BasaltError {
    fn from(value: ValidationError) -> Self {
        Self::bad_request(&value.to_string())
    }
}

impl From<anyhow::Error> for BasaltError {
    fn from(value: anyhow::Error) -> Self {
        Self {
            message: Some(value.to_string()),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BasaltError {
    fn into_response(self) -> axum::response::Response {
        if self.status_code.is_server_error() {
            log::error!("{}: {:?}", self.status_code, self.message);
        }
        (
            self.status_code,
            self.message
                .unwrap_or("Unknown error ocurred in Basalt system".to_string()),
        )
            .into_response()
    }
}
