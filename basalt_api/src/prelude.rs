pub use crate::API_URL;
pub use crate::BasaltApi;
pub use crate::db::*;
pub use crate::flow::AccountApi;
pub use crate::flow::SignUpError;
pub use crate::flow::sign_up;
pub use crate::http::types::*;
pub use crate::session::*;
pub use crate::timestamp;
pub use crate::validate::*;
