mod header;
mod signup_modal;

pub use header::Header;
pub use signup_modal::SignUpModal;
