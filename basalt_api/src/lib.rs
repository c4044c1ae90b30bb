pub mod db;
pub mod flow;
pub mod http;
pub mod prelude;
pub mod session;
pub mod validate;

pub use http::BasaltApi;

#[cfg(debug_assertions)]
const DEFAULT_API_URL: &'static str = "http://127.0.0.1:3000";
#[cfg(not(debug_assertions))]
const DEFAULT_API_URL: &'static str = "https://api.basalt.app";

/// Base url of the account server. `BASALT_API_URL` at build time wins
/// over the debug/release default.
pub const API_URL: &'static str = match option_env!("BASALT_API_URL") {
    Some(url) => url,
    None => DEFAULT_API_URL,
};

/// Seconds since the unix epoch. Not available on wasm32, server side only.
pub fn timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs()
}
