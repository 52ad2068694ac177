//! Persistence of the identity provider's session token.

use gloo::storage::{LocalStorage, Storage};

const TOKEN_KEY: &str = "todo.session_token";

pub fn stored_token() -> Option<String> {
    LocalStorage::get::<String>(TOKEN_KEY)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

pub fn store_token(token: &str) {
    if let Err(e) = LocalStorage::set(TOKEN_KEY, token) {
        tracing::error!("Failed to store session token: {:?}", e);
    }
}

pub fn clear_token() {
    LocalStorage::delete(TOKEN_KEY);
}
