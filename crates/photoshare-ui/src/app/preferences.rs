//! Session persistence in local storage.

use crate::core::auth::Session;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;

pub(crate) const SESSION_KEY: &str = "photoshare.session";

pub(crate) fn load_session() -> Option<Session> {
    match LocalStorage::get::<Session>(SESSION_KEY) {
        Ok(session) => Some(session),
        Err(gloo::storage::errors::StorageError::KeyNotFound(_)) => None,
        Err(err) => {
            log_storage_error("get", SESSION_KEY, &err.to_string());
            delete_storage(SESSION_KEY);
            None
        }
    }
}

pub(crate) fn persist_session(session: &Session) {
    set_storage(SESSION_KEY, session);
}

pub(crate) fn clear_session() {
    delete_storage(SESSION_KEY);
}

fn set_storage<T: Serialize>(key: &'static str, value: T) {
    if let Err(err) = LocalStorage::set(key, value) {
        log_storage_error("set", key, &err.to_string());
    }
}

fn delete_storage(key: &'static str) {
    LocalStorage::delete(key);
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
