//! Port for the synchronous key-value store that mirrors the session.
//!
//! The browser build of this app used `localStorage`; here any adapter that
//! can get, set and remove string values will do. Calls are synchronous so the
//! session can be restored before the first screen renders.

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-value storage adapters.
    pub enum StorageError {
        /// Reading a value failed.
        Read {
            /// Storage key involved.
            key: String,
            /// Underlying error text.
            message: String,
        } => "storage read failed for {key}: {message}",
        /// Writing a value failed.
        Write {
            /// Storage key involved.
            key: String,
            /// Underlying error text.
            message: String,
        } => "storage write failed for {key}: {message}",
        /// Removing a value failed.
        Remove {
            /// Storage key involved.
            key: String,
            /// Underlying error text.
            message: String,
        } => "storage remove failed for {key}: {message}",
        /// The backing store could not be opened.
        Unavailable {
            /// Underlying error text.
            message: String,
        } => "storage unavailable: {message}",
    }
}

/// String key-value storage shared by the whole client.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
