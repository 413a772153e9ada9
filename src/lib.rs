//! Best-effort JSON settings persistence for desktop application shells.
//!
//! A [`SettingsStore`] serializes a settings value to a pretty-printed JSON
//! file in a per-user application-data directory and reads it back, in
//! blocking and async variants. Payloads are validated before every write;
//! a missing file on load is the normal "no data yet" case, not an error.

pub mod paths;
pub mod store;
pub mod validate;

pub use store::{SettingsStore, StoreError, StoreOptions};
pub use validate::Validator;
