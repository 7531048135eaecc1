//! Local storage - the device-local key-value table.
//!
//! Plays the role browser local storage plays for the web frontend: string
//! keys mapped to opaque payloads, written through synchronously.

use crate::define_simple_storage;

define_simple_storage! {
    /// Device-local key-value storage with byte-level API.
    pub struct LocalStorage { table: "local_storage" }
}
