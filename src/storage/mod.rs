mod codec;
mod file_store;
mod memory;

pub use codec::{decode_notes, encode_notes};
pub use file_store::FileStorage;
pub use memory::MemoryStorage;

use crate::error::Result;

/// Key under which the note collection is stored by default.
pub const DEFAULT_KEY: &str = "notes";

/// A key -> UTF-8 text blob backend. Every write replaces the whole value.
pub trait Storage {
    /// Read the value stored under `key`, `None` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
