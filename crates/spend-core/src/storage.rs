use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use crate::{CoreError, CoreResult};

/// Storage key holding the JSON array of spending records.
pub const RECORDS_KEY: &str = "spendingData";
/// Storage key holding the JSON array of user-defined category names.
pub const CUSTOM_CATEGORIES_KEY: &str = "customCategories";

/// Synchronous string key-value store the record store persists through.
pub trait StoragePort {
    /// Returns the value stored under `key`, or `None` when nothing was written yet.
    fn read(&self, key: &str) -> CoreResult<Option<String>>;

    /// Replaces the value stored under `key`.
    fn write(&mut self, key: &str, value: &str) -> CoreResult<()>;
}

impl<S: StoragePort + ?Sized> StoragePort for Box<S> {
    fn read(&self, key: &str) -> CoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> CoreResult<()> {
        (**self).write(key, value)
    }
}

/// In-process storage. Clones share the same entries, so a test can keep a
/// handle while a store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
    fail_reads: Rc<Cell<bool>>,
    rejected_keys: Rc<RefCell<BTreeSet<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing any write failure switch.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Makes every subsequent write fail, mimicking revoked storage access.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Makes writes to `key` alone fail.
    pub fn reject_writes_to(&self, key: &str) {
        self.rejected_keys.borrow_mut().insert(key.to_string());
    }

    /// Makes every read fail, mimicking an unreadable backend.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self, key: &str) -> CoreResult<Option<String>> {
        if self.fail_reads.get() {
            return Err(CoreError::Storage(format!("read of `{key}` rejected")));
        }
        Ok(self.raw(key))
    }

    fn write(&mut self, key: &str, value: &str) -> CoreResult<()> {
        if self.fail_writes.get() || self.rejected_keys.borrow().contains(key) {
            return Err(CoreError::Storage(format!("write to `{key}` rejected")));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
