//! spend-core
//!
//! Record store and aggregation logic for the spending tracker.
//! Depends on spend-domain. No CLI, no terminal I/O; persistence goes through
//! the [`StoragePort`] trait.

pub mod aggregation;
pub mod error;
pub mod record_store;
pub mod storage;
pub mod time;

pub use aggregation::*;
pub use error::{CoreError, CoreResult, RecordField};
pub use record_store::*;
pub use storage::{MemoryStorage, StoragePort, CUSTOM_CATEGORIES_KEY, RECORDS_KEY};
pub use time::{Clock, FixedClock, SystemClock};
