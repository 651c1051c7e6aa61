//! spend-domain
//!
//! Pure domain models (SpendingRecord, categories, granularities, date windows).
//! No I/O, no CLI, no storage. Only data types and core enums.

pub mod category;
pub mod common;
pub mod record;

pub use category::*;
pub use common::*;
pub use record::*;
