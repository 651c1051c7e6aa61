#![doc(test(attr(deny(warnings))))]

//! Spend Tracker records individual spending entries and turns them into
//! per-period dashboard summaries, behind an interactive or scripted shell.

pub mod cli;
pub mod errors;
pub mod session;
pub mod utils;

pub use errors::TrackerError;
pub use session::Session;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spend Tracker tracing initialized.");
    });
}
