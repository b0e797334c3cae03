#![doc(test(attr(deny(warnings))))]

//! spendbook is a personal expense tracking engine: a typed expense and
//! recurring-template model, an idempotent recurrence projector, an
//! in-memory store with persistence side effects, and pure time-windowed
//! analytics with budget tracking. Presentation layers and the
//! natural-language insight collaborator sit outside this crate and talk to
//! it through plain data.

pub mod analytics;
pub mod assist;
pub mod book;
pub mod config;
pub mod currency;
pub mod errors;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("spendbook tracing initialized.");
    });
}
