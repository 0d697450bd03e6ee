#![doc(test(attr(deny(warnings))))]

//! Cashflow Dashboard renders per-account cashflow projections and portfolio
//! roll-ups computed by `cashflow-core` for the command line.

pub mod cli;
pub mod errors;
pub mod format;
pub mod utils;

pub use cashflow_config as config;
pub use cashflow_core as engine;
pub use cashflow_domain as domain;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Cashflow dashboard tracing initialized.");
    });
}
