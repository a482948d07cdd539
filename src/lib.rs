#![doc(test(attr(deny(warnings))))]

//! Property Core offers the domain records, persistence plumbing, and the
//! schema-driven entry wizard that power property-management workflows and
//! CLIs.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod i18n;
pub mod identity;
pub mod storage;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Property Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
