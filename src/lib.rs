#![doc(test(attr(deny(warnings))))]

//! Fintrack Core provides the transaction, installment, and recurrence
//! primitives behind a personal finance tracker, together with the keyed
//! JSON persistence and reporting services built on top of them.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod notify;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("fintrack_core=info".parse().unwrap());
        fmt().with_env_filter(filter).init();
        tracing::info!("Fintrack Core tracing initialized.");
    });
}
