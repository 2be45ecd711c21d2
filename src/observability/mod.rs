//! Logging setup.
//!
//! Library code only emits `tracing` events; the binary decides where they
//! go by calling [`init_tracing`] once at startup.

mod tracing;

pub use self::tracing::{filter_directive, init_tracing};
