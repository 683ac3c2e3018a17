//! Observability setup.
//! `tracing` with an `EnvFilter` read from `MATPROP_LOG`.

pub mod setup;

pub use setup::init_tracing;
