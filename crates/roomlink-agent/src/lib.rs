//! Room edge agent: wiring, command sources, and process lifecycle.
//!
//! The agent assembles the reconciliation engines over the configured
//! peripherals and supervises the concurrent command sources: the door
//! button, the credential gate, the remote poll loop, and the climate
//! exporter. Library form so integration tests can drive the pieces
//! individually; the binary entrypoint lives in `main.rs`.

pub mod allowlist;
pub mod config;
pub mod console;
pub mod runtime;
pub mod tasks;
