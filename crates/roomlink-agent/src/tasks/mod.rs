//! Concurrent command-source tasks.
//!
//! One task per input source, all serialized through the engines'
//! locks and all cancellation-aware. Each task owns its peripheral;
//! a disconnected peripheral disables that source for the process
//! lifetime without taking the rest of the agent down.

pub mod access;
pub mod button;
pub mod climate;
pub mod poll;
