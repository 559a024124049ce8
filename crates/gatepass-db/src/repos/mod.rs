//! Repository modules for users, gates, and visit logs.
//!
//! Each module adds methods to `GateService` via `impl GateService` blocks.

pub mod gate;
pub mod user;
pub mod visit_log;
