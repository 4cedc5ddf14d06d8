//! Request correlation multiplexer over asynchronous OEM-hook backends.
//!
//! This is the core value-add layer of rilmux. The radio transport only
//! delivers responses asynchronously, tagged with an opaque serial; this
//! crate makes it look like ordinary awaitable calls:
//!
//! - One [`SerialCounter`] and one pending-request table per slot
//! - Each request parks on a oneshot rendezvous, resolved exactly once by
//!   the backend's response callback (or by the deadline sweeper)
//! - Backends are negotiated lazily, once per slot, and cached for the
//!   life of the process
//!
//! Callers suspend only on their own completion handle; no lock is held
//! across an await point.

pub mod channel;
pub mod config;
pub mod error;
pub mod mux;
pub mod serial;

pub use config::MuxConfig;
pub use error::{MuxError, Result};
pub use mux::HookMux;
pub use serial::SerialCounter;
