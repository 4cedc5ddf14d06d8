//! Synchronous command/response calls over asynchronous RIL OEM-hook
//! transports.
//!
//! rilmux makes a callback-driven, per-slot radio hook channel look like a
//! set of ordinary awaitable calls: byte-exact wire framing, backend
//! capability negotiation with legacy fallback, serial-tagged request
//! correlation, and a validated envelope protocol for structured commands.
//!
//! # Crate Structure
//!
//! - [`backend`] — Backend traits and preferred/legacy negotiation
//! - [`frame`] — OEM-hook wire frame encoding
//! - [`proto`] — Envelope message schema and business payloads
//! - [`mux`] — Request correlation multiplexer
//!
//! This crate adds the two operation surfaces on top: [`HookService`] for
//! raw hook commands and [`ImsKeyService`] for the envelope-based key
//! management operations.

pub mod error;
pub mod hooks;
pub mod ims;

/// Re-export backend types.
pub mod backend {
    pub use rilmux_backend::*;
}

/// Re-export frame types.
pub mod frame {
    pub use rilmux_frame::*;
}

/// Re-export envelope schema types.
pub mod proto {
    pub use rilmux_proto::*;
}

/// Re-export multiplexer types.
pub mod mux {
    pub use rilmux_mux::*;
}

pub use error::{Result, ServiceError};
pub use hooks::HookService;
pub use ims::ImsKeyService;
