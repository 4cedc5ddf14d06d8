//! OEM-hook backend capability negotiation.
//!
//! A backend is a concrete radio transport that accepts serialized command
//! frames tagged with a caller-chosen serial and later delivers responses
//! through a callback carrying that serial. Two interchangeable variants
//! exist in the wild: a vendor hook interface (preferred) and the
//! deprecated AOSP hook interface (fallback). Both are hidden behind
//! [`OemHookBackend`]; selection happens once per hardware slot via
//! [`negotiate`].
//!
//! This is the lowest layer of rilmux. Service discovery itself is the
//! embedder's concern, abstracted as [`BackendProvider`].

pub mod error;
pub mod negotiate;
pub mod radio;
pub mod slot;
pub mod traits;

pub use error::{BackendError, Result};
pub use negotiate::{legacy_service_name, negotiate, preferred_service_name};
pub use radio::{radio_error_name, RADIO_ERROR_SUCCESS};
pub use slot::SlotId;
pub use traits::{BackendKind, BackendProvider, OemHookBackend, ResponseSink};
