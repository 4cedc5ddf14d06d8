//! The raw hook capability surface.

use std::sync::Arc;

use bytes::Bytes;
use rilmux_backend::{BackendProvider, SlotId};
use rilmux_frame::HookFrame;
use rilmux_mux::{HookMux, MuxConfig};

use crate::error::Result;

/// Raw OEM-hook operations, one instance per process.
///
/// Cheap to clone; all clones share one multiplexer and therefore one
/// negotiated backend per slot.
#[derive(Clone)]
pub struct HookService {
    mux: Arc<HookMux>,
}

impl HookService {
    /// Create a service with default multiplexer configuration.
    pub fn new(provider: Arc<dyn BackendProvider>) -> Self {
        Self {
            mux: Arc::new(HookMux::new(provider)),
        }
    }

    /// Create a service with explicit multiplexer configuration.
    pub fn with_config(provider: Arc<dyn BackendProvider>, config: MuxConfig) -> Self {
        Self {
            mux: Arc::new(HookMux::with_config(provider, config)),
        }
    }

    /// The underlying multiplexer.
    pub fn mux(&self) -> &HookMux {
        &self.mux
    }

    /// Set a transmit-power backoff entry on the primary slot.
    ///
    /// The caller expects no payload back; the modem's acknowledgement is
    /// awaited and discarded so that dispatch failures still surface.
    pub async fn set_transmit_power(&self, key: i32, value: i32) -> Result<()> {
        let frame = HookFrame::transmit_power(key, value);
        let ack = self.mux.send_frame(SlotId::PRIMARY, &frame).await?;
        tracing::debug!(key, value, ack_len = ack.len(), "transmit power set");
        Ok(())
    }

    /// Dispatch already-framed bytes on `slot` (opaque passthrough).
    pub async fn send_command(&self, slot: SlotId, data: Bytes) -> Result<Bytes> {
        Ok(self.mux.send_command(slot, data).await?)
    }

    /// Wrap `data` in a PROTOBUF_MSG wire frame and dispatch it on `slot`.
    ///
    /// An empty `data` fails before any backend is contacted.
    pub async fn send_protobuf_command(&self, slot: SlotId, data: Bytes) -> Result<Bytes> {
        let frame = HookFrame::protobuf_message(data).map_err(rilmux_mux::MuxError::from)?;
        Ok(self.mux.send_frame(slot, &frame).await?)
    }
}
