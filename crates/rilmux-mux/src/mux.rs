use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use rilmux_backend::{BackendError, BackendProvider, SlotId};
use rilmux_frame::{command_name, HookFrame};
use tokio::sync::OnceCell;

use crate::channel::SlotHandle;
use crate::config::MuxConfig;
use crate::error::{MuxError, Result};

/// Outcome of a slot's one-shot negotiation, memoized for the life of the
/// process. A failed negotiation is memoized too: the provider is never
/// re-probed for a slot that came up empty.
enum SlotEntry {
    Ready(Arc<SlotHandle>),
    Unavailable,
}

/// The request correlation multiplexer.
///
/// Owns all per-slot correlation state explicitly — there is no ambient
/// global cache. Cheap to share behind an [`Arc`]; all methods take
/// `&self` and are safe under concurrent use.
pub struct HookMux {
    provider: Arc<dyn BackendProvider>,
    config: MuxConfig,
    slots: Mutex<HashMap<SlotId, Arc<OnceCell<SlotEntry>>>>,
}

impl HookMux {
    /// Create a multiplexer with default configuration.
    pub fn new(provider: Arc<dyn BackendProvider>) -> Self {
        Self::with_config(provider, MuxConfig::default())
    }

    /// Create a multiplexer with explicit configuration.
    pub fn with_config(provider: Arc<dyn BackendProvider>, config: MuxConfig) -> Self {
        Self {
            provider,
            config,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Current multiplexer configuration.
    pub fn config(&self) -> &MuxConfig {
        &self.config
    }

    /// Dispatch pre-framed bytes on `slot` and await the raw response.
    ///
    /// Allocates a serial, parks a completion handle under it, and hands
    /// the buffer to the slot's backend. The caller suspends until the
    /// backend's callback (or the deadline sweeper) resolves the handle.
    pub async fn send_command(&self, slot: SlotId, data: Bytes) -> Result<Bytes> {
        let handle = self.slot_handle(slot).await?;
        handle.dispatch(data, self.config.response_timeout).await
    }

    /// Encode `frame` into its wire format and dispatch it on `slot`.
    pub async fn send_frame(&self, slot: SlotId, frame: &HookFrame) -> Result<Bytes> {
        let data = frame.to_bytes()?;
        tracing::debug!(
            %slot,
            command = command_name(frame.command),
            len = data.len(),
            "dispatching hook frame"
        );
        self.send_command(slot, data).await
    }

    /// Resolve the slot's backend handle, negotiating on first use.
    ///
    /// Concurrent first callers for the same slot race on one init-once
    /// cell: exactly one negotiation proceeds, and every caller observes
    /// the same resulting handle (or the same unavailability).
    async fn slot_handle(&self, slot: SlotId) -> Result<Arc<SlotHandle>> {
        let cell = {
            let mut slots = self.slots.lock();
            Arc::clone(
                slots
                    .entry(slot)
                    .or_insert_with(|| Arc::new(OnceCell::new())),
            )
        };

        let mut first_failure = None;
        let entry = cell
            .get_or_init(|| async {
                match SlotHandle::connect(self.provider.as_ref(), slot, &self.config) {
                    Ok(handle) => SlotEntry::Ready(Arc::new(handle)),
                    Err(err) => {
                        tracing::error!(%slot, %err, "slot has no usable backend");
                        first_failure = Some(err);
                        SlotEntry::Unavailable
                    }
                }
            })
            .await;

        match entry {
            SlotEntry::Ready(handle) => Ok(Arc::clone(handle)),
            SlotEntry::Unavailable => Err(first_failure
                .unwrap_or_else(|| MuxError::Backend(BackendError::Unavailable { slot }))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use parking_lot::Mutex as PlMutex;
    use rilmux_backend::{
        BackendKind, OemHookBackend, ResponseSink, RADIO_ERROR_SUCCESS,
    };
    use rilmux_frame::CMD_SET_TRANSMIT_POWER;

    use super::*;

    /// Backend that echoes every request from a separate OS thread,
    /// mimicking the transport's own delivery context.
    struct EchoBackend {
        sink: Arc<dyn ResponseSink>,
        serials: Arc<PlMutex<Vec<i32>>>,
        error_code: i32,
    }

    impl OemHookBackend for EchoBackend {
        fn kind(&self) -> BackendKind {
            BackendKind::Preferred
        }

        fn send(&self, serial: i32, data: Bytes) -> rilmux_backend::Result<()> {
            self.serials.lock().push(serial);
            let sink = Arc::clone(&self.sink);
            let error_code = self.error_code;
            std::thread::spawn(move || {
                sink.on_response(serial, error_code, data);
            });
            Ok(())
        }
    }

    struct EchoProvider {
        lookups: AtomicUsize,
        serials: Arc<PlMutex<Vec<i32>>>,
        error_code: i32,
        /// Slots the provider refuses to serve at all.
        dead_slots: Vec<SlotId>,
    }

    impl EchoProvider {
        fn healthy() -> Self {
            Self {
                lookups: AtomicUsize::new(0),
                serials: Arc::new(PlMutex::new(Vec::new())),
                error_code: RADIO_ERROR_SUCCESS,
                dead_slots: Vec::new(),
            }
        }
    }

    impl BackendProvider for EchoProvider {
        fn lookup(
            &self,
            _kind: BackendKind,
            service: &str,
            slot: SlotId,
            sink: Arc<dyn ResponseSink>,
        ) -> rilmux_backend::Result<Box<dyn OemHookBackend>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if self.dead_slots.contains(&slot) {
                return Err(BackendError::NotFound {
                    service: service.to_string(),
                });
            }
            Ok(Box::new(EchoBackend {
                sink,
                serials: Arc::clone(&self.serials),
                error_code: self.error_code,
            }))
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn send_command_roundtrip() {
        let mux = HookMux::new(Arc::new(EchoProvider::healthy()));
        let response = mux
            .send_command(SlotId(0), Bytes::from_static(b"raw passthrough"))
            .await
            .expect("echo should answer");
        assert_eq!(response.as_ref(), b"raw passthrough");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn send_frame_prepends_wire_header() {
        let provider = Arc::new(EchoProvider::healthy());
        let mux = HookMux::new(Arc::clone(&provider) as Arc<dyn BackendProvider>);

        let frame = HookFrame::transmit_power(5, 10);
        let response = mux
            .send_frame(SlotId(0), &frame)
            .await
            .expect("echo should answer");

        // The echo returns exactly what was dispatched: the framed bytes.
        assert_eq!(response, frame.to_bytes().expect("frame should encode"));
        assert_eq!(response[8..12], CMD_SET_TRANSMIT_POWER.to_ne_bytes());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_requests_get_distinct_serials_and_own_responses() {
        let provider = Arc::new(EchoProvider::healthy());
        let mux = Arc::new(HookMux::new(
            Arc::clone(&provider) as Arc<dyn BackendProvider>
        ));

        let mut tasks = Vec::new();
        for i in 0..64u32 {
            let mux = Arc::clone(&mux);
            tasks.push(tokio::spawn(async move {
                let payload = Bytes::from(format!("request-{i}").into_bytes());
                let response = mux
                    .send_command(SlotId(0), payload.clone())
                    .await
                    .expect("echo should answer");
                assert_eq!(response, payload, "caller must get its own response");
            }));
        }
        for task in tasks {
            task.await.expect("task should not panic");
        }

        let serials = provider.serials.lock();
        let distinct: HashSet<_> = serials.iter().copied().collect();
        assert_eq!(serials.len(), 64);
        assert_eq!(distinct.len(), 64, "no serial may be shared in flight");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_first_use_negotiates_once() {
        let provider = Arc::new(EchoProvider::healthy());
        let mux = Arc::new(HookMux::new(
            Arc::clone(&provider) as Arc<dyn BackendProvider>
        ));

        let mut tasks = Vec::new();
        for _ in 0..16 {
            let mux = Arc::clone(&mux);
            tasks.push(tokio::spawn(async move {
                mux.send_command(SlotId(0), Bytes::from_static(b"x"))
                    .await
                    .expect("echo should answer")
            }));
        }
        for task in tasks {
            task.await.expect("task should not panic");
        }

        assert_eq!(
            provider.lookups.load(Ordering::SeqCst),
            1,
            "discovery lookup must happen at most once per slot"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn backend_error_code_surfaces_as_transport_error() {
        let provider = Arc::new(EchoProvider {
            error_code: 2, // GENERIC_FAILURE
            ..EchoProvider::healthy()
        });
        let mux = HookMux::new(provider);

        let err = mux
            .send_command(SlotId(0), Bytes::from_static(b"doomed"))
            .await
            .expect_err("non-success radio code must fail the caller");
        assert!(matches!(err, MuxError::Transport { code: 2 }));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unavailable_slot_does_not_affect_other_slots() {
        let provider = Arc::new(EchoProvider {
            dead_slots: vec![SlotId(0)],
            ..EchoProvider::healthy()
        });
        let mux = HookMux::new(Arc::clone(&provider) as Arc<dyn BackendProvider>);

        let err = mux
            .send_command(SlotId(0), Bytes::from_static(b"a"))
            .await
            .expect_err("dead slot must fail");
        assert!(matches!(err, MuxError::Backend(_)));

        let response = mux
            .send_command(SlotId(1), Bytes::from_static(b"b"))
            .await
            .expect("healthy slot must keep working");
        assert_eq!(response.as_ref(), b"b");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_negotiation_is_not_reprobed() {
        let provider = Arc::new(EchoProvider {
            dead_slots: vec![SlotId(0)],
            ..EchoProvider::healthy()
        });
        let mux = HookMux::new(Arc::clone(&provider) as Arc<dyn BackendProvider>);

        for _ in 0..3 {
            let err = mux
                .send_command(SlotId(0), Bytes::from_static(b"a"))
                .await
                .expect_err("dead slot must fail every time");
            assert!(matches!(err, MuxError::Backend(_)));
        }

        // Preferred + legacy probe on first use, then never again.
        assert_eq!(provider.lookups.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn timeout_applies_from_config() {
        struct NeverProvider;
        struct NeverBackend;

        impl OemHookBackend for NeverBackend {
            fn kind(&self) -> BackendKind {
                BackendKind::Preferred
            }
            fn send(&self, _serial: i32, _data: Bytes) -> rilmux_backend::Result<()> {
                Ok(())
            }
        }

        impl BackendProvider for NeverProvider {
            fn lookup(
                &self,
                _kind: BackendKind,
                _service: &str,
                _slot: SlotId,
                _sink: Arc<dyn ResponseSink>,
            ) -> rilmux_backend::Result<Box<dyn OemHookBackend>> {
                Ok(Box::new(NeverBackend))
            }
        }

        let config = MuxConfig {
            response_timeout: Some(Duration::from_millis(25)),
            ..MuxConfig::default()
        };
        let mux = HookMux::with_config(Arc::new(NeverProvider), config);

        let err = mux
            .send_command(SlotId(0), Bytes::from_static(b"lost"))
            .await
            .expect_err("silent backend must time out");
        assert!(matches!(err, MuxError::Timeout(_)));
    }
}
