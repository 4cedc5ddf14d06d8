//! Envelope-based IMS key management operations.
//!
//! Each operation is one validated request/response envelope cycle over
//! the PROTOBUF_MSG hook command: build the request envelope, dispatch it
//! through the multiplexer, then check that the reply is a response, for
//! the same command, with a success status, before touching its payload.

use bytes::Bytes;
use rilmux_backend::SlotId;
use rilmux_proto::{
    decode_payload, encode_payload, Envelope, GbaInitRequest, GbaInitResponse, HookCommand,
    ImpiRequest, UiccApplication,
};

use crate::error::Result;
use crate::hooks::HookService;

/// Interface version reported to service clients.
pub const INTERFACE_VERSION: &str = "1";

/// IMS key management built on the envelope protocol.
#[derive(Clone)]
pub struct ImsKeyService {
    hooks: HookService,
}

impl ImsKeyService {
    /// Build the service on top of an existing hook surface.
    pub fn new(hooks: HookService) -> Self {
        Self { hooks }
    }

    /// Version of this service interface.
    pub fn version(&self) -> &'static str {
        INTERFACE_VERSION
    }

    /// Run GBA bootstrapping / NAF key derivation.
    pub async fn gba_init(
        &self,
        security_protocol: Vec<u8>,
        naf_fqdn: String,
        slot: SlotId,
        application: UiccApplication,
        force_bootstrap: bool,
    ) -> Result<GbaInitResponse> {
        let request = GbaInitRequest {
            security_protocol,
            naf_fqdn,
            slot: slot.0,
            application,
            force_bootstrap,
        };
        let payload = self
            .call(HookCommand::GbaInit, slot, encode_payload(&request)?)
            .await?;
        Ok(decode_payload(&payload)?)
    }

    /// Fetch the IMPI blob for an application on `slot`.
    pub async fn get_impi(
        &self,
        slot: SlotId,
        application: UiccApplication,
        secure: bool,
    ) -> Result<Vec<u8>> {
        let request = ImpiRequest {
            slot: slot.0,
            application,
            secure,
        };
        let payload = self
            .call(HookCommand::GetImpi, slot, encode_payload(&request)?)
            .await?;
        let response: rilmux_proto::ImpiResponse = decode_payload(&payload)?;
        Ok(response.data)
    }

    /// One envelope request/response cycle for `command` on `slot`.
    async fn call(&self, command: HookCommand, slot: SlotId, payload: Vec<u8>) -> Result<Vec<u8>> {
        let envelope = Envelope::request(command, payload);
        let request_bytes = envelope.encode()?;

        tracing::debug!(?command, %slot, "sending envelope request");
        let response_bytes = self
            .hooks
            .send_protobuf_command(slot, Bytes::from(request_bytes))
            .await?;

        let response = Envelope::decode(&response_bytes)?;
        Ok(response.into_response_payload(command)?)
    }
}
