//! Payload schemas for the GBA key-management commands.
//!
//! These ride inside [`Envelope`](crate::envelope::Envelope) payloads, one
//! schema pair per [`HookCommand`](crate::envelope::HookCommand).

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// UICC application the key material belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiccApplication {
    Unknown,
    Usim,
    Isim,
}

/// Request payload for [`HookCommand::GbaInit`](crate::envelope::HookCommand::GbaInit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GbaInitRequest {
    /// Security-protocol identifier blob (TS 33.220 annex H).
    pub security_protocol: Vec<u8>,
    /// Fully qualified domain name of the NAF.
    pub naf_fqdn: String,
    /// Hardware slot the bootstrap runs against.
    pub slot: u32,
    /// Application to derive keys for.
    pub application: UiccApplication,
    /// Force a fresh bootstrapping run even if keys are cached.
    pub force_bootstrap: bool,
}

/// Response payload for a GBA init.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GbaInitResponse {
    /// Kind of key material returned.
    pub key_type: i32,
    /// The derived NAF key.
    pub key: Vec<u8>,
    /// Bootstrapping transaction identifier (B-TID).
    pub bootstrap_tid: String,
    /// Key lifetime as reported by the BSF.
    pub key_lifetime: String,
}

/// Request payload for [`HookCommand::GetImpi`](crate::envelope::HookCommand::GetImpi).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpiRequest {
    pub slot: u32,
    pub application: UiccApplication,
    /// Ask for the encrypted form of the identity.
    pub secure: bool,
}

/// Response payload carrying the IMPI blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpiResponse {
    pub data: Vec<u8>,
}

/// Serialize a payload schema for embedding in an envelope.
pub fn encode_payload<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(postcard::to_allocvec(value)?)
}

/// Deserialize a payload schema extracted from an envelope.
pub fn decode_payload<'a, T: Deserialize<'a>>(bytes: &'a [u8]) -> Result<T> {
    Ok(postcard::from_bytes(bytes)?)
}
