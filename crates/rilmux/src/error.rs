/// Errors surfaced by the service-level operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Multiplexer, frame, or backend failure.
    #[error("mux error: {0}")]
    Mux(#[from] rilmux_mux::MuxError),

    /// Envelope build, parse, or validation failure.
    #[error("envelope error: {0}")]
    Proto(#[from] rilmux_proto::ProtoError),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
