//! External SDK boundary
//!
//! The wrapped platform SDK is an opaque collaborator: this module defines
//! only the surface the console consumes: the connect/disconnect lifecycle,
//! per-domain method groups, the dynamic value type responses arrive as, and
//! the signing primitives mutations require. Connection management,
//! proof verification, transaction construction, and network I/O all live on
//! the other side of these traits.

pub mod api;
pub mod options;
pub mod signing;
pub mod value;

pub use api::{
    ContractsApi, DocumentsApi, DpnsApi, EpochApi, GroupApi, IdentitiesApi, PlatformSdk,
    ProtocolApi, SdkConnector, SystemApi, TokensApi, VotingApi,
};
pub use options::{AdvancedOptions, ConnectOptions, ConnectionSettings, Network};
pub use signing::{IdentityHandle, KeyPurpose, ResolvedKey, SecurityLevel, Signer, SigningContext};
pub use value::{RawValue, SdkHandle, SdkResponse};

use thiserror::Error;

/// Errors surfaced by the wrapped SDK. Network and protocol failures arrive
/// as opaque messages; nothing at this layer retries them.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("SDK method {0} is not available on this connection")]
    Unsupported(&'static str),
    #[error("SDK client is not connected")]
    NotConnected,
    #[error("invalid private key: {0}")]
    InvalidKey(String),
    #[error("{0}")]
    Call(String),
}

/// Result of one SDK call.
pub type SdkResult = Result<SdkResponse, SdkError>;
