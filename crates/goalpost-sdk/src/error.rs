//! Error taxonomy shared across the Goalpost SDK.

use thiserror::Error;

use crate::validator::ValidationReport;

/// Result type alias that carries [`Error`] failures.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified failure taxonomy for the SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// No browser/node wallet provider handle was supplied.
    #[error("no wallet provider is available; install or configure one")]
    NoWalletProvider,
    /// A second connect was issued while one was still in flight.
    #[error("a wallet connection attempt is already in progress")]
    ConnectInProgress,
    /// The provider refused to switch to (or register) the required chain.
    #[error("failed to switch wallet network: {0}")]
    NetworkSwitchFailed(String),
    /// Wallet connection failed after it was initiated.
    #[error("wallet connection failed: {0}")]
    WalletConnectionFailed(#[source] Box<Error>),
    /// A write operation was attempted without a connected account.
    #[error("no account is connected")]
    NotConnected,
    /// The input is not a well-formed non-negative decimal.
    #[error("invalid decimal amount {0:?}")]
    InvalidAmount(String),
    /// The input carries more fractional digits than the ledger can encode.
    #[error("amount {0:?} exceeds 18 fractional digits")]
    PrecisionLoss(String),
    /// At least one read in a campaign batch fetch failed; nothing was cached.
    #[error("campaign fetch incomplete: {0}")]
    PartialFetchFailure(String),
    /// The ledger returned an empty record for the requested id.
    #[error("campaign {0} does not exist")]
    CampaignNotFound(u64),
    /// The draft was rejected; the report flags every offending field.
    #[error("campaign draft rejected: {0}")]
    ValidationFailed(ValidationReport),
    /// The ledger reverted or dropped a submitted transaction.
    #[error("transaction failed: {0}")]
    TransactionFailed(String),
    /// Raw RPC failure at the provider/ledger boundary.
    #[error("rpc transport error: {0}")]
    Transport(String),
    /// The ledger returned bytes that do not decode to the expected tuple.
    #[error("malformed ledger response: {0}")]
    Decode(String),
    /// Startup configuration could not be loaded or parsed.
    #[error("configuration error: {0}")]
    Config(String),
    /// Declared in the public surface but not part of the implemented flows.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}
