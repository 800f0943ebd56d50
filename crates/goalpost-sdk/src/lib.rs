//! Client SDK for the Goalpost milestone crowdfunding contract.
//!
//! The core is the session/synchronization layer between a wallet provider
//! and the campaign contract: network reconciliation, connection lifecycle,
//! fixed-point amount conversion, campaign fetching/caching, and validated
//! campaign creation. Presentation is someone else's job; everything here is
//! driven through [`GoalpostClient`] or the individual components.

pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod model;
pub mod network;
pub mod provider;
pub mod repository;
pub mod session;
pub mod transport;
pub mod units;
pub mod validator;

pub use client::GoalpostClient;
pub use config::AppConfig;
pub use contracts::{
    CreateCampaignArgs, CrowdfundClient, RawCampaign, RawCampaignDetails, TxHash,
};
pub use error::{Error, Result};
pub use model::{Campaign, CampaignDetails, CampaignDraft, MilestoneDraft};
pub use network::{ensure_network, NativeCurrency, NetworkDescriptor};
#[cfg(not(target_arch = "wasm32"))]
pub use provider::RpcWalletProvider;
pub use provider::{ProviderError, ProviderResult, WalletProvider};
pub use repository::CampaignRepository;
pub use session::{ConnectedAccount, WalletSession};
pub use transport::{EvmCall, EvmTransport, EvmViewTransport};
pub use units::{format_units, parse_units, DECIMALS};
pub use validator::{validate, ValidationReport};
