//! Public façade wiring one provider handle into a wallet session and a
//! campaign repository.

use alloy_primitives::Address;

use crate::{
    config::AppConfig,
    contracts::{CrowdfundClient, TxHash},
    error::{Error, Result},
    model::{Campaign, CampaignDetails, CampaignDraft},
    provider::WalletProvider,
    repository::CampaignRepository,
    session::{ConnectedAccount, WalletSession},
    transport::{EvmTransport, EvmViewTransport},
};

/// Everything the rest of the system sees of the campaign core.
///
/// Built without a provider handle it still constructs (so callers can
/// render an "install a wallet" state), but every operation answers
/// [`Error::NoWalletProvider`].
pub struct GoalpostClient<P: EvmTransport + EvmViewTransport> {
    session: WalletSession<P>,
    repository: Option<CampaignRepository<P>>,
}

impl<P> GoalpostClient<P>
where
    P: WalletProvider + EvmTransport + EvmViewTransport + Clone,
{
    pub fn new(config: AppConfig, provider: Option<P>) -> Self {
        let repository = provider.clone().map(|transport| {
            CampaignRepository::new(CrowdfundClient::new(config.contract_address, transport))
        });
        Self {
            session: WalletSession::new(provider, config.network),
            repository,
        }
    }

    fn repository(&self) -> Result<&CampaignRepository<P>> {
        self.repository.as_ref().ok_or(Error::NoWalletProvider)
    }

    /// Connects the wallet, reconciling the provider network first.
    pub async fn connect_wallet(&self) -> Result<ConnectedAccount> {
        self.session.connect().await
    }

    pub async fn is_connected(&self) -> bool {
        self.session.is_connected().await
    }

    pub async fn connected_account(&self) -> Option<Address> {
        self.session.account().await
    }

    /// Native balance of the connected account, in display units.
    pub async fn account_balance(&self) -> Option<String> {
        self.session.balance().await
    }

    /// Re-fetches the campaign list from the ledger and refreshes the
    /// caches; the creator-filtered view follows the account connected at
    /// fetch time.
    pub async fn fetch_campaigns(&self) -> Result<Vec<Campaign>> {
        let viewer = self.session.account().await;
        self.repository()?.list(viewer).await
    }

    /// Last successfully fetched campaign set.
    pub async fn campaigns(&self) -> Vec<Campaign> {
        match &self.repository {
            Some(repository) => repository.campaigns().await,
            None => Vec::new(),
        }
    }

    /// Campaigns created by the connected account, as of the last fetch.
    pub async fn user_campaigns(&self) -> Vec<Campaign> {
        match &self.repository {
            Some(repository) => repository.user_campaigns().await,
            None => Vec::new(),
        }
    }

    /// Fresh single-campaign read; never served from the list cache.
    pub async fn campaign_by_id(&self, id: u64) -> Result<CampaignDetails> {
        self.repository()?.get_by_id(id).await
    }

    /// Validates, submits, and confirms a new campaign. The cached list is
    /// not refreshed implicitly; call [`fetch_campaigns`](Self::fetch_campaigns)
    /// to observe the new record.
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> Result<TxHash> {
        let submitter = self.session.account().await;
        self.repository()?.create(draft, submitter).await
    }

    /// True while a connect or a fetch is in flight.
    pub fn loading(&self) -> bool {
        self.session.is_connecting()
            || self
                .repository
                .as_ref()
                .is_some_and(CampaignRepository::is_fetching)
    }

    /// Most recent user-visible failure message, if any.
    pub async fn error(&self) -> Option<String> {
        if let Some(message) = self.session.last_error().await {
            return Some(message);
        }
        match &self.repository {
            Some(repository) => repository.last_error().await,
            None => None,
        }
    }

    // The remaining contract surface is declared but outside the
    // implemented flows.

    pub async fn contribute(&self, _campaign_id: u64, _amount: &str) -> Result<TxHash> {
        Err(Error::Unimplemented("contribute"))
    }

    pub async fn withdraw(&self, _campaign_id: u64, _amount: &str) -> Result<TxHash> {
        Err(Error::Unimplemented("withdraw"))
    }

    pub async fn complete_milestone(&self, _campaign_id: u64, _milestone: usize) -> Result<TxHash> {
        Err(Error::Unimplemented("complete_milestone"))
    }

    pub async fn update_milestone(
        &self,
        _campaign_id: u64,
        _milestone: usize,
        _name: &str,
        _target: &str,
    ) -> Result<TxHash> {
        Err(Error::Unimplemented("update_milestone"))
    }

    pub async fn disconnect_wallet(&self) -> Result<()> {
        Err(Error::Unimplemented("disconnect_wallet"))
    }
}
