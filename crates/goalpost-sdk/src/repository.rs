//! Campaign fetching, normalization, and caching.

use std::sync::atomic::{AtomicBool, Ordering};

use alloy_primitives::Address;
use futures::future::try_join_all;
use log::{info, warn};
use tokio::sync::RwLock;

use crate::{
    contracts::{CreateCampaignArgs, CrowdfundClient, TxHash},
    error::{Error, Result},
    model::{Campaign, CampaignDetails, CampaignDraft},
    transport::{EvmTransport, EvmViewTransport},
    units, validator,
};

/// Owns the normalized campaign caches and the fetch flags.
///
/// Single-writer: only this type mutates the caches; other components read
/// through the accessors. Overlapping fetches are last-writer-wins.
pub struct CampaignRepository<T: EvmTransport + EvmViewTransport> {
    client: CrowdfundClient<T>,
    campaigns: RwLock<Vec<Campaign>>,
    user_campaigns: RwLock<Vec<Campaign>>,
    fetching: AtomicBool,
    last_error: RwLock<Option<String>>,
}

impl<T: EvmTransport + EvmViewTransport> CampaignRepository<T> {
    pub fn new(client: CrowdfundClient<T>) -> Self {
        Self {
            client,
            campaigns: RwLock::new(Vec::new()),
            user_campaigns: RwLock::new(Vec::new()),
            fetching: AtomicBool::new(false),
            last_error: RwLock::new(None),
        }
    }

    /// Fetches and caches the full campaign set, plus the subset created by
    /// `viewer` when one is connected.
    ///
    /// The per-index metadata reads are issued concurrently and joined as an
    /// all-or-nothing batch: one failed read fails the whole call with
    /// [`Error::PartialFetchFailure`] and leaves the previous cache
    /// untouched. The result is always in ascending ledger-index order, no
    /// matter how the individual reads complete.
    pub async fn list(&self, viewer: Option<Address>) -> Result<Vec<Campaign>> {
        self.fetching.store(true, Ordering::SeqCst);
        let result = self.list_inner(viewer).await;
        self.fetching.store(false, Ordering::SeqCst);

        match result {
            Ok(campaigns) => {
                *self.last_error.write().await = None;
                Ok(campaigns)
            }
            Err(err) => {
                warn!("campaign fetch failed: {err}");
                *self.last_error.write().await = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn list_inner(&self, viewer: Option<Address>) -> Result<Vec<Campaign>> {
        let count = self
            .client
            .campaign_count()
            .await
            .map_err(|err| Error::PartialFetchFailure(err.to_string()))?;

        let reads = (0..count).map(|index| self.client.campaign_metadata(index));
        let raw = try_join_all(reads)
            .await
            .map_err(|err| Error::PartialFetchFailure(err.to_string()))?;

        let campaigns = raw
            .into_iter()
            .map(Campaign::from_raw)
            .collect::<Result<Vec<_>>>()
            .map_err(|err| Error::PartialFetchFailure(err.to_string()))?;
        info!("fetched {} campaigns", campaigns.len());

        *self.campaigns.write().await = campaigns.clone();
        if let Some(viewer) = viewer {
            let mine = campaigns
                .iter()
                .filter(|campaign| campaign.creator == viewer)
                .cloned()
                .collect();
            *self.user_campaigns.write().await = mine;
        }
        Ok(campaigns)
    }

    /// Fetches one campaign's full record, always as a fresh read; the list
    /// cache is neither consulted nor updated.
    pub async fn get_by_id(&self, id: u64) -> Result<CampaignDetails> {
        let raw = self.client.campaign_details(id).await?;
        // An out-of-range id decodes as an all-zero record; a real campaign
        // always has a creator.
        if raw.meta.creator == Address::ZERO {
            return Err(Error::CampaignNotFound(id));
        }
        CampaignDetails::from_raw(raw)
    }

    /// Validates, encodes, submits, and awaits confirmation of a new
    /// campaign.
    ///
    /// The draft is only borrowed, so a failed attempt leaves the caller's
    /// form state intact for a retry. The list cache is not refreshed on
    /// success; callers re-run [`list`](Self::list) to observe the new
    /// campaign.
    pub async fn create(&self, draft: &CampaignDraft, submitter: Option<Address>) -> Result<TxHash> {
        let report = validator::validate(draft);
        if !report.is_clean() {
            return Err(Error::ValidationFailed(report));
        }
        let submitter = submitter.ok_or(Error::NotConnected)?;

        let goal_units = units::parse_units(&draft.goal)?;
        let duration_days = draft.duration.trim().parse::<u64>().map_err(|_| {
            let mut report = report;
            report.duration = true;
            Error::ValidationFailed(report)
        })?;
        let milestone_names = draft
            .milestones
            .iter()
            .map(|milestone| milestone.name.trim().to_string())
            .collect();
        let milestone_targets = draft
            .milestones
            .iter()
            .map(|milestone| units::parse_units(&milestone.target))
            .collect::<Result<Vec<_>>>()?;

        let tx = self
            .client
            .submit_campaign(CreateCampaignArgs {
                title: draft.title.clone(),
                description: draft.description.clone(),
                category: draft.category.clone(),
                goal_units,
                duration_days,
                milestone_names,
                milestone_targets,
                proof_of_work: draft.proof_of_work.clone(),
                beneficiaries: draft.beneficiaries.clone(),
                media: draft.media.clone(),
                gas_limit: None,
            })
            .await?;
        info!("campaign submitted by {submitter} in {tx}");
        self.client.confirm(tx).await?;
        Ok(tx)
    }

    /// Last successfully fetched campaign set.
    pub async fn campaigns(&self) -> Vec<Campaign> {
        self.campaigns.read().await.clone()
    }

    /// Subset of the cache created by the viewer passed to the last fetch.
    pub async fn user_campaigns(&self) -> Vec<Campaign> {
        self.user_campaigns.read().await.clone()
    }

    /// Caller-visible loading flag for an in-flight fetch.
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::SeqCst)
    }

    /// Human-readable message from the most recent failed fetch.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }
}
