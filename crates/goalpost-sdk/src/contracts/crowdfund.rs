use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use crate::{
    contracts::TxHash,
    error::{Error, Result},
    transport::{EvmCall, EvmTransport, EvmViewTransport},
};

sol! {
    contract Crowdfund {
        struct CampaignMeta {
            uint256 id;
            address creator;
            string title;
            string category;
            uint256 goalAmount;
            uint256 totalFunded;
            bool isActive;
            uint256 createdAt;
            uint256 duration;
        }

        struct CampaignInfo {
            uint256 id;
            address creator;
            string title;
            string category;
            uint256 goalAmount;
            uint256 totalFunded;
            bool isActive;
            uint256 createdAt;
            uint256 duration;
            string description;
            string proofOfWork;
            string beneficiaries;
            string[] media;
        }

        function campaignCounter() view returns (uint256);
        function getCampaignMetadata(uint256 index) view returns (CampaignMeta);
        function getCampaignDetails(uint256 id) view returns (CampaignInfo);
        function createCampaign(
            string title,
            string description,
            string category,
            uint256 goalAmount,
            uint256 duration,
            string[] milestoneNames,
            uint256[] milestoneTargets,
            string proofOfWork,
            string beneficiaries,
            string[] media
        );
    }
}

/// Decoded `getCampaignMetadata` tuple; amounts are still in ledger units.
#[derive(Clone, Debug)]
pub struct RawCampaign {
    pub id: U256,
    pub creator: Address,
    pub title: String,
    pub category: String,
    pub goal_amount: U256,
    pub total_funded: U256,
    pub is_active: bool,
    pub created_at: U256,
    pub duration: U256,
}

impl From<Crowdfund::CampaignMeta> for RawCampaign {
    fn from(value: Crowdfund::CampaignMeta) -> Self {
        Self {
            id: value.id,
            creator: value.creator,
            title: value.title,
            category: value.category,
            goal_amount: value.goalAmount,
            total_funded: value.totalFunded,
            is_active: value.isActive,
            created_at: value.createdAt,
            duration: value.duration,
        }
    }
}

/// Decoded `getCampaignDetails` tuple.
#[derive(Clone, Debug)]
pub struct RawCampaignDetails {
    pub meta: RawCampaign,
    pub description: String,
    pub proof_of_work: String,
    pub beneficiaries: String,
    pub media: Vec<String>,
}

impl From<Crowdfund::CampaignInfo> for RawCampaignDetails {
    fn from(value: Crowdfund::CampaignInfo) -> Self {
        Self {
            meta: RawCampaign {
                id: value.id,
                creator: value.creator,
                title: value.title,
                category: value.category,
                goal_amount: value.goalAmount,
                total_funded: value.totalFunded,
                is_active: value.isActive,
                created_at: value.createdAt,
                duration: value.duration,
            },
            description: value.description,
            proof_of_work: value.proofOfWork,
            beneficiaries: value.beneficiaries,
            media: value.media,
        }
    }
}

/// Arguments for `createCampaign`, already encoded in ledger units.
///
/// Index `i` of `milestone_names` corresponds to index `i` of
/// `milestone_targets`.
#[derive(Clone, Debug)]
pub struct CreateCampaignArgs {
    pub title: String,
    pub description: String,
    pub category: String,
    pub goal_units: U256,
    pub duration_days: u64,
    pub milestone_names: Vec<String>,
    pub milestone_targets: Vec<U256>,
    pub proof_of_work: String,
    pub beneficiaries: String,
    pub media: Vec<String>,
    pub gas_limit: Option<u64>,
}

/// Typed façade over the campaign contract, bound to one deployed address.
#[derive(Clone)]
pub struct CrowdfundClient<T: EvmTransport + EvmViewTransport> {
    contract: Address,
    transport: T,
}

impl<T: EvmTransport + EvmViewTransport> CrowdfundClient<T> {
    pub fn new(contract: Address, transport: T) -> Self {
        Self {
            contract,
            transport,
        }
    }

    pub fn address(&self) -> Address {
        self.contract
    }

    pub async fn campaign_count(&self) -> Result<u64> {
        let calldata = Crowdfund::campaignCounterCall {}.abi_encode();
        let call = EvmCall::new(self.contract, Bytes::from(calldata), Default::default());
        let raw = self.transport.call_view(call).await?;
        let decoded = Crowdfund::campaignCounterCall::abi_decode_returns(&raw, true)
            .map_err(|err| Error::Decode(format!("campaignCounter: {err}")))?;
        u64::try_from(decoded._0)
            .map_err(|_| Error::Decode("campaign counter exceeds u64".into()))
    }

    pub async fn campaign_metadata(&self, index: u64) -> Result<RawCampaign> {
        let calldata = Crowdfund::getCampaignMetadataCall {
            index: U256::from(index),
        }
        .abi_encode();
        let call = EvmCall::new(self.contract, Bytes::from(calldata), Default::default());
        let raw = self.transport.call_view(call).await?;
        let decoded = Crowdfund::getCampaignMetadataCall::abi_decode_returns(&raw, true)
            .map_err(|err| Error::Decode(format!("getCampaignMetadata({index}): {err}")))?;
        Ok(decoded._0.into())
    }

    pub async fn campaign_details(&self, id: u64) -> Result<RawCampaignDetails> {
        let calldata = Crowdfund::getCampaignDetailsCall { id: U256::from(id) }.abi_encode();
        let call = EvmCall::new(self.contract, Bytes::from(calldata), Default::default());
        let raw = self.transport.call_view(call).await?;
        let decoded = Crowdfund::getCampaignDetailsCall::abi_decode_returns(&raw, true)
            .map_err(|err| Error::Decode(format!("getCampaignDetails({id}): {err}")))?;
        Ok(decoded._0.into())
    }

    /// Submits the creation transaction and returns its pending handle.
    pub async fn submit_campaign(&self, args: CreateCampaignArgs) -> Result<TxHash> {
        let gas_limit = args.gas_limit;
        let calldata = Crowdfund::createCampaignCall {
            title: args.title,
            description: args.description,
            category: args.category,
            goalAmount: args.goal_units,
            duration: U256::from(args.duration_days),
            milestoneNames: args.milestone_names,
            milestoneTargets: args.milestone_targets,
            proofOfWork: args.proof_of_work,
            beneficiaries: args.beneficiaries,
            media: args.media,
        }
        .abi_encode();
        let call = EvmCall::new(self.contract, Bytes::from(calldata), Default::default())
            .with_gas_limit(gas_limit.unwrap_or(1_500_000));
        self.transport.send(call).await
    }

    /// Suspends until the ledger includes `tx` or reports a revert.
    pub async fn confirm(&self, tx: TxHash) -> Result<()> {
        self.transport.confirm(tx).await
    }
}
