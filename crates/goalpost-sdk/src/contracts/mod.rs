pub mod crowdfund;

pub use crowdfund::{CreateCampaignArgs, CrowdfundClient, RawCampaign, RawCampaignDetails};

use alloy_primitives::B256;

/// Hash returned by the transport after submitting a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxHash(pub B256);

impl TxHash {
    pub fn bytes(self) -> [u8; 32] {
        self.0.into()
    }
}

impl From<B256> for TxHash {
    fn from(value: B256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
