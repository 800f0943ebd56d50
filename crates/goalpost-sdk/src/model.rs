//! Normalized application models. Raw ledger tuples are decoded at the
//! contract boundary and converted here; nothing above it sees ledger units.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{
    contracts::{RawCampaign, RawCampaignDetails},
    error::{Error, Result},
    units,
};

/// One campaign as listed on the ledger, amounts in display units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub category: String,
    pub goal_amount: String,
    pub total_funded: String,
    pub is_active: bool,
    pub created_at: u64,
    pub duration: u64,
}

impl Campaign {
    pub(crate) fn from_raw(raw: RawCampaign) -> Result<Self> {
        Ok(Self {
            id: decode_u64(raw.id, "campaign id")?,
            creator: raw.creator,
            title: raw.title,
            category: raw.category,
            goal_amount: units::format_units(raw.goal_amount),
            total_funded: units::format_units(raw.total_funded),
            is_active: raw.is_active,
            created_at: decode_u64(raw.created_at, "creation timestamp")?,
            duration: decode_u64(raw.duration, "duration")?,
        })
    }
}

/// Full record behind a single campaign page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDetails {
    pub id: u64,
    pub creator: Address,
    pub title: String,
    pub category: String,
    pub goal_amount: String,
    pub total_funded: String,
    pub is_active: bool,
    pub created_at: u64,
    pub duration: u64,
    pub description: String,
    pub proof_of_work: String,
    pub beneficiaries: String,
    /// Ordered media URLs; order is display-significant.
    pub media: Vec<String>,
}

impl CampaignDetails {
    pub(crate) fn from_raw(raw: RawCampaignDetails) -> Result<Self> {
        let meta = Campaign::from_raw(raw.meta)?;
        Ok(Self {
            id: meta.id,
            creator: meta.creator,
            title: meta.title,
            category: meta.category,
            goal_amount: meta.goal_amount,
            total_funded: meta.total_funded,
            is_active: meta.is_active,
            created_at: meta.created_at,
            duration: meta.duration,
            description: raw.description,
            proof_of_work: raw.proof_of_work,
            beneficiaries: raw.beneficiaries,
            media: raw.media,
        })
    }
}

fn decode_u64(value: U256, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::Decode(format!("{field} exceeds u64")))
}

/// One milestone row of a creation form; both fields user-entered strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneDraft {
    pub name: String,
    pub target: String,
}

impl MilestoneDraft {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }
}

/// A campaign as entered by the user, before validation and encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    pub goal: String,
    pub duration: String,
    pub category: String,
    pub beneficiaries: String,
    pub proof_of_work: String,
    pub milestones: Vec<MilestoneDraft>,
    pub media: Vec<String>,
}
