//! Draft validation for the campaign creation form. Pure: no side effects,
//! no network access.

use alloy_primitives::U256;

use crate::{model::CampaignDraft, units};

/// Field-indexed validation outcome; `true` flags an invalid field so a
/// caller can highlight every offender at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub title: bool,
    pub description: bool,
    pub goal: bool,
    pub duration: bool,
    pub category: bool,
    pub beneficiaries: bool,
    pub proof_of_work: bool,
    pub milestones: bool,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.flagged_fields().is_empty()
    }

    /// Names of the flagged fields, in form order.
    pub fn flagged_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        for (flag, name) in [
            (self.title, "title"),
            (self.description, "description"),
            (self.goal, "goal"),
            (self.duration, "duration"),
            (self.category, "category"),
            (self.beneficiaries, "beneficiaries"),
            (self.proof_of_work, "proof_of_work"),
            (self.milestones, "milestones"),
        ] {
            if flag {
                fields.push(name);
            }
        }
        fields
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_clean() {
            return write!(f, "all fields valid");
        }
        write!(f, "invalid fields: {}", self.flagged_fields().join(", "))
    }
}

/// Validates a draft against the submission constraints.
///
/// Every milestone needs a non-empty name and a parseable target, and the
/// targets may not sum past the goal; the comparison is numeric in ledger
/// units, never lexical.
pub fn validate(draft: &CampaignDraft) -> ValidationReport {
    let goal = units::parse_units(&draft.goal).ok();
    let duration_ok = matches!(draft.duration.trim().parse::<u64>(), Ok(days) if days > 0);

    let mut milestone_sum = Some(U256::ZERO);
    let mut milestones_complete = !draft.milestones.is_empty();
    for milestone in &draft.milestones {
        if milestone.name.trim().is_empty() {
            milestones_complete = false;
        }
        match units::parse_units(&milestone.target) {
            Ok(target) => {
                milestone_sum = milestone_sum.and_then(|sum| sum.checked_add(target));
            }
            Err(_) => milestones_complete = false,
        }
    }
    let within_goal = match (goal, milestone_sum) {
        (Some(goal), Some(sum)) => sum <= goal,
        // An unparseable goal is flagged on its own field; the milestone
        // rows themselves may still be fine.
        (None, _) => true,
        (_, None) => false,
    };

    ValidationReport {
        title: draft.title.trim().is_empty(),
        description: draft.description.trim().is_empty(),
        goal: goal.is_none(),
        duration: !duration_ok,
        category: draft.category.trim().is_empty(),
        beneficiaries: draft.beneficiaries.trim().is_empty(),
        proof_of_work: draft.proof_of_work.trim().is_empty(),
        milestones: !milestones_complete || !within_goal,
    }
}
