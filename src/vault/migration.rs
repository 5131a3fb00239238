//! Migration Controller - time-locked strategy switch
//!
//! NoCandidate -> (propose) -> PendingApproval -> (upgrade, after the delay) -> NoCandidate

use odra::prelude::*;
use super::errors::VaultError;

/// A proposed replacement strategy
#[odra::odra_type]
pub struct StrategyCandidate {
    pub strategy: Address,
    pub proposed_at: u64,
}

#[odra::module]
pub struct MigrationController {
    /// Pending candidate, `None` when nothing is proposed
    candidate: Var<Option<StrategyCandidate>>,
    /// Milliseconds a candidate must wait before it can be activated
    approval_delay: Var<u64>,
}

#[odra::module]
impl MigrationController {
    pub fn candidate(&self) -> Option<StrategyCandidate> {
        self.candidate.get_or_default()
    }

    pub fn approval_delay(&self) -> u64 {
        self.approval_delay.get_or_default()
    }
}

impl MigrationController {
    pub fn configure(&mut self, approval_delay: u64) {
        self.approval_delay.set(approval_delay);
        self.candidate.set(None);
    }

    /// Replace any pending candidate; the delay restarts
    pub fn propose(&mut self, strategy: Address) -> StrategyCandidate {
        let candidate = StrategyCandidate {
            strategy,
            proposed_at: self.env().get_block_time(),
        };
        self.candidate.set(Some(candidate.clone()));
        candidate
    }

    /// Consume the candidate once its delay has elapsed
    pub fn take_ready(&mut self) -> Address {
        let candidate = self
            .candidate()
            .unwrap_or_revert_with(&self.env(), VaultError::NoCandidate);

        let ready_at = candidate.proposed_at.saturating_add(self.approval_delay());
        if self.env().get_block_time() < ready_at {
            self.env().revert(VaultError::ApprovalDelayNotElapsed);
        }

        self.candidate.set(None);
        candidate.strategy
    }
}
