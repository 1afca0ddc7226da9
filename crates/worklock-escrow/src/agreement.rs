//! The escrow agreement state machine
//!
//! Guards are evaluated in a fixed order - caller, then status, then timing -
//! and always before any mutation. A failed guard returns an error and leaves
//! the agreement exactly as it was; no event, no payout, no status change.
//!
//! Non-terminal transitions mutate the agreement in place and return the
//! event. Terminal transitions are pure: they borrow the agreement, compute a
//! [`Settlement`], and leave destruction (removal plus payout execution) to
//! the engine and host.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use worklock_types::{
    AgreementId, AgreementStatus, Amount, Decision, EscrowError, EscrowEvent, PrincipalId, Result,
};

use crate::settlement::Settlement;

/// Hours past the deadline before a delivered agreement becomes
/// auto-claimable by the freelancer
pub const AUTO_CLAIM_GRACE_HOURS: i64 = 48;

/// Parameters fixed at agreement creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAgreementParams {
    /// Party depositing the base amount and receiving the deliverable
    pub client: PrincipalId,
    /// Party posting collateral and delivering the work
    pub freelancer: PrincipalId,
    /// Principal authorized to resolve a dispute
    pub arbiter: PrincipalId,
    /// Base amount the client deposits, in the smallest host unit
    pub amount: Amount,
    /// Timestamp after which a delivered-but-unconfirmed agreement becomes
    /// auto-claimable (48h later)
    pub deadline: DateTime<Utc>,
    /// Opaque reference to the off-chain deal description
    pub content_hash: String,
}

/// Dispute bookkeeping, populated when a party opens a dispute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeFile {
    /// Party that opened the dispute
    pub opened_by: PrincipalId,
    /// Free-text reason
    pub reason: String,
    /// Opaque reference to supporting evidence (never resolved by the core)
    pub evidence: Option<String>,
}

/// A live escrow agreement between a client and a freelancer
///
/// While live, the agreement custodies `amount` (from `Created`) plus
/// `collateral` (from `Active` onward). Collateral is sized once, at
/// creation, from the freelancer's trust score; later score changes do not
/// reprice it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowAgreement {
    /// Unique agreement ID
    pub id: AgreementId,
    /// Party that deposited the base amount
    pub client: PrincipalId,
    /// Party posting collateral and delivering work
    pub freelancer: PrincipalId,
    /// Principal authorized to resolve a dispute
    pub arbiter: PrincipalId,
    /// Base amount deposited by the client
    pub amount: Amount,
    /// Collateral the freelancer must post, fixed at creation
    pub collateral: Amount,
    /// Deadline anchoring the auto-claim grace period
    pub deadline: DateTime<Utc>,
    /// Opaque reference to the deal description document
    pub content_hash: String,
    /// Opaque reference to the deliverable, set at delivery
    pub deliverable_link: Option<String>,
    /// Current lifecycle status
    pub status: AgreementStatus,
    /// Dispute bookkeeping, present once a dispute is opened
    pub dispute: Option<DisputeFile>,
    /// When the agreement was created
    pub created_at: DateTime<Utc>,
}

impl EscrowAgreement {
    /// Create a new agreement in `Created` status.
    ///
    /// `collateral` is the policy-derived figure; the engine computes it from
    /// the trust registry before calling this.
    pub fn new(params: CreateAgreementParams, collateral: Amount) -> Self {
        Self {
            id: AgreementId::new(),
            client: params.client,
            freelancer: params.freelancer,
            arbiter: params.arbiter,
            amount: params.amount,
            collateral,
            deadline: params.deadline,
            content_hash: params.content_hash,
            deliverable_link: None,
            status: AgreementStatus::Created,
            dispute: None,
            created_at: Utc::now(),
        }
    }

    /// Balance currently custodied by the agreement.
    ///
    /// The client's amount is held from creation; the freelancer's collateral
    /// only once the agreement is `Active` or beyond.
    pub fn custodied_balance(&self) -> Amount {
        if self.status.holds_collateral() {
            self.amount.saturating_add(self.collateral)
        } else {
            self.amount
        }
    }

    /// `amount + collateral`, the balance every post-acceptance terminal
    /// transition disburses
    pub fn total(&self) -> Amount {
        self.amount.saturating_add(self.collateral)
    }

    /// Earliest instant at which `auto_claim` succeeds
    pub fn auto_claim_available_at(&self) -> DateTime<Utc> {
        self.deadline + Duration::hours(AUTO_CLAIM_GRACE_HOURS)
    }

    // ------------------------------------------------------------------
    // Guards
    // ------------------------------------------------------------------

    fn require_client(&self, caller: &PrincipalId) -> Result<()> {
        if caller != &self.client {
            return Err(EscrowError::OnlyClient);
        }
        Ok(())
    }

    fn require_freelancer(&self, caller: &PrincipalId) -> Result<()> {
        if caller != &self.freelancer {
            return Err(EscrowError::OnlyFreelancer);
        }
        Ok(())
    }

    fn require_arbiter(&self, caller: &PrincipalId) -> Result<()> {
        if caller != &self.arbiter {
            return Err(EscrowError::OnlyArbiter);
        }
        Ok(())
    }

    fn require_party(&self, caller: &PrincipalId) -> Result<()> {
        if caller != &self.client && caller != &self.freelancer {
            return Err(EscrowError::OnlyClientOrFreelancer);
        }
        Ok(())
    }

    fn require_status(&self, expected: AgreementStatus) -> Result<()> {
        if self.status != expected {
            return Err(EscrowError::InvalidStatus);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Non-terminal transitions
    // ------------------------------------------------------------------

    /// Freelancer accepts the agreement and deposits collateral.
    ///
    /// `Created -> Active`.
    pub fn accept_and_deposit(&mut self, caller: &PrincipalId) -> Result<EscrowEvent> {
        self.require_freelancer(caller)?;
        self.require_status(AgreementStatus::Created)?;

        self.status = AgreementStatus::Active;
        Ok(EscrowEvent::FreelancerAccepted {
            freelancer: self.freelancer.clone(),
            collateral: self.collateral,
        })
    }

    /// Freelancer delivers the work, recording an opaque deliverable link.
    ///
    /// `Active -> Delivered`.
    pub fn deliver(&mut self, caller: &PrincipalId, link: impl Into<String>) -> Result<EscrowEvent> {
        self.require_freelancer(caller)?;
        self.require_status(AgreementStatus::Active)?;

        let link = link.into();
        self.deliverable_link = Some(link.clone());
        self.status = AgreementStatus::Delivered;
        Ok(EscrowEvent::WorkDelivered { link })
    }

    /// Either contracting party opens a dispute.
    ///
    /// `Active | Delivered -> Disputed`.
    pub fn open_dispute(
        &mut self,
        caller: &PrincipalId,
        reason: impl Into<String>,
        evidence: Option<String>,
    ) -> Result<EscrowEvent> {
        self.require_party(caller)?;
        if !self.status.disputable() {
            return Err(EscrowError::InvalidStatus);
        }

        self.dispute = Some(DisputeFile {
            opened_by: caller.clone(),
            reason: reason.into(),
            evidence,
        });
        self.status = AgreementStatus::Disputed;
        Ok(EscrowEvent::DisputeOpened {
            opener: caller.clone(),
        })
    }

    // ------------------------------------------------------------------
    // Terminal transitions (pure: the engine removes the agreement and the
    // host executes the payouts)
    // ------------------------------------------------------------------

    /// Client confirms delivery; the freelancer receives the full balance.
    pub fn release(&self, caller: &PrincipalId) -> Result<Settlement> {
        self.require_client(caller)?;
        self.require_status(AgreementStatus::Delivered)?;

        Ok(Settlement::single(
            self.freelancer.clone(),
            self.total(),
            EscrowEvent::PaymentReleased {
                to: self.freelancer.clone(),
                total_amount: self.total(),
            },
        ))
    }

    /// Arbiter resolves the dispute with a proportional split.
    ///
    /// The freelancer receives `floor(total * percent / 100)`, the client the
    /// remainder; the two always sum to the custodied balance.
    pub fn resolve(&self, caller: &PrincipalId, decision: &Decision) -> Result<Settlement> {
        self.require_arbiter(caller)?;
        self.require_status(AgreementStatus::Disputed)?;

        let (to_freelancer, to_client) = self.total().split_percent(decision.freelancer_percent);
        Ok(Settlement::pair(
            (self.freelancer.clone(), to_freelancer),
            (self.client.clone(), to_client),
            EscrowEvent::DisputeResolved {
                freelancer_percent: decision.freelancer_percent,
                justification: decision.justification.clone(),
            },
        ))
    }

    /// Client cancels before the freelancer has accepted. Only the client's
    /// amount is custodied at this point, and it is refunded in full.
    pub fn cancel_by_client(&self, caller: &PrincipalId) -> Result<Settlement> {
        self.require_client(caller)?;
        self.require_status(AgreementStatus::Created)?;

        Ok(Settlement::single(
            self.client.clone(),
            self.amount,
            EscrowEvent::EscrowCancelled,
        ))
    }

    /// Freelancer walks away from an active agreement, returning the client's
    /// amount and reclaiming their own collateral.
    pub fn refund_by_freelancer(&self, caller: &PrincipalId) -> Result<Settlement> {
        self.require_freelancer(caller)?;
        self.require_status(AgreementStatus::Active)?;

        Ok(Settlement::pair(
            (self.client.clone(), self.amount),
            (self.freelancer.clone(), self.collateral),
            EscrowEvent::FreelancerRefunded {
                freelancer: self.freelancer.clone(),
            },
        ))
    }

    /// Freelancer claims a delivered-but-unconfirmed agreement once the
    /// grace period has elapsed. Boundary-inclusive: succeeds at exactly
    /// `deadline + 48h`.
    ///
    /// `now` is caller-supplied; the core never reads the clock in a guard.
    pub fn auto_claim(&self, caller: &PrincipalId, now: DateTime<Utc>) -> Result<Settlement> {
        self.require_freelancer(caller)?;
        self.require_status(AgreementStatus::Delivered)?;
        if now < self.auto_claim_available_at() {
            return Err(EscrowError::AutoClaimTooEarly);
        }

        Ok(Settlement::single(
            self.freelancer.clone(),
            self.total(),
            EscrowEvent::PaymentReleased {
                to: self.freelancer.clone(),
                total_amount: self.total(),
            },
        ))
    }
}
