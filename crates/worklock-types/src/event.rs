//! Event schemas
//!
//! Every successful transition emits exactly one event; failed guards emit
//! nothing. Events are append-only facts for the host to index - the core
//! never consumes its own events.

use crate::{Amount, PrincipalId};
use serde::{Deserialize, Serialize};

/// Event emitted by a successful escrow transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowEvent {
    /// Freelancer accepted the agreement and deposited collateral
    FreelancerAccepted {
        freelancer: PrincipalId,
        collateral: Amount,
    },
    /// Freelancer delivered the work
    WorkDelivered { link: String },
    /// Full custodied balance paid out to one party
    PaymentReleased {
        to: PrincipalId,
        total_amount: Amount,
    },
    /// A party opened a dispute
    DisputeOpened { opener: PrincipalId },
    /// Arbiter resolved the dispute
    DisputeResolved {
        freelancer_percent: u8,
        justification: String,
    },
    /// Client cancelled before the freelancer accepted
    EscrowCancelled,
    /// Freelancer walked away, refunding both parties
    FreelancerRefunded { freelancer: PrincipalId },
}

impl EscrowEvent {
    /// Short machine-readable name for logs and indexing
    pub fn kind(&self) -> &'static str {
        match self {
            Self::FreelancerAccepted { .. } => "freelancer_accepted",
            Self::WorkDelivered { .. } => "work_delivered",
            Self::PaymentReleased { .. } => "payment_released",
            Self::DisputeOpened { .. } => "dispute_opened",
            Self::DisputeResolved { .. } => "dispute_resolved",
            Self::EscrowCancelled => "escrow_cancelled",
            Self::FreelancerRefunded { .. } => "freelancer_refunded",
        }
    }
}

/// Event emitted by a trust registry mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreUpdated {
    pub freelancer: PrincipalId,
    pub new_score: u8,
}
