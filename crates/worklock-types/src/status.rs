//! Agreement lifecycle status
//!
//! There is deliberately no terminal status variant: an agreement that
//! completes (release, resolve, cancel, refund, or auto-claim) is destroyed
//! in the same transition that disburses its balance. A status value only
//! ever describes a live agreement.

use serde::{Deserialize, Serialize};

/// The lifecycle status of a live escrow agreement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgreementStatus {
    /// Agreement created by the client; awaiting the freelancer's collateral
    Created,
    /// Freelancer has deposited collateral; work is in progress
    Active,
    /// Freelancer has delivered; awaiting the client's release
    Delivered,
    /// A party has disputed; awaiting the arbiter's decision
    Disputed,
}

impl AgreementStatus {
    /// Whether the agreement custodies the freelancer's collateral yet.
    ///
    /// Collateral is only present once the freelancer has accepted.
    pub fn holds_collateral(&self) -> bool {
        !matches!(self, Self::Created)
    }

    /// Whether a dispute may be opened from this status
    pub fn disputable(&self) -> bool {
        matches!(self, Self::Active | Self::Delivered)
    }
}

impl std::fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Active => "active",
            Self::Delivered => "delivered",
            Self::Disputed => "disputed",
        };
        write!(f, "{}", s)
    }
}
