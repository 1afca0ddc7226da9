//! Arbiter decision payload
//!
//! Two resolution shapes exist in the wild: a binary "award to freelancer
//! yes/no" and a proportional split with a justification. Worklock models the
//! superset: every decision is a split, and the binary awards are the 100%
//! and 0% special cases. There is exactly one resolution code path.

use serde::{Deserialize, Serialize};

/// The arbiter's decision when resolving a disputed agreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Share of the custodied total awarded to the freelancer, in percent.
    /// The client receives the remainder.
    pub freelancer_percent: u8,
    /// Free-text justification recorded with the resolution
    pub justification: String,
}

impl Decision {
    /// Proportional split. A percent above 100 is clamped to 100.
    pub fn split(freelancer_percent: u8, justification: impl Into<String>) -> Self {
        Self {
            freelancer_percent: freelancer_percent.min(100),
            justification: justification.into(),
        }
    }

    /// Binary award: everything to the freelancer
    pub fn award_freelancer(justification: impl Into<String>) -> Self {
        Self::split(100, justification)
    }

    /// Binary award: everything back to the client
    pub fn award_client(justification: impl Into<String>) -> Self {
        Self::split(0, justification)
    }
}
