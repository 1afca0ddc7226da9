//! Error taxonomy for Worklock
//!
//! Every failure is a guard violation evaluated before any mutation. A
//! rejected transition moves no funds, emits no event, and changes no status;
//! the caller corrects (wrong caller, wrong status, or premature timing) and
//! resubmits. This taxonomy is the entire user-visible failure surface.

use thiserror::Error;

/// Result type for Worklock operations
pub type Result<T> = std::result::Result<T, EscrowError>;

/// Worklock escrow error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscrowError {
    /// Transition reserved for the agreement's client
    #[error("Only the client may perform this action")]
    OnlyClient,

    /// Transition reserved for the agreement's freelancer
    #[error("Only the freelancer may perform this action")]
    OnlyFreelancer,

    /// Transition reserved for the agreement's arbiter
    #[error("Only the arbiter may perform this action")]
    OnlyArbiter,

    /// Transition reserved for either contracting party
    #[error("Only the client or the freelancer may perform this action")]
    OnlyClientOrFreelancer,

    /// Agreement is not in a status that permits this transition
    #[error("Invalid agreement status for this action")]
    InvalidStatus,

    /// Auto-claim attempted before the deadline grace period elapsed
    #[error("Auto-claim is not yet available")]
    AutoClaimTooEarly,

    /// No agreement with this ID exists (never created, or already settled)
    #[error("Agreement {agreement_id} not found")]
    AgreementNotFound { agreement_id: String },
}
