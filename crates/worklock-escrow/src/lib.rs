//! Worklock Escrow - agreement lifecycle and trust-weighted settlement
//!
//! An [`EscrowAgreement`] custodies a client's payment and a freelancer's
//! collateral, and walks a small state machine:
//!
//! ```text
//! Created -> Active -> Delivered
//!               \         |
//!                \        v
//!                 +--> Disputed
//! ```
//!
//! Every path ends by destroying the agreement: release, resolve, cancel,
//! refund, and auto-claim each disburse the full custodied balance and remove
//! the agreement from the [`EscrowEngine`] in the same step. There is no
//! standalone "completed" state.
//!
//! # Key Principles
//!
//! - Guards run before any mutation; a rejected transition changes nothing
//! - Each successful transition emits exactly one [`EscrowEvent`]
//! - Terminal payouts always sum to the custodied balance exactly
//! - The engine never locks and never reads the clock: the host serializes
//!   transitions per agreement and supplies `now` to `auto_claim`

pub mod agreement;
pub mod engine;
pub mod settlement;

pub use agreement::{
    CreateAgreementParams, DisputeFile, EscrowAgreement, AUTO_CLAIM_GRACE_HOURS,
};
pub use engine::EscrowEngine;
pub use settlement::{Payout, Settlement};

pub use worklock_types::{
    AgreementId, AgreementStatus, Amount, Decision, EscrowError, EscrowEvent, PrincipalId, Result,
};
