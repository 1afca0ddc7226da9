//! Worklock Types - Canonical domain types for trust-weighted work escrow
//!
//! This crate contains all foundational types for Worklock with zero
//! dependencies on other worklock crates. It defines:
//!
//! - Identity types (PrincipalId, AgreementId)
//! - The Amount type (smallest host unit, integer arithmetic only)
//! - Agreement status and the dispute resolution Decision
//! - Event schemas, one per successful transition
//! - The escrow error taxonomy
//!
//! # Architectural Invariants
//!
//! 1. Funds move only on a successful transition, never on a failed guard
//! 2. Every successful transition emits exactly one event
//! 3. Terminal transitions disburse the full custodied balance, no residue

pub mod amount;
pub mod decision;
pub mod error;
pub mod event;
pub mod identity;
pub mod status;

pub use amount::*;
pub use decision::*;
pub use error::*;
pub use event::*;
pub use identity::*;
pub use status::*;

/// Version of the Worklock types schema
pub const TYPES_VERSION: &str = "0.1.0";
