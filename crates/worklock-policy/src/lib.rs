//! Worklock Collateral Policy - trust-weighted collateral sizing
//!
//! The policy is a pure function of the base amount and the freelancer's
//! trust score. A freelancer with no history (default score 50) posts 50%
//! collateral; a freelancer at the score floor posts 100%; a freelancer at
//! maximal trust still posts [`MIN_COLLATERAL_PERCENT`].
//!
//! The escrow engine consults this policy exactly once, at agreement
//! creation. The collateral figure is fixed thereafter, regardless of later
//! score changes.

use worklock_trust::TrustRegistry;
use worklock_types::{Amount, PrincipalId};

/// Floor on the collateral percentage, applied at maximal trust
pub const MIN_COLLATERAL_PERCENT: u8 = 10;

/// Collateral percentage for a given trust score: `max(10, 100 - score)`.
///
/// Scores above 100 cannot occur (the registry clamps), but are treated as
/// 100 here so the function is total over `u8`.
pub fn collateral_percent(score: u8) -> u8 {
    (100u8.saturating_sub(score)).max(MIN_COLLATERAL_PERCENT)
}

/// Required collateral for a base amount at a given score.
///
/// `floor(base * percent / 100)` in integer arithmetic; never rounds up.
pub fn required_collateral(base: Amount, score: u8) -> Amount {
    base.percent_floor(collateral_percent(score))
}

/// Required collateral for a freelancer, looking the score up in the
/// registry. This is the single registry read the escrow engine performs.
pub fn collateral_for(registry: &TrustRegistry, base: Amount, freelancer: &PrincipalId) -> Amount {
    required_collateral(base, registry.get_score(freelancer))
}
