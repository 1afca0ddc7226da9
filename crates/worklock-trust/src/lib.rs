//! Worklock Trust Registry - reputation scores for freelancers
//!
//! A keyed store mapping a freelancer principal to an integer reputation
//! score in `[0, 100]`. A freelancer with no history reads as the default
//! score of 50; a record is only persisted on first mutation.
//!
//! # Invariants
//!
//! 1. Scores are clamped to `[0, 100]` after every mutation
//! 2. Reads never fail
//! 3. Records are never deleted
//!
//! The registry holds no lock of its own: the host serializes mutations
//! against the same key, and `&mut self` on the mutating methods makes that
//! contract explicit in the API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;
use worklock_types::{PrincipalId, ScoreUpdated};

/// Score assigned to a freelancer with no recorded history
pub const DEFAULT_SCORE: u8 = 50;

/// Maximum reputation score
pub const MAX_SCORE: u8 = 100;

/// Capability token authorizing score mutations.
///
/// Reads are open; writes are not. The surrounding system decides which of
/// its components may mint this token and hands it to them - the registry
/// itself has no notion of who the writer is.
#[derive(Debug)]
pub struct ScoreWriteCapability {
    _private: (),
}

impl ScoreWriteCapability {
    /// Mint a write capability. Host-side code only.
    pub fn grant() -> Self {
        Self { _private: () }
    }
}

/// The Worklock trust registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustRegistry {
    scores: HashMap<PrincipalId, u8>,
}

impl TrustRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
        }
    }

    /// Get a freelancer's score, or [`DEFAULT_SCORE`] if unknown. Never fails.
    pub fn get_score(&self, freelancer: &PrincipalId) -> u8 {
        self.scores.get(freelancer).copied().unwrap_or(DEFAULT_SCORE)
    }

    /// Raise a freelancer's score by `delta`, clamped to [`MAX_SCORE`].
    pub fn increase_score(
        &mut self,
        _cap: &ScoreWriteCapability,
        freelancer: &PrincipalId,
        delta: u8,
    ) -> ScoreUpdated {
        let new_score = self.get_score(freelancer).saturating_add(delta).min(MAX_SCORE);
        self.scores.insert(freelancer.clone(), new_score);
        info!(freelancer = %freelancer, new_score, "trust score increased");
        ScoreUpdated {
            freelancer: freelancer.clone(),
            new_score,
        }
    }

    /// Lower a freelancer's score by `delta`, clamped to zero.
    pub fn decrease_score(
        &mut self,
        _cap: &ScoreWriteCapability,
        freelancer: &PrincipalId,
        delta: u8,
    ) -> ScoreUpdated {
        let new_score = self.get_score(freelancer).saturating_sub(delta);
        self.scores.insert(freelancer.clone(), new_score);
        info!(freelancer = %freelancer, new_score, "trust score decreased");
        ScoreUpdated {
            freelancer: freelancer.clone(),
            new_score,
        }
    }

    /// Whether the freelancer has a persisted record
    pub fn contains(&self, freelancer: &PrincipalId) -> bool {
        self.scores.contains_key(freelancer)
    }

    /// Number of persisted records
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no records have been persisted yet
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap() -> ScoreWriteCapability {
        ScoreWriteCapability::grant()
    }

    #[test]
    fn test_unknown_freelancer_reads_default() {
        let registry = TrustRegistry::new();
        let freelancer = PrincipalId::new();
        assert_eq!(registry.get_score(&freelancer), DEFAULT_SCORE);
        assert!(!registry.contains(&freelancer));
    }

    #[test]
    fn test_read_does_not_persist() {
        let registry = TrustRegistry::new();
        let freelancer = PrincipalId::new();
        let _ = registry.get_score(&freelancer);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_increase_persists_and_emits() {
        let mut registry = TrustRegistry::new();
        let freelancer = PrincipalId::new();

        let event = registry.increase_score(&cap(), &freelancer, 10);
        assert_eq!(event.new_score, 60);
        assert_eq!(event.freelancer, freelancer);
        assert!(registry.contains(&freelancer));
        assert_eq!(registry.get_score(&freelancer), 60);
    }

    #[test]
    fn test_increase_clamps_at_100() {
        let mut registry = TrustRegistry::new();
        let freelancer = PrincipalId::new();

        let event = registry.increase_score(&cap(), &freelancer, 200);
        assert_eq!(event.new_score, MAX_SCORE);
        assert_eq!(registry.get_score(&freelancer), MAX_SCORE);

        // Already at the ceiling; another raise is a no-op
        let event = registry.increase_score(&cap(), &freelancer, 1);
        assert_eq!(event.new_score, MAX_SCORE);
    }

    #[test]
    fn test_decrease_clamps_at_zero() {
        let mut registry = TrustRegistry::new();
        let freelancer = PrincipalId::new();

        let event = registry.decrease_score(&cap(), &freelancer, 255);
        assert_eq!(event.new_score, 0);
        assert_eq!(registry.get_score(&freelancer), 0);
    }

    #[test]
    fn test_keys_are_independent() {
        let mut registry = TrustRegistry::new();
        let a = PrincipalId::new();
        let b = PrincipalId::new();

        registry.increase_score(&cap(), &a, 30);
        registry.decrease_score(&cap(), &b, 30);

        assert_eq!(registry.get_score(&a), 80);
        assert_eq!(registry.get_score(&b), 20);
        assert_eq!(registry.len(), 2);
    }
}
