//! Terminal settlement of an agreement
//!
//! A [`Settlement`] is the full outcome of a terminal transition: the event
//! to append and the payouts the host must execute while destroying the
//! agreement. Payouts are instructions for the host's transfer primitive -
//! the core computes them, it never moves value itself.

use serde::{Deserialize, Serialize};
use worklock_types::{Amount, EscrowEvent, PrincipalId};

/// A single payout instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Recipient principal
    pub to: PrincipalId,
    /// Value to transfer, in the smallest host unit
    pub amount: Amount,
}

/// Outcome of a terminal transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The event this transition emits
    pub event: EscrowEvent,
    /// Payouts disbursing the full custodied balance. Zero-amount payouts
    /// are dropped, so a 100/0 split carries a single entry.
    pub payouts: Vec<Payout>,
}

impl Settlement {
    /// Settlement paying the whole balance to a single party
    pub fn single(to: PrincipalId, amount: Amount, event: EscrowEvent) -> Self {
        let mut settlement = Self {
            event,
            payouts: Vec::new(),
        };
        settlement.push(to, amount);
        settlement
    }

    /// Settlement splitting the balance between two parties
    pub fn pair(
        first: (PrincipalId, Amount),
        second: (PrincipalId, Amount),
        event: EscrowEvent,
    ) -> Self {
        let mut settlement = Self {
            event,
            payouts: Vec::new(),
        };
        settlement.push(first.0, first.1);
        settlement.push(second.0, second.1);
        settlement
    }

    fn push(&mut self, to: PrincipalId, amount: Amount) {
        if !amount.is_zero() {
            self.payouts.push(Payout { to, amount });
        }
    }

    /// Total value disbursed by this settlement
    pub fn total_disbursed(&self) -> Amount {
        self.payouts
            .iter()
            .fold(Amount::zero(), |acc, p| acc.saturating_add(p.amount))
    }

    /// Value disbursed to one principal (zero if not a recipient)
    pub fn paid_to(&self, principal: &PrincipalId) -> Amount {
        self.payouts
            .iter()
            .filter(|p| &p.to == principal)
            .fold(Amount::zero(), |acc, p| acc.saturating_add(p.amount))
    }
}
