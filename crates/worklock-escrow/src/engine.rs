//! The escrow engine - keyed store of live agreements
//!
//! The engine owns the [`TrustRegistry`] it consults at creation time and a
//! map of live agreements. Terminal transitions remove the agreement in the
//! same call that returns the settlement, so an agreement is either live and
//! fully funded or gone and fully disbursed - never in between.
//!
//! The engine holds no lock: the host serializes transitions against the
//! same agreement, which `&mut self` makes explicit. The engine never wires
//! escrow outcomes back into trust scores; score bookkeeping belongs to the
//! surrounding system.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::info;
use worklock_trust::TrustRegistry;
use worklock_types::{
    AgreementId, Decision, EscrowError, EscrowEvent, PrincipalId, Result,
};

use crate::agreement::{CreateAgreementParams, EscrowAgreement};
use crate::settlement::Settlement;

/// The Worklock escrow engine
#[derive(Debug, Default)]
pub struct EscrowEngine {
    agreements: HashMap<AgreementId, EscrowAgreement>,
    trust: TrustRegistry,
}

impl EscrowEngine {
    /// Create an engine with an empty trust registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine over an existing trust registry
    pub fn with_trust(trust: TrustRegistry) -> Self {
        Self {
            agreements: HashMap::new(),
            trust,
        }
    }

    /// Create an agreement.
    ///
    /// This is the one place the collateral policy runs: the freelancer's
    /// current score sizes the collateral, and the figure is fixed for the
    /// agreement's lifetime.
    pub fn create_agreement(&mut self, params: CreateAgreementParams) -> AgreementId {
        let collateral =
            worklock_policy::collateral_for(&self.trust, params.amount, &params.freelancer);
        let agreement = EscrowAgreement::new(params, collateral);
        let id = agreement.id.clone();
        info!(
            agreement = %id,
            client = %agreement.client,
            freelancer = %agreement.freelancer,
            amount = %agreement.amount,
            collateral = %agreement.collateral,
            "agreement created"
        );
        self.agreements.insert(id.clone(), agreement);
        id
    }

    /// Freelancer accepts and deposits collateral
    pub fn accept_and_deposit(
        &mut self,
        id: &AgreementId,
        caller: &PrincipalId,
    ) -> Result<EscrowEvent> {
        let event = self.live_mut(id)?.accept_and_deposit(caller)?;
        info!(agreement = %id, event = event.kind(), "transition applied");
        Ok(event)
    }

    /// Freelancer delivers the work
    pub fn deliver(
        &mut self,
        id: &AgreementId,
        caller: &PrincipalId,
        link: impl Into<String>,
    ) -> Result<EscrowEvent> {
        let event = self.live_mut(id)?.deliver(caller, link)?;
        info!(agreement = %id, event = event.kind(), "transition applied");
        Ok(event)
    }

    /// A contracting party opens a dispute
    pub fn dispute(
        &mut self,
        id: &AgreementId,
        caller: &PrincipalId,
        reason: impl Into<String>,
        evidence: Option<String>,
    ) -> Result<EscrowEvent> {
        let event = self.live_mut(id)?.open_dispute(caller, reason, evidence)?;
        info!(agreement = %id, event = event.kind(), "transition applied");
        Ok(event)
    }

    /// Client confirms delivery and releases the full balance
    pub fn release(&mut self, id: &AgreementId, caller: &PrincipalId) -> Result<Settlement> {
        self.settle(id, |agreement| agreement.release(caller))
    }

    /// Arbiter resolves a disputed agreement
    pub fn resolve(
        &mut self,
        id: &AgreementId,
        caller: &PrincipalId,
        decision: &Decision,
    ) -> Result<Settlement> {
        self.settle(id, |agreement| agreement.resolve(caller, decision))
    }

    /// Client cancels before acceptance
    pub fn cancel_by_client(
        &mut self,
        id: &AgreementId,
        caller: &PrincipalId,
    ) -> Result<Settlement> {
        self.settle(id, |agreement| agreement.cancel_by_client(caller))
    }

    /// Freelancer walks away from an active agreement
    pub fn refund_by_freelancer(
        &mut self,
        id: &AgreementId,
        caller: &PrincipalId,
    ) -> Result<Settlement> {
        self.settle(id, |agreement| agreement.refund_by_freelancer(caller))
    }

    /// Freelancer claims a delivered agreement after the grace period
    pub fn auto_claim(
        &mut self,
        id: &AgreementId,
        caller: &PrincipalId,
        now: DateTime<Utc>,
    ) -> Result<Settlement> {
        self.settle(id, |agreement| agreement.auto_claim(caller, now))
    }

    /// Read an agreement's full current field set (no side effects)
    pub fn get(&self, id: &AgreementId) -> Option<&EscrowAgreement> {
        self.agreements.get(id)
    }

    /// Iterate over live agreements
    pub fn agreements(&self) -> impl Iterator<Item = &EscrowAgreement> {
        self.agreements.values()
    }

    /// Number of live agreements
    pub fn len(&self) -> usize {
        self.agreements.len()
    }

    /// Whether no agreements are live
    pub fn is_empty(&self) -> bool {
        self.agreements.is_empty()
    }

    /// Read access to the trust registry
    pub fn trust(&self) -> &TrustRegistry {
        &self.trust
    }

    /// Write access to the trust registry, for host-side score bookkeeping
    pub fn trust_mut(&mut self) -> &mut TrustRegistry {
        &mut self.trust
    }

    fn live_mut(&mut self, id: &AgreementId) -> Result<&mut EscrowAgreement> {
        self.agreements
            .get_mut(id)
            .ok_or_else(|| EscrowError::AgreementNotFound {
                agreement_id: id.to_string(),
            })
    }

    /// Run a terminal transition: compute the settlement against the live
    /// agreement, and only on success remove it from the store.
    fn settle<F>(&mut self, id: &AgreementId, f: F) -> Result<Settlement>
    where
        F: FnOnce(&EscrowAgreement) -> Result<Settlement>,
    {
        let agreement = self
            .agreements
            .get(id)
            .ok_or_else(|| EscrowError::AgreementNotFound {
                agreement_id: id.to_string(),
            })?;
        let settlement = f(agreement)?;

        self.agreements.remove(id);
        info!(
            agreement = %id,
            event = settlement.event.kind(),
            disbursed = %settlement.total_disbursed(),
            "agreement settled and destroyed"
        );
        Ok(settlement)
    }
}
