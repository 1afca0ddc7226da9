//! End-to-end lifecycle scenarios for the escrow engine
//!
//! These walk full agreement lifetimes through the public engine API and
//! check the two properties every terminal path must satisfy: the payouts
//! conserve the custodied balance exactly, and the agreement is destroyed.

use chrono::{Duration, Utc};
use worklock_escrow::{
    AgreementStatus, Amount, CreateAgreementParams, Decision, EscrowEngine, EscrowError,
    EscrowEvent, PrincipalId,
};
use worklock_trust::ScoreWriteCapability;

struct Parties {
    client: PrincipalId,
    freelancer: PrincipalId,
    arbiter: PrincipalId,
}

impl Parties {
    fn new() -> Self {
        Self {
            client: PrincipalId::new(),
            freelancer: PrincipalId::new(),
            arbiter: PrincipalId::new(),
        }
    }

    fn params(&self, amount: u64) -> CreateAgreementParams {
        CreateAgreementParams {
            client: self.client.clone(),
            freelancer: self.freelancer.clone(),
            arbiter: self.arbiter.clone(),
            amount: Amount::new(amount),
            deadline: Utc::now() + Duration::days(7),
            content_hash: "Qm-deal-description".to_string(),
        }
    }
}

#[test]
fn happy_path_release_pays_freelancer_fifteen() {
    let mut engine = EscrowEngine::new();
    let parties = Parties::new();

    // Unknown freelancer: default score 50 -> 50% collateral on 10
    let id = engine.create_agreement(parties.params(10));
    let agreement = engine.get(&id).unwrap();
    assert_eq!(agreement.status, AgreementStatus::Created);
    assert_eq!(agreement.collateral, Amount::new(5));

    let event = engine.accept_and_deposit(&id, &parties.freelancer).unwrap();
    assert!(matches!(event, EscrowEvent::FreelancerAccepted { .. }));
    assert_eq!(engine.get(&id).unwrap().status, AgreementStatus::Active);

    let event = engine.deliver(&id, &parties.freelancer, "L").unwrap();
    assert_eq!(event, EscrowEvent::WorkDelivered { link: "L".into() });
    let agreement = engine.get(&id).unwrap();
    assert_eq!(agreement.status, AgreementStatus::Delivered);
    assert_eq!(agreement.deliverable_link.as_deref(), Some("L"));

    let settlement = engine.release(&id, &parties.client).unwrap();
    assert_eq!(settlement.paid_to(&parties.freelancer), Amount::new(15));
    assert_eq!(settlement.total_disbursed(), Amount::new(15));
    assert!(engine.get(&id).is_none());
}

#[test]
fn dispute_from_delivered_resolved_fully_to_freelancer() {
    let mut engine = EscrowEngine::new();
    let parties = Parties::new();

    let id = engine.create_agreement(parties.params(10));
    engine.accept_and_deposit(&id, &parties.freelancer).unwrap();
    engine.deliver(&id, &parties.freelancer, "L").unwrap();

    let event = engine
        .dispute(&id, &parties.client, "quality concerns", None)
        .unwrap();
    assert_eq!(
        event,
        EscrowEvent::DisputeOpened {
            opener: parties.client.clone()
        }
    );
    assert_eq!(engine.get(&id).unwrap().status, AgreementStatus::Disputed);

    let settlement = engine
        .resolve(&id, &parties.arbiter, &Decision::split(100, "ok"))
        .unwrap();
    assert_eq!(settlement.paid_to(&parties.freelancer), Amount::new(15));
    assert_eq!(settlement.paid_to(&parties.client), Amount::zero());
    assert_eq!(
        settlement.event,
        EscrowEvent::DisputeResolved {
            freelancer_percent: 100,
            justification: "ok".to_string(),
        }
    );
    assert!(engine.get(&id).is_none());
}

#[test]
fn proportional_resolution_conserves_odd_totals() {
    let mut engine = EscrowEngine::new();
    let parties = Parties::new();

    // amount 11, collateral 5 (floor of 5.5): total 16
    let id = engine.create_agreement(parties.params(11));
    assert_eq!(engine.get(&id).unwrap().collateral, Amount::new(5));

    engine.accept_and_deposit(&id, &parties.freelancer).unwrap();
    engine
        .dispute(&id, &parties.freelancer, "scope", Some("Qm-evidence".into()))
        .unwrap();

    for percent in 0..=100u8 {
        let settlement = engine
            .get(&id)
            .unwrap()
            .resolve(&parties.arbiter, &Decision::split(percent, "split"))
            .unwrap();
        assert_eq!(
            settlement.total_disbursed(),
            Amount::new(16),
            "leakage at {}%",
            percent
        );
    }

    // 16 * 33% = 5 to the freelancer, 11 back to the client
    let settlement = engine
        .resolve(&id, &parties.arbiter, &Decision::split(33, "one third"))
        .unwrap();
    assert_eq!(settlement.paid_to(&parties.freelancer), Amount::new(5));
    assert_eq!(settlement.paid_to(&parties.client), Amount::new(11));
}

#[test]
fn cancel_before_acceptance_refunds_client() {
    let mut engine = EscrowEngine::new();
    let parties = Parties::new();

    let id = engine.create_agreement(parties.params(10));
    let settlement = engine.cancel_by_client(&id, &parties.client).unwrap();

    assert_eq!(settlement.paid_to(&parties.client), Amount::new(10));
    assert_eq!(settlement.total_disbursed(), Amount::new(10));
    assert!(engine.get(&id).is_none());
}

#[test]
fn freelancer_walkaway_returns_both_deposits() {
    let mut engine = EscrowEngine::new();
    let parties = Parties::new();

    let id = engine.create_agreement(parties.params(10));
    engine.accept_and_deposit(&id, &parties.freelancer).unwrap();

    let settlement = engine
        .refund_by_freelancer(&id, &parties.freelancer)
        .unwrap();
    assert_eq!(settlement.paid_to(&parties.client), Amount::new(10));
    assert_eq!(settlement.paid_to(&parties.freelancer), Amount::new(5));
    assert!(engine.get(&id).is_none());
}

#[test]
fn auto_claim_after_grace_period() {
    let mut engine = EscrowEngine::new();
    let parties = Parties::new();

    let id = engine.create_agreement(parties.params(10));
    engine.accept_and_deposit(&id, &parties.freelancer).unwrap();
    engine.deliver(&id, &parties.freelancer, "L").unwrap();

    let available_at = engine.get(&id).unwrap().auto_claim_available_at();

    assert_eq!(
        engine.auto_claim(&id, &parties.freelancer, available_at - Duration::hours(1)),
        Err(EscrowError::AutoClaimTooEarly)
    );
    assert!(engine.get(&id).is_some());

    let settlement = engine
        .auto_claim(&id, &parties.freelancer, available_at)
        .unwrap();
    assert_eq!(settlement.paid_to(&parties.freelancer), Amount::new(15));
    assert!(matches!(
        settlement.event,
        EscrowEvent::PaymentReleased { .. }
    ));
    assert!(engine.get(&id).is_none());
}

#[test]
fn transition_matrix_rejections_leave_state_unchanged() {
    let mut engine = EscrowEngine::new();
    let parties = Parties::new();
    let now = Utc::now();

    // From Created: everything except accept and cancel is rejected
    let id = engine.create_agreement(parties.params(10));
    let before = engine.get(&id).unwrap().clone();

    assert_eq!(
        engine.deliver(&id, &parties.freelancer, "L"),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.release(&id, &parties.client),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.dispute(&id, &parties.client, "r", None),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.resolve(&id, &parties.arbiter, &Decision::award_client("")),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.refund_by_freelancer(&id, &parties.freelancer),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.auto_claim(&id, &parties.freelancer, now + Duration::days(30)),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(engine.get(&id).unwrap(), &before);

    // Caller guards take precedence over status guards
    assert_eq!(
        engine.accept_and_deposit(&id, &parties.client),
        Err(EscrowError::OnlyFreelancer)
    );
    assert_eq!(
        engine.cancel_by_client(&id, &parties.freelancer),
        Err(EscrowError::OnlyClient)
    );
    assert_eq!(engine.get(&id).unwrap(), &before);

    // From Disputed: only the arbiter's resolve is accepted
    engine.accept_and_deposit(&id, &parties.freelancer).unwrap();
    engine.dispute(&id, &parties.freelancer, "r", None).unwrap();
    let before = engine.get(&id).unwrap().clone();

    assert_eq!(
        engine.accept_and_deposit(&id, &parties.freelancer),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.deliver(&id, &parties.freelancer, "L"),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.release(&id, &parties.client),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.dispute(&id, &parties.client, "again", None),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.refund_by_freelancer(&id, &parties.freelancer),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(
        engine.auto_claim(&id, &parties.freelancer, now + Duration::days(30)),
        Err(EscrowError::InvalidStatus)
    );
    assert_eq!(engine.get(&id).unwrap(), &before);
}

#[test]
fn high_trust_freelancer_posts_floor_collateral() {
    let mut engine = EscrowEngine::new();
    let cap = ScoreWriteCapability::grant();
    let parties = Parties::new();

    engine
        .trust_mut()
        .increase_score(&cap, &parties.freelancer, 50); // score 100

    let id = engine.create_agreement(parties.params(100));
    let agreement = engine.get(&id).unwrap();
    assert_eq!(agreement.collateral, Amount::new(10)); // 10% floor

    engine.accept_and_deposit(&id, &parties.freelancer).unwrap();
    engine.deliver(&id, &parties.freelancer, "L").unwrap();
    let settlement = engine.release(&id, &parties.client).unwrap();
    assert_eq!(settlement.paid_to(&parties.freelancer), Amount::new(110));
}
