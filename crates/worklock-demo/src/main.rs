//! Worklock demo - two deterministic agreement lifetimes
//!
//! Scenario 1: create, accept, deliver, release. The freelancer walks away
//! with amount + collateral.
//!
//! Scenario 2: create, accept, deliver, dispute, resolve with a 60/40 split.
//!
//! Run with `RUST_LOG=info cargo run -p worklock-demo` to see every
//! transition logged.

use chrono::{Duration, Utc};
use tracing::info;
use worklock_escrow::{CreateAgreementParams, Decision, EscrowEngine};
use worklock_trust::ScoreWriteCapability;
use worklock_types::{Amount, PrincipalId};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut engine = EscrowEngine::new();
    let cap = ScoreWriteCapability::grant();

    let client = PrincipalId::new();
    let freelancer = PrincipalId::new();
    let arbiter = PrincipalId::new();

    info!("=== Scenario 1: happy path ===");

    let id = engine.create_agreement(CreateAgreementParams {
        client: client.clone(),
        freelancer: freelancer.clone(),
        arbiter: arbiter.clone(),
        amount: Amount::new(1_000),
        deadline: Utc::now() + Duration::days(7),
        content_hash: "Qm-website-redesign-brief".to_string(),
    });
    let agreement = engine.get(&id).expect("agreement just created");
    info!(
        collateral = %agreement.collateral,
        "collateral sized at the default trust score"
    );

    engine
        .accept_and_deposit(&id, &freelancer)
        .expect("freelancer accepts");
    engine
        .deliver(&id, &freelancer, "ipfs://final-build")
        .expect("freelancer delivers");
    let settlement = engine.release(&id, &client).expect("client releases");
    info!(
        to_freelancer = %settlement.paid_to(&freelancer),
        "released in full"
    );

    // Host-side bookkeeping: reward the completed job
    let updated = engine.trust_mut().increase_score(&cap, &freelancer, 5);
    info!(score = updated.new_score, "freelancer score raised");

    info!("=== Scenario 2: disputed split ===");

    let id = engine.create_agreement(CreateAgreementParams {
        client: client.clone(),
        freelancer: freelancer.clone(),
        arbiter: arbiter.clone(),
        amount: Amount::new(1_000),
        deadline: Utc::now() + Duration::days(7),
        content_hash: "Qm-logo-package-brief".to_string(),
    });

    engine
        .accept_and_deposit(&id, &freelancer)
        .expect("freelancer accepts");
    engine
        .deliver(&id, &freelancer, "ipfs://logo-drafts")
        .expect("freelancer delivers");
    engine
        .dispute(
            &id,
            &client,
            "only two of five concepts delivered",
            Some("Qm-brief-excerpt".to_string()),
        )
        .expect("client disputes");

    let settlement = engine
        .resolve(
            &id,
            &arbiter,
            &Decision::split(60, "partial delivery, majority of work done"),
        )
        .expect("arbiter resolves");
    info!(
        to_freelancer = %settlement.paid_to(&freelancer),
        to_client = %settlement.paid_to(&client),
        "split settled"
    );
}
