//! Model confirmations across training rounds: verify, update, second owner.

use ppml_crypto::hash_payload;
use ppml_registry::{
    AuthenticatedCaller, MapOutcome, ModelConfirmation, RegistryError, VerifyOutcome,
};
use ppml_types::Identity;

const CORRECT_MODEL: &[u8] = b"ThisIsAModel42";
const INCORRECT_MODEL: &[u8] = b"ThisIsACorruptedModel42";
const NEW_MODEL: &[u8] = b"ModelIs98%Accurate";
const OTHER_OWNER_MODEL: &[u8] = b"CompletelyDifferentModel|/--";

struct Fixture {
    registry: ModelConfirmation,
    owner: AuthenticatedCaller,
    second_owner: AuthenticatedCaller,
    cloud: AuthenticatedCaller,
    cloud_id: Identity,
}

/// A registry where the owner's first model has been mapped and verified.
fn verified_round() -> Fixture {
    let cloud_id = Identity::new("0xcloud");
    let mut fx = Fixture {
        registry: ModelConfirmation::new(),
        owner: AuthenticatedCaller::new(Identity::new("0xowner")),
        second_owner: AuthenticatedCaller::new(Identity::new("0xowner2")),
        cloud: AuthenticatedCaller::new(cloud_id.clone()),
        cloud_id,
    };

    fx.registry
        .map_provider_to_model(&fx.owner, hash_payload(CORRECT_MODEL), &fx.cloud_id)
        .unwrap();
    assert_eq!(
        fx.registry
            .verify_model_hash(&fx.cloud, hash_payload(INCORRECT_MODEL))
            .unwrap(),
        VerifyOutcome::NoMatch
    );
    assert!(fx
        .registry
        .verify_model_hash(&fx.cloud, hash_payload(CORRECT_MODEL))
        .unwrap()
        .is_verified());
    fx
}

#[test]
fn first_round_verifies_with_correct_model() {
    let fx = verified_round();
    let confirmations = fx.registry.get_model_confirmations(&fx.cloud_id).unwrap();
    assert_eq!(confirmations.len(), 1);
    assert!(confirmations[0].verified);
}

#[test]
fn pending_duplicate_model_hash_is_rejected() {
    let mut registry = ModelConfirmation::new();
    let owner = AuthenticatedCaller::new(Identity::new("0xowner"));
    let cloud_id = Identity::new("0xcloud");

    registry
        .map_provider_to_model(&owner, hash_payload(CORRECT_MODEL), &cloud_id)
        .unwrap();
    assert!(matches!(
        registry.map_provider_to_model(&owner, hash_payload(CORRECT_MODEL), &cloud_id),
        Err(RegistryError::DuplicateMapping { .. })
    ));
}

#[test]
fn new_round_updates_existing_confirmation() {
    let mut fx = verified_round();

    let outcome = fx
        .registry
        .map_provider_to_model(&fx.owner, hash_payload(NEW_MODEL), &fx.cloud_id)
        .unwrap();
    assert!(matches!(outcome, MapOutcome::Updated { index: 0, was_verified: true, .. }));

    let confirmations = fx.registry.get_model_confirmations(&fx.cloud_id).unwrap();
    assert_eq!(confirmations.len(), 1, "a new confirmation was created");
    assert_eq!(confirmations[0].hash, hash_payload(NEW_MODEL));
    assert!(!confirmations[0].verified, "the new model hash is still verified");
}

#[test]
fn different_owner_gets_separate_confirmation() {
    let mut fx = verified_round();
    fx.registry
        .map_provider_to_model(&fx.owner, hash_payload(NEW_MODEL), &fx.cloud_id)
        .unwrap();

    let outcome = fx
        .registry
        .map_provider_to_model(&fx.second_owner, hash_payload(OTHER_OWNER_MODEL), &fx.cloud_id)
        .unwrap();
    assert_eq!(outcome, MapOutcome::Created { index: 1 });

    let confirmations = fx.registry.get_model_confirmations(&fx.cloud_id).unwrap();
    assert_eq!(confirmations.len(), 2, "two separate confirmations should exist");
    assert_eq!(&confirmations[0].claimant, fx.owner.identity());
    assert_eq!(&confirmations[1].claimant, fx.second_owner.identity());

    // Verifying the second owner's model leaves the first owner's pending update alone.
    fx.registry
        .verify_model_hash(&fx.cloud, hash_payload(OTHER_OWNER_MODEL))
        .unwrap();
    let confirmations = fx.registry.get_model_confirmations(&fx.cloud_id).unwrap();
    assert!(!confirmations[0].verified);
    assert!(confirmations[1].verified);
}
