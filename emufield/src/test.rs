use ark_bls12_377::{Bls12_377, Fr as Bls12_377_Fr};
use ark_bls12_381::{Bls12_381, Fr as Bls12_381_Fr};
use ark_crypto_primitives::sponge::rescue::RescueConfig;
use ark_std::rand::{rngs::StdRng, RngCore, SeedableRng};
use ark_std::{test_rng, UniformRand};
use num_bigint::BigUint;

use crate::data_structures::{FieldDescriptor, Operation};
use crate::preimage::{rescue_image, Preimage, PreimageCircuit};
use crate::{FieldOps, PipelineError};

// The two sample configurations: each scalar field emulated over the other
// curve's native field.
type Fo381Over377 = FieldOps<Bls12_381_Fr, Bls12_377>;
type Fo377Over381 = FieldOps<Bls12_377_Fr, Bls12_381>;

fn rng() -> StdRng {
    StdRng::seed_from_u64(test_rng().next_u64())
}

fn big(v: u64) -> BigUint {
    BigUint::from(v)
}

#[test]
fn add_matches_expected() {
    let mut rng = rng();
    let artifacts =
        Fo381Over377::run(Operation::Add, 2, &big(3), &big(5), &big(8), &mut rng).unwrap();
    assert!(artifacts.num_constraints > 0);
    assert!(artifacts.proof_size > 0);
    // Nothing was configured public.
    assert!(artifacts.public_inputs.is_empty());

    let artifacts =
        Fo377Over381::run(Operation::Add, 2, &big(3), &big(5), &big(8), &mut rng).unwrap();
    assert!(artifacts.num_constraints > 0);
}

#[test]
fn add_with_wrong_expected_is_unsatisfied() {
    let mut rng = rng();
    let err = Fo381Over377::run(Operation::Add, 2, &big(3), &big(5), &big(9), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PipelineError::ConstraintUnsatisfied));
}

#[test]
fn mul_reduce_matches_expected() {
    let mut rng = rng();
    let artifacts =
        Fo381Over377::run(Operation::MulReduce, 2, &big(3), &big(5), &big(15), &mut rng).unwrap();
    assert!(artifacts.num_constraints > 0);

    let artifacts =
        Fo377Over381::run(Operation::MulReduce, 2, &big(3), &big(5), &big(15), &mut rng).unwrap();
    assert!(artifacts.num_constraints > 0);
}

#[test]
fn mul_reduce_with_wrong_expected_is_unsatisfied() {
    let mut rng = rng();
    let err = Fo377Over381::run(Operation::MulReduce, 2, &big(3), &big(5), &big(16), &mut rng)
        .unwrap_err();
    assert!(matches!(err, PipelineError::ConstraintUnsatisfied));
}

#[test]
fn zero_repeat_count_is_rejected_before_compilation() {
    let err = Fo381Over377::build_shape(Operation::Add, 0).unwrap_err();
    assert!(matches!(err, PipelineError::Configuration(_)));
}

#[test]
fn repeat_count_scales_constraints_monotonically() {
    for op in [Operation::Add, Operation::MulReduce] {
        let mut previous = 0;
        for repeat_count in [1usize, 4, 16] {
            let shape = Fo381Over377::build_shape(op, repeat_count).unwrap();
            let count = Fo381Over377::constraint_count(&shape).unwrap();
            assert!(
                count >= previous,
                "{op} with {repeat_count} repeats shrank the system"
            );
            previous = count;
        }
        let one = Fo381Over377::constraint_count(
            &Fo381Over377::build_shape(op, 1).unwrap(),
        )
        .unwrap();
        assert!(previous > one);
    }
}

#[test]
fn repeat_count_does_not_change_the_outcome() {
    let mut rng = rng();
    for repeat_count in [1usize, 10] {
        let artifacts = Fo381Over377::run(
            Operation::Add,
            repeat_count,
            &big(3),
            &big(5),
            &big(8),
            &mut rng,
        )
        .unwrap();
        assert!(artifacts.num_constraints > 0);
    }
}

#[test]
fn oversized_operand_is_rejected() {
    let modulus = FieldDescriptor::of::<Bls12_381_Fr>().modulus;
    let shape = Fo381Over377::build_shape(Operation::Add, 1).unwrap();
    let err = Fo381Over377::instantiate(shape, &modulus, &big(5), &big(8)).unwrap_err();
    assert!(matches!(err, PipelineError::Witness(_)));
}

#[test]
fn mismatched_descriptor_is_rejected() {
    // Shape described by one field, witness bound by a harness for another.
    let shape = Fo381Over377::build_shape_over(
        FieldDescriptor::of::<Bls12_377_Fr>(),
        Operation::Add,
        1,
    )
    .unwrap();
    let err = Fo381Over377::instantiate(shape, &big(3), &big(5), &big(8)).unwrap_err();
    assert!(matches!(err, PipelineError::Witness(_)));
}

#[test]
fn malformed_descriptors_are_rejected() {
    let good = FieldDescriptor::of::<Bls12_381_Fr>();

    let mut zero_limbs = good.clone();
    zero_limbs.num_limbs = 0;
    assert!(matches!(
        Fo381Over377::build_shape_over(zero_limbs, Operation::Add, 1),
        Err(PipelineError::Configuration(_))
    ));

    let mut narrow = good.clone();
    narrow.bits_per_limb = 8;
    assert!(matches!(
        Fo381Over377::build_shape_over(narrow, Operation::Add, 1),
        Err(PipelineError::Configuration(_))
    ));

    let mut composite = good;
    composite.is_prime = false;
    assert!(matches!(
        Fo381Over377::build_shape_over(composite, Operation::Add, 1),
        Err(PipelineError::Configuration(_))
    ));
}

#[test]
fn tampered_public_witness_fails_verification() {
    let mut rng = rng();
    let shape = Fo381Over377::build_shape(Operation::Add, 1)
        .unwrap()
        .with_public_result();
    let instance = Fo381Over377::instantiate(shape, &big(3), &big(5), &big(8)).unwrap();
    let artifacts = Fo381Over377::evaluate(instance, &mut rng).unwrap();
    assert!(!artifacts.public_inputs.is_empty());
    assert!(artifacts.verify_against(&artifacts.public_inputs).unwrap());

    let mut tampered = artifacts.public_inputs.clone();
    tampered[0] += Bls12_377_Fr::from(1u64);
    assert!(!artifacts.verify_against(&tampered).unwrap());
}

#[test]
fn limb_decomposition_round_trips() {
    let descriptor = FieldDescriptor::of::<Bls12_381_Fr>();
    assert_eq!(descriptor.num_limbs, 4);
    assert_eq!(descriptor.bits_per_limb, 64);

    let limb_bound = BigUint::from(1u8) << descriptor.bits_per_limb;
    for value in [big(0), big(8), &descriptor.modulus - big(1)] {
        let limbs = descriptor.decompose(&value).unwrap();
        assert_eq!(limbs.len(), descriptor.num_limbs);
        assert!(limbs.iter().all(|limb| limb < &limb_bound));
        assert_eq!(descriptor.recompose(&limbs), value);
    }
}

#[test]
fn rescue_preimage_verifies() {
    let mut rng = rng();
    let config = RescueConfig::<Bls12_381_Fr>::test_conf();
    let input: Vec<Bls12_381_Fr> = (0..9).map(|_| Bls12_381_Fr::rand(&mut rng)).collect();
    let image = rescue_image(&config, &input, 1).unwrap();

    let artifacts = Preimage::<Bls12_381>::evaluate(
        PreimageCircuit {
            input: Some(input),
            image: Some(image),
            num_invocations: 1,
            config,
        },
        &mut rng,
    )
    .unwrap();
    assert_eq!(artifacts.public_inputs, vec![image]);
}

#[test]
fn rescue_preimage_with_wrong_image_is_unsatisfied() {
    let mut rng = rng();
    let config = RescueConfig::<Bls12_381_Fr>::test_conf();
    let input: Vec<Bls12_381_Fr> = (0..9).map(|_| Bls12_381_Fr::rand(&mut rng)).collect();
    let image = rescue_image(&config, &input, 1).unwrap() + Bls12_381_Fr::from(1u64);

    let err = Preimage::<Bls12_381>::evaluate(
        PreimageCircuit {
            input: Some(input),
            image: Some(image),
            num_invocations: 1,
            config,
        },
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::ConstraintUnsatisfied));
}
