use std::time::Duration;

use ark_crypto_primitives::snark::SNARK;
use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof};
use ark_relations::gr1cs::Label;
use ark_std::collections::BTreeMap;
use ark_std::marker::PhantomData;
use num_bigint::BigUint;

use crate::error::PipelineError;

/// Identifies a non-native field by its limb layout, primality and modulus.
/// Immutable; selected once per run. The layout is chosen independently of
/// the native field the constraint system is compiled over.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub num_limbs: usize,
    pub bits_per_limb: usize,
    pub is_prime: bool,
    pub modulus: BigUint,
}

impl FieldDescriptor {
    /// The descriptor of a concrete prime field, laid out in 64-bit limbs.
    /// Both sample scalar fields (BLS12-377 and BLS12-381) come out as four
    /// 64-bit limbs.
    pub fn of<F: PrimeField>() -> Self {
        let modulus: BigUint = F::MODULUS.into();
        Self {
            num_limbs: (F::MODULUS_BIT_SIZE as usize).div_ceil(64),
            bits_per_limb: 64,
            is_prime: true,
            modulus,
        }
    }

    /// Checks the descriptor is one the emulation backend can work with.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.num_limbs == 0 || self.bits_per_limb == 0 {
            return Err(PipelineError::Configuration(
                "limb count and limb width must be positive".into(),
            ));
        }
        if self.modulus <= BigUint::from(1u8) {
            return Err(PipelineError::Configuration(
                "modulus must be greater than one".into(),
            ));
        }
        if self.modulus.bits() as usize > self.bit_capacity() {
            return Err(PipelineError::Configuration(format!(
                "modulus needs {} bits but the limb layout only holds {}",
                self.modulus.bits(),
                self.bit_capacity()
            )));
        }
        // The backend represents the emulated field as a prime field type,
        // so a composite modulus cannot be emulated.
        if !self.is_prime {
            return Err(PipelineError::Configuration(
                "emulation requires a prime modulus".into(),
            ));
        }
        Ok(())
    }

    /// Whether this descriptor describes the prime field `F`.
    pub fn matches<F: PrimeField>(&self) -> bool {
        let modulus: BigUint = F::MODULUS.into();
        self.modulus == modulus
    }

    pub fn bit_capacity(&self) -> usize {
        self.num_limbs * self.bits_per_limb
    }

    /// Whether `value` is a canonical element of the field.
    pub fn admits(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }

    /// Splits a canonical value into `num_limbs` little-endian limbs of
    /// `bits_per_limb` bits each. Out-of-range values are rejected, never
    /// truncated.
    pub fn decompose(&self, value: &BigUint) -> Result<Vec<BigUint>, PipelineError> {
        if !self.admits(value) {
            return Err(PipelineError::Witness(format!(
                "value {value} is not a canonical element of the {}-bit field",
                self.modulus.bits()
            )));
        }
        let mask = (BigUint::from(1u8) << self.bits_per_limb) - BigUint::from(1u8);
        Ok((0..self.num_limbs)
            .map(|i| (value >> (i * self.bits_per_limb)) & &mask)
            .collect())
    }

    /// Reassembles a value from its little-endian limbs.
    pub fn recompose(&self, limbs: &[BigUint]) -> BigUint {
        limbs
            .iter()
            .rev()
            .fold(BigUint::from(0u8), |acc, limb| {
                (acc << self.bits_per_limb) + limb
            })
    }

    /// Encodes a plain integer as an element of `F`, going through the limb
    /// representation so range violations surface as witness errors.
    pub fn encode<F: PrimeField>(&self, value: &BigUint) -> Result<F, PipelineError> {
        let limbs = self.decompose(value)?;
        Ok(F::from(self.recompose(&limbs)))
    }
}

/// The operation a circuit applies to its two operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Non-native addition; the sum may stay unreduced and is compared with
    /// the emulated field's own equality.
    Add,
    /// Non-native multiplication followed by an explicit reduction to
    /// canonical limb form before the equality assertion.
    MulReduce,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::MulReduce => write!(f, "mul-reduce"),
        }
    }
}

/// Where the expected-result slot lands in the witness split. Operands are
/// always secret; nothing is public unless explicitly configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultVisibility {
    Secret,
    Public,
}

/// A circuit shape parameterized by field, operation and repeat count.
/// Operand values are not yet bound.
#[derive(Clone, Debug)]
pub struct CircuitShape<TargetF: PrimeField> {
    pub descriptor: FieldDescriptor,
    pub op: Operation,
    pub repeat_count: usize,
    pub result_visibility: ResultVisibility,
    pub(crate) _target: PhantomData<TargetF>,
}

impl<TargetF: PrimeField> CircuitShape<TargetF> {
    /// Moves the expected-result slot into the public part of the witness.
    pub fn with_public_result(mut self) -> Self {
        self.result_visibility = ResultVisibility::Public;
        self
    }
}

/// A shape with its three witness slots bound. Constructed fresh per run,
/// consumed once by the pipeline and discarded.
#[derive(Clone, Debug)]
pub struct CircuitInstance<TargetF: PrimeField> {
    pub shape: CircuitShape<TargetF>,
    pub operand1: TargetF,
    pub operand2: TargetF,
    pub expected: TargetF,
}

/// Everything a completed run produces: the compiled system's size, the
/// proof and prepared key, the public witness part, serialized sizes and
/// per-stage wall-clock times.
#[derive(Clone)]
pub struct ProofArtifacts<E: Pairing> {
    pub num_constraints: usize,
    pub num_instance_variables: usize,
    pub predicate_constraints: BTreeMap<Label, usize>,
    pub proof: Proof<E>,
    pub pvk: PreparedVerifyingKey<E>,
    pub public_inputs: Vec<E::ScalarField>,
    pub pk_size: usize,
    pub vk_size: usize,
    pub proof_size: usize,
    pub keygen_time: Duration,
    pub prover_time: Duration,
    pub verifier_time: Duration,
}

impl<E: Pairing> ProofArtifacts<E> {
    /// Re-checks the proof against an arbitrary public witness. A proof is
    /// bound to the witness it was produced for, so tampered inputs fail.
    pub fn verify_against(&self, public_inputs: &[E::ScalarField]) -> Result<bool, PipelineError> {
        Groth16::<E>::verify_with_processed_vk(&self.pvk, public_inputs, &self.proof)
            .map_err(PipelineError::Verify)
    }
}
