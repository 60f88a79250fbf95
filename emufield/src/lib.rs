use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;

pub use ark_relations::gr1cs::ConstraintSystemRef;
use ark_std::marker::PhantomData;

pub mod circuit;
pub mod data_structures;
mod error;
mod harness;
mod pipeline;
pub mod preimage;

#[cfg(test)]
mod test;

pub use error::PipelineError;

/// Drives repeated add/multiply circuits over an emulated (non-native) field
/// through the full compile/setup/prove/verify pipeline of the Groth16
/// backend. `TargetF` is the emulated field; the constraint system is
/// compiled over `E::ScalarField`.
pub struct FieldOps<TargetF: PrimeField, E: Pairing> {
    _f: PhantomData<TargetF>,
    _e: PhantomData<E>,
}
