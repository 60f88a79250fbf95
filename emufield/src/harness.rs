use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use ark_relations::gr1cs::{
    ConstraintSynthesizer, ConstraintSystem, OptimizationGoal, SynthesisMode,
};
use ark_std::marker::PhantomData;
use ark_std::rand::{CryptoRng, RngCore};
use num_bigint::BigUint;

use crate::circuit::RepeatedOpCircuit;
use crate::data_structures::{
    CircuitInstance, CircuitShape, FieldDescriptor, Operation, ProofArtifacts, ResultVisibility,
};
use crate::error::PipelineError;
use crate::pipeline::drive;
use crate::FieldOps;

impl<TargetF: PrimeField, E: Pairing> FieldOps<TargetF, E> {
    /// Builds a circuit shape over `TargetF`'s own descriptor. Operand
    /// values are not bound yet.
    pub fn build_shape(
        op: Operation,
        repeat_count: usize,
    ) -> Result<CircuitShape<TargetF>, PipelineError> {
        Self::build_shape_over(FieldDescriptor::of::<TargetF>(), op, repeat_count)
    }

    /// Builds a shape over an explicit descriptor. The descriptor is
    /// cross-checked against `TargetF` when a witness is bound to it.
    pub fn build_shape_over(
        descriptor: FieldDescriptor,
        op: Operation,
        repeat_count: usize,
    ) -> Result<CircuitShape<TargetF>, PipelineError> {
        if repeat_count == 0 {
            return Err(PipelineError::Configuration(
                "repeat count must be at least 1".into(),
            ));
        }
        descriptor.validate()?;
        Ok(CircuitShape {
            descriptor,
            op,
            repeat_count,
            result_visibility: ResultVisibility::Secret,
            _target: PhantomData,
        })
    }

    /// Binds three plain integers to the shape's witness slots, decomposing
    /// each into the descriptor's limb representation. The expected value is
    /// NOT checked here; correctness is established only by constraint
    /// satisfaction downstream.
    pub fn instantiate(
        shape: CircuitShape<TargetF>,
        operand1: &BigUint,
        operand2: &BigUint,
        expected: &BigUint,
    ) -> Result<CircuitInstance<TargetF>, PipelineError> {
        Self::check_descriptor(&shape)?;
        let operand1 = shape.descriptor.encode::<TargetF>(operand1)?;
        let operand2 = shape.descriptor.encode::<TargetF>(operand2)?;
        let expected = shape.descriptor.encode::<TargetF>(expected)?;
        Ok(CircuitInstance {
            shape,
            operand1,
            operand2,
            expected,
        })
    }

    /// Compiles a blank circuit in setup mode and reports the size of the
    /// resulting constraint system. Monotonically non-decreasing in the
    /// shape's repeat count.
    pub fn constraint_count(shape: &CircuitShape<TargetF>) -> Result<usize, PipelineError> {
        let cs = ConstraintSystem::<E::ScalarField>::new_ref();
        cs.set_optimization_goal(OptimizationGoal::Constraints);
        cs.set_mode(SynthesisMode::Setup);
        RepeatedOpCircuit::<TargetF, E::ScalarField>::blank(shape)
            .generate_constraints(cs.clone())
            .map_err(PipelineError::Compile)?;
        cs.finalize();
        Ok(cs.num_constraints())
    }

    /// Consumes an instance and drives it through compile, witness, setup,
    /// prove and verify. Any stage failure aborts the run with a tagged
    /// error.
    pub fn evaluate<R: RngCore + CryptoRng>(
        instance: CircuitInstance<TargetF>,
        rng: &mut R,
    ) -> Result<ProofArtifacts<E>, PipelineError> {
        Self::check_descriptor(&instance.shape)?;
        let circuit = RepeatedOpCircuit::<TargetF, E::ScalarField>::assigned(&instance);
        drive::<E, _, _>(circuit, rng)
    }

    /// One-shot convenience composing shape building, instantiation and
    /// evaluation for a single explicit configuration.
    pub fn run<R: RngCore + CryptoRng>(
        op: Operation,
        repeat_count: usize,
        operand1: &BigUint,
        operand2: &BigUint,
        expected: &BigUint,
        rng: &mut R,
    ) -> Result<ProofArtifacts<E>, PipelineError> {
        let shape = Self::build_shape(op, repeat_count)?;
        let instance = Self::instantiate(shape, operand1, operand2, expected)?;
        Self::evaluate(instance, rng)
    }

    fn check_descriptor(shape: &CircuitShape<TargetF>) -> Result<(), PipelineError> {
        if !shape.descriptor.matches::<TargetF>() {
            return Err(PipelineError::Witness(format!(
                "shape descriptor (modulus of {} bits) does not describe the target field",
                shape.descriptor.modulus.bits()
            )));
        }
        Ok(())
    }
}
