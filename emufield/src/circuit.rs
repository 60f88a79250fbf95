use ark_ff::PrimeField;
use ark_r1cs_std::{alloc::AllocVar, eq::EqGadget, fields::emulated_fp::EmulatedFpVar};
use ark_relations::gr1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_std::marker::PhantomData;

use crate::data_structures::{CircuitInstance, CircuitShape, Operation, ResultVisibility};

/// A circuit asserting that `operand1 OP operand2 == expected` over the
/// emulated field `TargetF`, repeated `repeat_count` times. Every iteration
/// re-applies the operation to the original operands; results are never
/// chained, so the repeat count only scales the constraint system.
#[derive(Clone)]
pub struct RepeatedOpCircuit<TargetF: PrimeField, BaseF: PrimeField> {
    pub op: Operation,
    pub repeat_count: usize,
    pub result_visibility: ResultVisibility,
    pub operand1: Option<TargetF>,
    pub operand2: Option<TargetF>,
    pub expected: Option<TargetF>,
    pub(crate) _base: PhantomData<BaseF>,
}

impl<TargetF: PrimeField, BaseF: PrimeField> RepeatedOpCircuit<TargetF, BaseF> {
    /// A shape-only circuit with unbound witness slots, used for setup-mode
    /// synthesis and key generation.
    pub(crate) fn blank(shape: &CircuitShape<TargetF>) -> Self {
        Self {
            op: shape.op,
            repeat_count: shape.repeat_count,
            result_visibility: shape.result_visibility,
            operand1: None,
            operand2: None,
            expected: None,
            _base: PhantomData,
        }
    }

    pub(crate) fn assigned(instance: &CircuitInstance<TargetF>) -> Self {
        Self {
            op: instance.shape.op,
            repeat_count: instance.shape.repeat_count,
            result_visibility: instance.shape.result_visibility,
            operand1: Some(instance.operand1),
            operand2: Some(instance.operand2),
            expected: Some(instance.expected),
            _base: PhantomData,
        }
    }
}

impl<TargetF: PrimeField, BaseF: PrimeField> ConstraintSynthesizer<BaseF>
    for RepeatedOpCircuit<TargetF, BaseF>
{
    fn generate_constraints(self, cs: ConstraintSystemRef<BaseF>) -> Result<(), SynthesisError> {
        let in1 = EmulatedFpVar::<TargetF, BaseF>::new_witness(cs.clone(), || {
            self.operand1.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let in2 = EmulatedFpVar::<TargetF, BaseF>::new_witness(cs.clone(), || {
            self.operand2.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let res = match self.result_visibility {
            ResultVisibility::Secret => EmulatedFpVar::new_witness(cs.clone(), || {
                self.expected.ok_or(SynthesisError::AssignmentMissing)
            })?,
            ResultVisibility::Public => EmulatedFpVar::new_input(cs.clone(), || {
                self.expected.ok_or(SynthesisError::AssignmentMissing)
            })?,
        };

        for _ in 0..self.repeat_count {
            match self.op {
                Operation::Add => {
                    // Unreduced sum; emulated equality absorbs the
                    // representation redundancy.
                    let sum = &in1 + &in2;
                    sum.enforce_equal(&res)?;
                }
                Operation::MulReduce => {
                    // A raw product can overflow the limb bounds, so it is
                    // reduced to canonical form before the comparison.
                    let product = in1.mul_without_reduce(&in2)?.reduce()?;
                    product.enforce_equal(&res)?;
                }
            }
        }

        Ok(())
    }
}
