use ark_crypto_primitives::crh::rescue::constraints::{CRHGadget, CRHParametersVar};
use ark_crypto_primitives::crh::rescue::CRH;
use ark_crypto_primitives::crh::{CRHScheme, CRHSchemeGadget};
use ark_crypto_primitives::sponge::rescue::RescueConfig;
use ark_crypto_primitives::sponge::Absorb;
use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::gr1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};
use ark_std::marker::PhantomData;
use ark_std::rand::{CryptoRng, RngCore};

use crate::data_structures::ProofArtifacts;
use crate::error::PipelineError;
use crate::pipeline::drive;

/// Number of field elements a chained Rescue invocation absorbs.
const RESCUE_INPUT_LEN: usize = 9;

/// Computes the image the circuit is expected to reproduce, hashing over
/// the native field. Invocations past the first re-absorb the previous
/// image `RESCUE_INPUT_LEN` times.
pub fn rescue_image<F: PrimeField + Absorb>(
    config: &RescueConfig<F>,
    input: &[F],
    num_invocations: usize,
) -> Result<F, PipelineError> {
    let mut image = CRH::<F>::evaluate(config, input.to_vec())
        .map_err(|e| PipelineError::Witness(e.to_string()))?;
    for _ in 1..num_invocations {
        image = CRH::<F>::evaluate(config, vec![image; RESCUE_INPUT_LEN])
            .map_err(|e| PipelineError::Witness(e.to_string()))?;
    }
    Ok(image)
}

/// Proves knowledge of a Rescue preimage: the secret input vector hashes to
/// the public image. The hash runs over the native field only; embedding a
/// native hash result into an emulated element is unsupported.
#[derive(Clone)]
pub struct PreimageCircuit<F: PrimeField + Absorb> {
    pub input: Option<Vec<F>>,
    pub image: Option<F>,
    pub num_invocations: usize,
    pub config: RescueConfig<F>,
}

impl<F: PrimeField + Absorb> ConstraintSynthesizer<F> for PreimageCircuit<F> {
    fn generate_constraints(self, cs: ConstraintSystemRef<F>) -> Result<(), SynthesisError> {
        let params =
            CRHParametersVar::<F>::new_witness(cs.clone(), || Ok(self.config.clone()))?;

        let input = self.input.ok_or(SynthesisError::AssignmentMissing)?;
        let mut input_g = Vec::new();
        for elem in input {
            input_g.push(FpVar::new_witness(cs.clone(), || Ok(elem))?);
        }

        let mut image = CRHGadget::<F>::evaluate(&params, &input_g)?;
        for _ in 1..self.num_invocations {
            image = CRHGadget::<F>::evaluate(&params, &vec![image; RESCUE_INPUT_LEN])?;
        }

        let expected = FpVar::new_input(cs.clone(), || {
            self.image.ok_or(SynthesisError::AssignmentMissing)
        })?;
        image.enforce_equal(&expected)?;

        Ok(())
    }
}

/// Drives a Rescue preimage circuit through the same pipeline as the
/// field-operation harness, with the same stage-tagged failure semantics.
pub struct Preimage<E: Pairing> {
    _e: PhantomData<E>,
}

impl<E: Pairing> Preimage<E>
where
    E::ScalarField: Absorb,
{
    pub fn evaluate<R: RngCore + CryptoRng>(
        circuit: PreimageCircuit<E::ScalarField>,
        rng: &mut R,
    ) -> Result<ProofArtifacts<E>, PipelineError> {
        if circuit.num_invocations == 0 {
            return Err(PipelineError::Configuration(
                "invocation count must be at least 1".into(),
            ));
        }
        if circuit.input.as_ref().map_or(true, Vec::is_empty) {
            return Err(PipelineError::Configuration(
                "preimage input must not be empty".into(),
            ));
        }
        drive::<E, _, _>(circuit, rng)
    }
}
