use std::time::Instant;

use ark_crypto_primitives::snark::{CircuitSpecificSetupSNARK, SNARK};
use ark_ec::pairing::Pairing;
use ark_groth16::{prepare_verifying_key, Groth16};
use ark_relations::gr1cs::{
    ConstraintSynthesizer, ConstraintSystem, OptimizationGoal, SynthesisMode,
};
use ark_serialize::CanonicalSerialize;
use ark_std::rand::{CryptoRng, RngCore};
use ark_std::{end_timer, start_timer};

use crate::data_structures::ProofArtifacts;
use crate::error::PipelineError;

/// Runs a circuit through the whole backend pipeline: setup-mode synthesis,
/// prove-mode synthesis with a satisfaction check, Groth16 key setup, proof
/// generation and verification against the extracted public witness. Keys
/// are generated fresh on every call; nothing is cached across shapes.
pub(crate) fn drive<E, C, R>(circuit: C, rng: &mut R) -> Result<ProofArtifacts<E>, PipelineError>
where
    E: Pairing,
    C: ConstraintSynthesizer<E::ScalarField> + Clone,
    R: RngCore + CryptoRng,
{
    ////////////////// Compile //////////////////
    let timer_compile = start_timer!(|| "Compile");
    let cs = ConstraintSystem::<E::ScalarField>::new_ref();
    cs.set_optimization_goal(OptimizationGoal::Constraints);
    cs.set_mode(SynthesisMode::Setup);
    circuit
        .clone()
        .generate_constraints(cs.clone())
        .map_err(PipelineError::Compile)?;
    cs.finalize();
    let num_constraints = cs.num_constraints();
    let num_instance_variables = cs.num_instance_variables();
    let predicate_constraints = cs.get_all_predicates_num_constraints();
    end_timer!(timer_compile);
    tracing::debug!(num_constraints, "circuit compiled");

    ////////////////// Witness //////////////////
    let timer_witness = start_timer!(|| "Witness");
    let prover_cs = ConstraintSystem::<E::ScalarField>::new_ref();
    prover_cs.set_optimization_goal(OptimizationGoal::Constraints);
    circuit
        .clone()
        .generate_constraints(prover_cs.clone())
        .map_err(|e| PipelineError::Witness(e.to_string()))?;
    prover_cs.finalize();
    match prover_cs.is_satisfied() {
        Ok(true) => {}
        Ok(false) => return Err(PipelineError::ConstraintUnsatisfied),
        Err(e) => return Err(PipelineError::Witness(e.to_string())),
    }
    let prover_cs = prover_cs
        .into_inner()
        .ok_or_else(|| PipelineError::Witness("constraint system is still shared".into()))?;
    let public_inputs = prover_cs.instance_assignment[1..].to_vec();
    end_timer!(timer_witness);
    tracing::debug!(
        num_public_inputs = public_inputs.len(),
        "witness built and satisfied"
    );

    ////////////////// Setup //////////////////
    let timer_setup = start_timer!(|| "Setup");
    let start = Instant::now();
    let (pk, vk) = Groth16::<E>::setup(circuit.clone(), rng).map_err(PipelineError::Setup)?;
    let keygen_time = start.elapsed();
    let pvk = prepare_verifying_key(&vk);
    let pk_size = pk.serialized_size(ark_serialize::Compress::Yes);
    let vk_size = vk.serialized_size(ark_serialize::Compress::Yes);
    end_timer!(timer_setup);
    tracing::debug!(pk_size, vk_size, "keys generated");

    ////////////////// Prove //////////////////
    let timer_prove = start_timer!(|| "Prove");
    let start = Instant::now();
    let proof = Groth16::<E>::prove(&pk, circuit, rng).map_err(PipelineError::Prove)?;
    let prover_time = start.elapsed();
    let proof_size = proof.serialized_size(ark_serialize::Compress::Yes);
    end_timer!(timer_prove);
    tracing::debug!(proof_size, "proof generated");

    ////////////////// Verify //////////////////
    let timer_verify = start_timer!(|| "Verify");
    let start = Instant::now();
    let verified = Groth16::<E>::verify_with_processed_vk(&pvk, &public_inputs, &proof)
        .map_err(PipelineError::Verify)?;
    let verifier_time = start.elapsed();
    end_timer!(timer_verify);
    if !verified {
        return Err(PipelineError::ProofRejected);
    }
    tracing::debug!("proof verified");

    Ok(ProofArtifacts {
        num_constraints,
        num_instance_variables,
        predicate_constraints,
        proof,
        pvk,
        public_inputs,
        pk_size,
        vk_size,
        proof_size,
        keygen_time,
        prover_time,
        verifier_time,
    })
}
