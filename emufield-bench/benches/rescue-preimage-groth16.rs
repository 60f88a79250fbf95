use std::any::type_name;
use std::env;

use ark_bls12_381::{Bls12_381, Fr};
use ark_crypto_primitives::sponge::rescue::RescueConfig;
use ark_std::rand::{rngs::StdRng, RngCore, SeedableRng};
use ark_std::{test_rng, UniformRand};
use emufield::preimage::{rescue_image, Preimage, PreimageCircuit};
use rayon::ThreadPoolBuilder;
use shared_utils::BenchResult;

fn bench(num_invocations: usize, num_thread: usize) -> BenchResult {
    let mut rng = StdRng::seed_from_u64(test_rng().next_u64());
    let config = RescueConfig::<Fr>::test_conf();
    let input: Vec<Fr> = (0..9).map(|_| Fr::rand(&mut rng)).collect();
    let image = rescue_image(&config, &input, num_invocations).unwrap();

    let artifacts = Preimage::<Bls12_381>::evaluate(
        PreimageCircuit {
            input: Some(input),
            image: Some(image),
            num_invocations,
            config,
        },
        &mut rng,
    )
    .unwrap();

    BenchResult {
        curve: type_name::<Bls12_381>().to_string(),
        target_field: type_name::<Fr>().to_string(),
        num_thread,
        operation: "rescue-preimage".to_string(),
        repeat_count: num_invocations,
        num_constraints: artifacts.num_constraints,
        predicate_constraints: artifacts.predicate_constraints,
        num_instance_variables: artifacts.num_instance_variables,
        keygen_time: artifacts.keygen_time,
        pk_size: artifacts.pk_size,
        vk_size: artifacts.vk_size,
        prover_time: artifacts.prover_time,
        proof_size: artifacts.proof_size,
        verifier_time: artifacts.verifier_time,
    }
}

const MAX_LOG2_NUM_INVOCATIONS: usize = 10;

fn main() {
    tracing_subscriber::fmt::init();

    let num_thread = env::var("NUM_THREAD")
        .ok()
        .and_then(|s| s.parse::<usize>().ok());
    if let Some(num_thread) = num_thread {
        ThreadPoolBuilder::new()
            .num_threads(num_thread)
            .build_global()
            .unwrap();
    }
    let num_thread = num_thread.unwrap_or_else(rayon::current_num_threads);

    let num_invocations: Vec<usize> = (0..MAX_LOG2_NUM_INVOCATIONS)
        .map(|i| 2_usize.pow(i as u32))
        .collect();
    for &num_invocations in &num_invocations {
        let _ = bench(num_invocations, num_thread)
            .save_to_csv("rescue-preimage-groth16.csv", true);
    }
}
