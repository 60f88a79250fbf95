use ark_relations::gr1cs::SynthesisError;
use displaydoc::Display;

/// Errors raised by the proving pipeline, tagged by the stage that failed.
/// Every variant is terminal for the current run; the caller decides whether
/// to abort or continue a batch of configurations.
#[derive(Debug, Display)]
pub enum PipelineError {
    /// invalid run configuration: {0}
    Configuration(String),
    /// circuit did not compile to a constraint system: {0}
    Compile(SynthesisError),
    /// witness could not be built: {0}
    Witness(String),
    /// constraint system is not satisfied by the supplied witness
    ConstraintUnsatisfied,
    /// key setup failed: {0}
    Setup(SynthesisError),
    /// proof generation failed: {0}
    Prove(SynthesisError),
    /// verifier could not process the proof: {0}
    Verify(SynthesisError),
    /// proof was rejected by the verifier
    ProofRejected,
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Compile(e) | Self::Setup(e) | Self::Prove(e) | Self::Verify(e) => Some(e),
            _ => None,
        }
    }
}
