use std::{collections::BTreeMap, time::Duration};

use csv::Writer;
use std::error::Error;
use std::fs::OpenOptions;

#[derive(Debug)]
pub struct BenchResult {
    pub curve: String,
    pub target_field: String,
    pub num_thread: usize,
    pub operation: String,
    pub repeat_count: usize,
    pub num_constraints: usize,
    pub predicate_constraints: BTreeMap<String, usize>,
    pub num_instance_variables: usize,
    pub keygen_time: Duration,
    pub pk_size: usize,
    pub vk_size: usize,
    pub prover_time: Duration,
    pub proof_size: usize,
    pub verifier_time: Duration,
}

impl BenchResult {
    pub fn save_to_csv(&self, filename: &str, append: bool) -> Result<(), Box<dyn Error>> {
        // Configure file mode based on `append` flag
        let file = OpenOptions::new()
            .create(true)
            .append(append)
            .write(true)
            .truncate(!append) // If not appending, truncate the file (overwrite it)
            .open(filename)?;

        let mut writer = Writer::from_writer(file);

        // If creating a new file, write the headers
        if !append {
            writer.write_record(&[
                "Curve",
                "Target Field",
                "Num Threads",
                "Operation",
                "Repeat Count",
                "Num Constraints",
                "Predicate Constraints",
                "Num Instance Variables",
                "Setup Time (s)",
                "PK Size",
                "VK Size",
                "Prover Time (s)",
                "Proof Size",
                "Verifier Time (ms)",
            ])?;
        }

        // Convert BTreeMap predicate constraints to a JSON-like string
        let predicate_constraints_str = serde_json::to_string(&self.predicate_constraints)?;

        let keygen_time_s = self.keygen_time.as_secs_f64();
        let prover_time_s = self.prover_time.as_secs_f64();
        let verifier_time_ms = self.verifier_time.as_secs_f64() * 1000.0;

        // Write the benchmark results as a row
        writer.write_record(&[
            &self.curve,
            &self.target_field,
            &self.num_thread.to_string(),
            &self.operation,
            &self.repeat_count.to_string(),
            &self.num_constraints.to_string(),
            &predicate_constraints_str,
            &self.num_instance_variables.to_string(),
            &keygen_time_s.to_string(),
            &self.pk_size.to_string(),
            &self.vk_size.to_string(),
            &prover_time_s.to_string(),
            &self.proof_size.to_string(),
            &verifier_time_ms.to_string(),
        ])?;

        writer.flush()?; // Ensure data is written

        println!(
            "✅ Benchmark result {} to {filename}",
            if append {
                "appended"
            } else {
                "saved (overwritten)"
            },
        );

        Ok(())
    }
}
