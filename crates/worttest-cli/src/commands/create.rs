//! Test-set creation.

use anyhow::Result;

use worttest_core::config::EvalConfig;
use worttest_core::generator;

pub fn execute(config: &EvalConfig, umlauts: bool) -> Result<()> {
    // one shared random source for all sampling draws of this run
    let mut rng = rand::thread_rng();

    tracing::info!("> CREATING SYNTACTIC TESTSET");
    generator::create_syntactic_testset(config, umlauts, &mut rng)?;

    tracing::info!("> CREATING SEMANTIC TESTSET");
    generator::create_semantic_testsets(config, umlauts, &mut rng)?;

    Ok(())
}
