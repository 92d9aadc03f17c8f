//! Quick eval example — minimal programmatic usage of worttest.
//!
//! Generates a tiny syntactic test set in a temporary directory and scores
//! it against a mock model, no trained artifact required.
//!
//! ```bash
//! cargo run --example quick_eval
//! ```

use worttest_core::config::EvalConfig;
use worttest_core::engine::Evaluator;
use worttest_core::generator;
use worttest_core::report::format_stats_line;

use worttest_models::MockModel;

fn main() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let config = EvalConfig {
        src_dir: dir.path().join("src"),
        data_dir: dir.path().join("data"),
        combinate_syntactic: 2,
        ..EvalConfig::default()
    };

    // Write miniature lexicons
    std::fs::create_dir_all(&config.src_dir)?;
    std::fs::write(config.src_dir.join("nouns.txt"), "Haus-Häuser\nBaum-Bäume\nHand-Hände\n")?;
    std::fs::write(
        config.src_dir.join("adjectives.txt"),
        "gut-besser-beste\nlaut-lauter-lauteste\n",
    )?;
    std::fs::write(
        config.src_dir.join("verbs.txt"),
        "gehen-gehe-geht-ging-gingen\nsehen-sehe-seht-sah-sahen\n",
    )?;

    // Build the syntactic test set
    let mut rng = rand::thread_rng();
    generator::create_syntactic_testset(&config, false, &mut rng)?;
    println!(
        "Generated test set: {}",
        config.syntactic_questions().display()
    );

    // A mock model that knows every noun form and answers "Bäume" to everything
    let model = MockModel::with_fixed_answer(
        ["Haus", "Häuser", "Baum", "Bäume", "Hand", "Hände"],
        "Bäume",
    );

    // Evaluate and print per-group results
    let evaluator = Evaluator::new(&model, 10);
    let stats = evaluator.evaluate_analogies(&config.syntactic_questions(), "syntactic")?;

    println!("\nResults ({} model queries):", model.call_count());
    for group in &stats.groups {
        println!("  {}", format_stats_line(group, 10));
    }
    println!("  {}", format_stats_line(&stats.total, 10));

    Ok(())
}
