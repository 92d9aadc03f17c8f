//! Model evaluation over the generated test sets.

use std::path::{Path, PathBuf};

use anyhow::Result;

use worttest_core::config::EvalConfig;
use worttest_core::engine::Evaluator;
use worttest_core::report::{EvaluationReport, Reporter};
use worttest_core::traits::EmbeddingModel;
use worttest_core::writer;
use worttest_models::Word2VecModel;

pub fn execute(
    config: &EvalConfig,
    model_path: &Path,
    umlauts: bool,
    topn: usize,
    json_report: Option<&Path>,
) -> Result<()> {
    let model = Word2VecModel::load(model_path)?;
    let evaluator = Evaluator::new(&model, topn);
    let reporter = Reporter::for_model(model_path, topn);

    let pick = |path: PathBuf| {
        if umlauts {
            writer::nouml_path(&path)
        } else {
            path
        }
    };

    let mut report = EvaluationReport::new(model.name(), topn);

    reporter.heading("> EVALUATING SYNTACTIC FEATURES")?;
    let syntactic =
        evaluator.evaluate_analogies(&pick(config.syntactic_questions()), "syntactic")?;
    reporter.report(&syntactic)?;
    report.push("syntactic", syntactic);

    reporter.heading("> EVALUATING SEMANTIC FEATURES")?;
    let opposite = evaluator.evaluate_analogies(&pick(config.opposite_questions()), "opposite")?;
    reporter.report(&opposite)?;
    report.push("opposite", opposite);

    let bestmatch =
        evaluator.evaluate_analogies(&pick(config.bestmatch_questions()), "best match")?;
    reporter.report(&bestmatch)?;
    report.push("best match", bestmatch);

    let doesnt_fit =
        evaluator.evaluate_odd_one_out(&pick(config.doesntfit_questions()), "doesn't fit")?;
    reporter.report(&doesnt_fit)?;
    report.push("doesn't fit", doesnt_fit);

    print_summary(&report);

    if let Some(path) = json_report {
        report.save_json(path)?;
        eprintln!("JSON report: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &EvaluationReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Test set", "Correct", "Top-N", "Coverage"]);

    for set in &report.test_sets {
        let total = &set.stats.total;
        table.add_row(vec![
            Cell::new(&set.name),
            Cell::new(format!("{:.1}%", total.accuracy())),
            Cell::new(format!("{:.1}%", total.topn_accuracy())),
            Cell::new(format!("{:.1}%", total.coverage())),
        ]);
    }

    eprintln!("\n{table}");
}
