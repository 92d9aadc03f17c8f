//! worttest CLI — test-set creation and embedding-model evaluation.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use worttest_core::config::EvalConfig;
use worttest_core::error::EvalError;

mod commands;

#[derive(Parser)]
#[command(
    name = "worttest",
    version,
    about = "Analogy test-set builder and word-embedding evaluation harness"
)]
struct Cli {
    /// Trained embedding model in word2vec format (`.bin` for binary)
    model: PathBuf,

    /// Create the test sets before evaluating
    #[arg(short, long)]
    create: bool,

    /// Generate and evaluate the umlaut-folded test-set variants
    #[arg(short, long)]
    umlauts: bool,

    /// Count the correct answer anywhere among the top n candidates
    #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
    topn: i64,

    /// TOML config overriding source and target paths
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write a machine-readable JSON report to this path
    #[arg(long)]
    json_report: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("worttest=info".parse().unwrap())
                .add_directive("worttest_core=info".parse().unwrap())
                .add_directive("worttest_models=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // argument validation happens before any file is touched
    if cli.topn < 1 {
        return Err(EvalError::InvalidConfig(format!(
            "--topn must be a positive integer, got {}",
            cli.topn
        ))
        .into());
    }
    let topn = cli.topn as usize;

    let config = EvalConfig::load_from(cli.config.as_deref())?;
    config.validate()?;

    if cli.create {
        commands::create::execute(&config, cli.umlauts)?;
    }

    commands::evaluate::execute(
        &config,
        &cli.model,
        cli.umlauts,
        topn,
        cli.json_report.as_deref(),
    )
}
