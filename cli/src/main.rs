mod cli;

use std::io::Read;

use eyre::{Context, Result};

use money_muling_detection_core_rs::{run_detection_pipeline, PipelineConfig, RawTransactionRow};

fn main() -> Result<()> {
    let args = cli::Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let input = read_input(&args)?;
    let rows: Vec<RawTransactionRow> =
        serde_json::from_str(&input).context("parse input as a JSON array of transaction rows")?;

    tracing::info!(rows = rows.len(), "loaded transaction batch");

    let config = PipelineConfig::default();
    let result = run_detection_pipeline(&rows, &config).context("run detection pipeline")?;

    let output = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    }
    .context("encode result as JSON")?;

    println!("{output}");
    Ok(())
}

fn read_input(args: &cli::Cli) -> Result<String> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read input file `{}`", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("read transaction batch from stdin")?;
            Ok(buffer)
        }
    }
}
