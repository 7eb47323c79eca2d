use anyhow::{bail, Context};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use workflow::{ReportConfig, Runner};

mod charts;
mod console;
mod workflow;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Chart and summary generator for gunshot-detection load tests"
)]
struct Args {
    /// Path to the load test summary CSV
    summary: PathBuf,
    /// YAML file overriding chart style defaults
    #[arg(long)]
    style: Option<PathBuf>,
}

fn main() {
    env_logger::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.summary.is_file() {
        bail!("summary file not found: {}", args.summary.display());
    }

    let config = match &args.style {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    let runner = Runner::new(config);
    let outcome = runner.execute(&args.summary)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    console::write_summary(&mut handle, &outcome.table, outcome.matrix.as_ref())
        .context("writing summary to stdout")?;
    for artifact in &outcome.artifacts {
        writeln!(handle, "wrote {}", artifact.display()).context("listing artifacts")?;
    }
    Ok(())
}
