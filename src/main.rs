use std::{process::ExitCode, time::Instant};

use log::info;

use tsp_dfs_core::{Error, GraphInput, Result, TspOptions, logging, open_output, runner};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Usage(usage)) => {
            print!("{usage}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let now = Instant::now();
    let options = TspOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let input = GraphInput::read(&options)?;
    info!("input: {input}");

    let mut out = open_output(&options)?;
    let outcome = runner::solve(&input, &options, &mut out)?;

    info!(
        "output: found={} calls={} time={:.2}s",
        outcome.found(),
        outcome.calls(),
        now.elapsed().as_secs_f32()
    );

    Ok(())
}
