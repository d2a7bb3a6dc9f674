use std::path::Path;
use std::process;
use std::time::Duration;

use clap::Parser;
use runwatch::cli::Args;
use runwatch::cli::Commands;
use runwatch::pipelines::{coverage, summary, watch};

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Commands::Summary {
            data,
            config,
            output,
        } => summary::run_summary(
            Path::new(&data),
            Path::new(&config),
            output.as_deref().map(Path::new),
        )
        .map(|_| ()),
        Commands::Coverage {
            data,
            config,
            sample,
            width,
            strategy,
            output,
        } => coverage::run_coverage(
            Path::new(&data),
            Path::new(&config),
            &sample,
            width,
            strategy,
            output.as_deref().map(Path::new),
        )
        .map(|_| ()),
        Commands::Watch {
            data,
            config,
            output,
            interval,
            max_polls,
        } => {
            println!(
                "Watching run data: {}, config: {}, output: {}",
                data, config, output
            );
            watch::run_watch(
                Path::new(&data),
                Path::new(&config),
                Path::new(&output),
                Duration::from_secs(interval),
                max_polls,
            )
            .map(|_| ())
        }
    };

    if let Err(e) = result {
        eprintln!("\x1b[1;91mError:\x1b[0m {}", e);
        process::exit(1);
    }
}
