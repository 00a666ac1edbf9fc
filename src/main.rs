/*!
 * Command-line interface for singlefile
 */

use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::ThreadPoolBuilder;
use tracing::warn;

use singlefile::config::{Args, Config};
use singlefile::generator::OutputGenerator;
use singlefile::guide::guide;
use singlefile::logging::init_logging;
use singlefile::plugins::PluginRegistry;
use singlefile::report::{Reporter, RunReport};
use singlefile::scanner::Scanner;

fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut command = Args::command();
        clap_complete::generate(shell, &mut command, "singlefile", &mut io::stdout());
        return Ok(());
    }

    if args.show_guide {
        println!("{}", guide());
        return Ok(());
    }

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Warning: {}", e);
    }

    // Create and validate configuration
    let config = Config::from_args(args);
    config.validate()?;

    // Configure thread pool
    if let Err(e) = ThreadPoolBuilder::new()
        .num_threads(config.num_threads)
        .build_global()
    {
        warn!("Failed to set thread pool size: {}", e);
    }

    let registry = PluginRegistry::from_formats(&config.formats)?;

    let progress = ProgressBar::new(0);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) Elapsed: {elapsed_precise}")
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?,
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("Scanning");
    progress.set_message(
        config
            .paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    );

    let scanner = Scanner::new(config.clone(), &registry, Arc::new(progress.clone()))?;
    let generator = OutputGenerator::new(config);

    let start_time = Instant::now();

    let snapshot = scanner.scan()?;

    progress.set_prefix("Writing");
    let summary = generator.generate_all(&snapshot, &registry)?;

    let duration = start_time.elapsed();
    progress.finish_and_clear();

    Reporter::new().print_report(&RunReport::new(&snapshot, &summary, duration));

    Ok(())
}
